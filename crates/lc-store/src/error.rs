//! Error types for the catalog store.

use lc_core::CoreError;
use thiserror::Error;

/// Catalog store errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to open the catalog database, or the liveness probe failed (C001).
    #[error("[C001] Catalog connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration failed (C002).
    #[error("[C002] Catalog migration failed: {0}")]
    MigrationError(String),

    /// SQL read failure or an unresolvable column layout (C003).
    #[error("[C003] Catalog query failed: {0}")]
    QueryError(String),

    /// Transaction management error (C004).
    #[error("[C004] Catalog transaction failed: {0}")]
    TransactionError(String),

    /// An input precondition was violated before any I/O (C005).
    #[error("[C005] Validation failed: {0}")]
    Validation(String),

    /// A junction table has no rows to join through (C006).
    #[error("[C006] Relation table '{table}' is empty")]
    EmptyRelation { table: String },

    /// A natural-key lookup matched no row (C007).
    #[error("[C007] No row in '{table}' matches {criteria}")]
    NotFound { table: String, criteria: String },

    /// A natural-key lookup matched more than one row (C008).
    #[error("[C008] {count} rows in '{table}' match {criteria}, expected exactly one")]
    Ambiguous {
        table: String,
        criteria: String,
        count: usize,
    },

    /// An INSERT statement failed (C009).
    #[error("[C009] Insert into '{table}' failed: {message}")]
    Insert { table: String, message: String },

    /// DuckDB driver error with preserved source chain (C010).
    #[error("[C010] DuckDB error")]
    DuckDb(#[source] duckdb::Error),

    /// Error raised by lc-core (C011).
    #[error("[C011] {0}")]
    Core(#[source] CoreError),
}

/// Result type alias for [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<duckdb::Error> for CatalogError {
    fn from(err: duckdb::Error) -> Self {
        CatalogError::DuckDb(err)
    }
}

impl From<CoreError> for CatalogError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidMetadata { message } | CoreError::InvalidTypeTag { message } => {
                CatalogError::Validation(message)
            }
            other => CatalogError::Core(other),
        }
    }
}

/// Attach context to raw DuckDB results.
pub trait CatalogResultExt<T> {
    /// Map a driver error to [`CatalogError::QueryError`] prefixed by `context`.
    fn query_context(self, context: &str) -> CatalogResult<T>;

    /// Map a driver error to [`CatalogError::Insert`] for `table`.
    fn insert_context(self, table: &str) -> CatalogResult<T>;
}

impl<T> CatalogResultExt<T> for Result<T, duckdb::Error> {
    fn query_context(self, context: &str) -> CatalogResult<T> {
        self.map_err(|e| CatalogError::QueryError(format!("{context}: {e}")))
    }

    fn insert_context(self, table: &str) -> CatalogResult<T> {
        self.map_err(|e| CatalogError::Insert {
            table: table.to_string(),
            message: e.to_string(),
        })
    }
}

/// Shorthand for a [`CatalogError::Validation`] result.
pub(crate) fn invalid<T>(message: impl Into<String>) -> CatalogResult<T> {
    Err(CatalogError::Validation(message.into()))
}
