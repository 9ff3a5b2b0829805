//! Catalog database connection wrapper.
//!
//! [`CatalogDb`] owns a DuckDB [`Connection`] and provides helpers for opening,
//! migrating, probing, and transacting against the catalog.

use crate::error::{CatalogError, CatalogResult};
use crate::migration::{ensure_current, run_migrations};
use duckdb::{AccessMode, Config as DuckConfig, Connection};
use lc_core::config::MEMORY_PATH;
use std::path::Path;

/// Wrapper around the single DuckDB connection a catalog session uses.
///
/// Single-threaded: every load is one transaction on this connection, and
/// lookups issued inside a load see its uncommitted rows. Closing is `Drop`.
pub struct CatalogDb {
    conn: Connection,
}

impl CatalogDb {
    /// Open (or create) the catalog at `path` and run pending migrations.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| CatalogError::ConnectionError(format!("{e}: {}", path.display())))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an existing catalog without write access.
    ///
    /// Migrations are not applied; the file must already hold the latest
    /// schema.
    pub fn open_read_only(path: &Path) -> CatalogResult<Self> {
        let config = DuckConfig::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| CatalogError::ConnectionError(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| CatalogError::ConnectionError(format!("{e}: {}", path.display())))?;
        ensure_current(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory catalog with all migrations applied.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> CatalogResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CatalogError::ConnectionError(e.to_string()))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open whatever a resolved configuration path names: `:memory:` or a file.
    pub fn open_path(path: &str, read_only: bool) -> CatalogResult<Self> {
        match (path, read_only) {
            (MEMORY_PATH, _) => Self::open_memory(),
            (file, true) => Self::open_read_only(Path::new(file)),
            (file, false) => Self::open(Path::new(file)),
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run the no-op liveness probe.
    pub fn is_alive(&self) -> bool {
        probe(&self.conn).is_ok()
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error and returning the body's error unchanged.
    pub fn transaction<F, T>(&self, body: F) -> CatalogResult<T>
    where
        F: FnOnce(&Connection) -> CatalogResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| CatalogError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(CatalogError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(e) => {
                log::warn!("Rolling back catalog transaction: {e}");
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

/// Issue `SELECT 1`, mapping any failure to [`CatalogError::ConnectionError`].
pub(crate) fn probe(conn: &Connection) -> CatalogResult<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
        .map(|_| ())
        .map_err(|e| CatalogError::ConnectionError(format!("liveness probe failed: {e}")))
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
