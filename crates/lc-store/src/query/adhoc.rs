//! Ad-hoc query execution and table introspection helpers.
//!
//! Returns plain Rust types so callers don't need a direct `duckdb` dependency.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use crate::frame::Frame;
use crate::row_helpers::{execute_and_collect, execute_frame};
use duckdb::Connection;
use serde::Serialize;

/// Result of executing an ad-hoc SQL query against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Column names from the result set.
    pub columns: Vec<String>,
    /// Rows of string-coerced values.
    pub rows: Vec<Vec<String>>,
}

/// Execute an ad-hoc SQL query and return all results as strings.
pub fn execute_query(conn: &Connection, sql: &str) -> CatalogResult<QueryResult> {
    let mut stmt = conn.prepare(sql).query_context("prepare failed")?;
    let (columns, rows) = execute_and_collect(&mut stmt)?;
    Ok(QueryResult { columns, rows })
}

/// Execute an ad-hoc SQL query keeping cell types, so SQL `NULL` and the
/// text `'null'` stay distinct.
pub fn query_frame(conn: &Connection, sql: &str) -> CatalogResult<Frame> {
    let mut stmt = conn.prepare(sql).query_context("prepare failed")?;
    execute_frame(&mut stmt)
}

/// List the catalog's tables in the `main` schema.
pub fn list_tables(conn: &Connection) -> CatalogResult<Vec<String>> {
    let result = execute_query(
        conn,
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = 'main' \
         ORDER BY table_name",
    )?;
    Ok(result
        .rows
        .into_iter()
        .filter_map(|r| r.into_iter().next())
        .collect())
}

/// Get the row count for a catalog table.
pub fn table_row_count(conn: &Connection, table_name: &str) -> CatalogResult<i64> {
    if !lc_core::is_valid_identifier(table_name) {
        return Err(CatalogError::QueryError(format!(
            "invalid table name '{table_name}': must contain only alphanumeric characters and underscores"
        )));
    }
    let count: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM \"{table_name}\""),
            [],
            |row| row.get(0),
        )
        .query_context(&format!("count failed for {table_name}"))?;
    Ok(count)
}

#[cfg(test)]
#[path = "adhoc_test.rs"]
mod tests;
