//! Shared helpers for reading DuckDB rows into strings and [`Cell`]s.

use crate::error::{CatalogError, CatalogResult};
use crate::frame::{Cell, Frame};
use duckdb::types::ValueRef;

/// Read a column value as a String, trying multiple DuckDB types.
///
/// DuckDB integer columns return `None` for `Option<String>`, so we try
/// String -> i64 -> f64 -> bool -> "null".
pub(crate) fn get_column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return s;
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return n.to_string();
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return f.to_string();
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return b.to_string();
    }
    "null".to_string()
}

/// Read a column value as a typed [`Cell`].
///
/// Integer and floating widths collapse to `Int` / `Float`; anything without a
/// direct counterpart (dates, decimals, nested values) goes through
/// [`get_column_as_string`].
pub(crate) fn get_column_as_cell(row: &duckdb::Row<'_>, idx: usize) -> Cell {
    match row.get_ref(idx) {
        Ok(ValueRef::Null) => Cell::Null,
        Ok(ValueRef::Boolean(b)) => Cell::Bool(b),
        Ok(ValueRef::TinyInt(n)) => Cell::Int(i64::from(n)),
        Ok(ValueRef::SmallInt(n)) => Cell::Int(i64::from(n)),
        Ok(ValueRef::Int(n)) => Cell::Int(i64::from(n)),
        Ok(ValueRef::BigInt(n)) => Cell::Int(n),
        Ok(ValueRef::UTinyInt(n)) => Cell::Int(i64::from(n)),
        Ok(ValueRef::USmallInt(n)) => Cell::Int(i64::from(n)),
        Ok(ValueRef::UInt(n)) => Cell::Int(i64::from(n)),
        Ok(ValueRef::Float(f)) => Cell::Float(f64::from(f)),
        Ok(ValueRef::Double(f)) => Cell::Float(f),
        Ok(ValueRef::Text(bytes)) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
        _ => Cell::Text(get_column_as_string(row, idx)),
    }
}

/// Execute a prepared statement and collect all results as strings.
///
/// DuckDB 1.4 panics on `stmt.column_count()` before execution, so we
/// collect all rows via `query_map` first, then read column metadata.
///
/// Returns `(column_names, rows)`.
pub(crate) fn execute_and_collect(
    stmt: &mut duckdb::Statement,
) -> CatalogResult<(Vec<String>, Vec<Vec<String>>)> {
    let raw_rows: Vec<Vec<String>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count)
                .map(|i| get_column_as_string(row, i))
                .collect())
        })
        .map_err(|e| CatalogError::QueryError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CatalogError::QueryError(format!("row error: {e}")))?;

    Ok((column_names(stmt), raw_rows))
}

/// Execute a prepared statement and collect the result as a [`Frame`].
///
/// Same ordering constraint as [`execute_and_collect`]: rows first, then
/// column names.
pub(crate) fn execute_frame(stmt: &mut duckdb::Statement) -> CatalogResult<Frame> {
    let rows: Vec<Vec<Cell>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count).map(|i| get_column_as_cell(row, i)).collect())
        })
        .map_err(|e| CatalogError::QueryError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CatalogError::QueryError(format!("row error: {e}")))?;

    Frame::from_parts(column_names(stmt), rows)
}

fn column_names(stmt: &duckdb::Statement) -> Vec<String> {
    (0..stmt.column_count())
        .map(|i| {
            stmt.column_name(i)
                .map_or("?".to_string(), |v| v.to_string())
        })
        .collect()
}
