//! Entity reads: a base table alone, or with its metadata pivoted onto it.
//!
//! Every column of a returned frame is suffixed with the table's singular
//! (`name` becomes `name_material`) so frames from several tables can be
//! joined without clashes.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use crate::frame::{Cell, Frame};
use crate::row_helpers::execute_frame;
use duckdb::Connection;
use lc_core::{EntitySchema, PivotStyle};
use std::collections::{HashMap, HashSet};

/// Read `SELECT * FROM <table> ORDER BY id`, drop all-null columns, and
/// suffix every column.
pub fn read_entity(conn: &Connection, schema: &EntitySchema) -> CatalogResult<Frame> {
    let mut frame = read_table(conn, schema.table())?;
    frame.drop_null_columns();
    frame.rename_columns(|c| schema.suffixed(c))?;
    Ok(frame)
}

/// [`read_entity_with_metadata_as`] with the combined `"<value> <type>"` cells.
pub fn read_entity_with_metadata(
    conn: &Connection,
    schema: &EntitySchema,
) -> CatalogResult<Frame> {
    read_entity_with_metadata_as(conn, schema, PivotStyle::Combined)
}

/// Read a base table and pivot its metadata rows onto it.
///
/// Each metadata row lands on the base row whose plain `id` equals its
/// foreign key; rows owned by a missing id are ignored. Metadata is read in
/// `id` order, so a repeated key on one entity keeps its last value. A key
/// that names a base column overwrites that column's cell. All-null columns
/// are dropped before suffixing.
pub fn read_entity_with_metadata_as(
    conn: &Connection,
    schema: &EntitySchema,
    style: PivotStyle,
) -> CatalogResult<Frame> {
    let mut frame = read_pivoted(conn, schema, style)?;
    frame.drop_null_columns();
    Ok(frame)
}

/// Pivoted and suffixed like [`read_entity_with_metadata`], but all-null
/// columns are kept. Joins read their child side this way so a foreign key
/// that is null on every row still exists to join on.
pub(crate) fn read_pivoted(
    conn: &Connection,
    schema: &EntitySchema,
    style: PivotStyle,
) -> CatalogResult<Frame> {
    let metadata_table = schema.metadata_table().ok_or_else(|| {
        CatalogError::QueryError(format!("'{}' has no metadata table", schema.table()))
    })?;

    let mut frame = read_table(conn, schema.table())?;
    let metadata = read_table(conn, metadata_table)?;
    pivot_metadata(&mut frame, &metadata, schema.fk_column(), style)?;

    frame.rename_columns(|c| schema.suffixed(c))?;
    Ok(frame)
}

fn read_table(conn: &Connection, table: &str) -> CatalogResult<Frame> {
    lc_core::validate_identifier(table)?;
    let sql = format!("SELECT * FROM \"{table}\" ORDER BY id");
    log::debug!("{sql}");
    let mut stmt = conn.prepare(&sql).query_context(&format!("read {table}"))?;
    execute_frame(&mut stmt)
}

struct MetadataCell {
    key: String,
    value: String,
    tag: String,
}

fn pivot_metadata(
    frame: &mut Frame,
    metadata: &Frame,
    fk_column: &str,
    style: PivotStyle,
) -> CatalogResult<()> {
    let owner_idx = metadata_column(metadata, fk_column)?;
    let key_idx = metadata_column(metadata, "key")?;
    let value_idx = metadata_column(metadata, "value")?;
    let type_idx = metadata_column(metadata, "type")?;

    let mut by_owner: HashMap<i64, Vec<MetadataCell>> = HashMap::new();
    for row in metadata.rows() {
        let Some(owner) = row[owner_idx].as_i64() else {
            continue;
        };
        by_owner.entry(owner).or_default().push(MetadataCell {
            key: row[key_idx].to_text().unwrap_or_default(),
            value: row[value_idx].to_text().unwrap_or_default(),
            tag: row[type_idx].to_text().unwrap_or_default(),
        });
    }
    if by_owner.is_empty() {
        return Ok(());
    }
    if style == PivotStyle::Split {
        ensure_type_columns_free(frame, by_owner.values().flatten())?;
    }

    let ids: Vec<Option<i64>> = frame
        .column("id")
        .ok_or_else(|| CatalogError::QueryError("base table has no 'id' column".to_string()))?
        .into_iter()
        .map(Cell::as_i64)
        .collect();

    for (row, id) in ids.into_iter().enumerate() {
        let Some(cells) = id.and_then(|id| by_owner.get(&id)) else {
            continue;
        };
        for cell in cells {
            match style {
                PivotStyle::Combined => {
                    frame.set(row, &cell.key, Cell::Text(format!("{} {}", cell.value, cell.tag)));
                }
                PivotStyle::Split => {
                    frame.set(row, &cell.key, Cell::Text(cell.value.clone()));
                    frame.set(row, &format!("{}_type", cell.key), Cell::Text(cell.tag.clone()));
                }
            }
        }
    }
    Ok(())
}

/// In split style `<key>_type` must not already name a metadata key or a
/// base column, or one of the two would silently overwrite the other.
fn ensure_type_columns_free<'a>(
    frame: &Frame,
    cells: impl Iterator<Item = &'a MetadataCell>,
) -> CatalogResult<()> {
    let cells: Vec<&MetadataCell> = cells.collect();
    let keys: HashSet<&str> = cells.iter().map(|c| c.key.as_str()).collect();
    for cell in cells {
        let type_column = format!("{}_type", cell.key);
        if keys.contains(type_column.as_str()) || frame.has_column(&type_column) {
            return Err(CatalogError::QueryError(format!(
                "split pivot column '{type_column}' for key '{}' collides with an existing column",
                cell.key
            )));
        }
    }
    Ok(())
}

fn metadata_column(metadata: &Frame, name: &str) -> CatalogResult<usize> {
    metadata
        .column_index(name)
        .ok_or_else(|| CatalogError::QueryError(format!("metadata table has no '{name}' column")))
}

#[cfg(test)]
#[path = "read_test.rs"]
mod tests;
