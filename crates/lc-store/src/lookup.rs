//! Natural-key lookups.
//!
//! Resolves human-readable identifiers (names, file paths) back to surrogate
//! ids. Uniqueness is only checked here, at read time: duplicate natural keys
//! are accepted on insert and surface as [`CatalogError::Ambiguous`] on the
//! next lookup.

use crate::error::{invalid, CatalogError, CatalogResult};
use crate::frame::Frame;
use crate::read::{read_entity, read_entity_with_metadata};
use duckdb::Connection;
use lc_core::EntitySchema;

/// Find the id of the single row whose suffixed columns `keys` all equal
/// `values`.
///
/// Cells are compared by their text form, so pivoted metadata columns must be
/// given in their combined `"<value> <type>"` form.
pub fn find_id(
    conn: &Connection,
    schema: &EntitySchema,
    keys: &[&str],
    values: &[&str],
) -> CatalogResult<i64> {
    if keys.len() != values.len() {
        return invalid(format!(
            "{} lookup keys but {} values",
            keys.len(),
            values.len()
        ));
    }
    if keys.is_empty() {
        return invalid("lookup needs at least one key");
    }

    let frame = read_for_lookup(conn, schema)?;
    let criteria = describe(keys, values);

    let matches = frame.filter_rows(|f, row| {
        keys.iter().zip(values).all(|(key, value)| {
            f.get(row, key)
                .and_then(|cell| cell.to_text())
                .is_some_and(|text| text == *value)
        })
    });

    match matches.len() {
        0 => Err(CatalogError::NotFound {
            table: schema.table().to_string(),
            criteria,
        }),
        1 => row_id(&matches, schema, 0),
        count => Err(CatalogError::Ambiguous {
            table: schema.table().to_string(),
            criteria,
            count,
        }),
    }
}

/// Resolve every name in `names` to its row id with a single read of the
/// base table. Ids come back in the order of `names`.
pub fn find_ids_by_name(
    conn: &Connection,
    schema: &EntitySchema,
    names: &[String],
) -> CatalogResult<Vec<i64>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let frame = read_entity(conn, schema)?;
    let name_column = schema.suffixed("name");
    let id_column = schema.id_column();

    let name_idx = frame.column_index(&name_column);
    let id_idx = frame
        .column_index(&id_column)
        .ok_or_else(|| CatalogError::QueryError(format!("no '{id_column}' column")))?;

    names
        .iter()
        .map(|name| {
            let hits: Vec<i64> = frame
                .rows()
                .iter()
                .filter(|row| {
                    name_idx.is_some_and(|i| row[i].as_str() == Some(name.as_str()))
                })
                .filter_map(|row| row[id_idx].as_i64())
                .collect();
            let criteria = format!("{name_column} = '{name}'");
            match hits.as_slice() {
                [] => Err(CatalogError::NotFound {
                    table: schema.table().to_string(),
                    criteria,
                }),
                [id] => Ok(*id),
                _ => Err(CatalogError::Ambiguous {
                    table: schema.table().to_string(),
                    criteria,
                    count: hits.len(),
                }),
            }
        })
        .collect()
}

fn read_for_lookup(conn: &Connection, schema: &EntitySchema) -> CatalogResult<Frame> {
    if schema.metadata_table().is_some() {
        read_entity_with_metadata(conn, schema)
    } else {
        read_entity(conn, schema)
    }
}

fn row_id(frame: &Frame, schema: &EntitySchema, row: usize) -> CatalogResult<i64> {
    let id_column = schema.id_column();
    frame
        .get(row, &id_column)
        .and_then(|cell| cell.as_i64())
        .ok_or_else(|| CatalogError::QueryError(format!("no '{id_column}' column")))
}

fn describe(keys: &[&str], values: &[&str]) -> String {
    keys.iter()
        .zip(values)
        .map(|(k, v)| format!("{k} = '{v}'"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod tests;
