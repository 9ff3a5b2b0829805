//! Row deletion.

use crate::connection::CatalogDb;
use crate::error::{invalid, CatalogResult, CatalogResultExt};
use duckdb::Connection;
use lc_core::{Entity, EntitySchema};

/// Delete rows `ids` from `schema`'s table, clearing their metadata first.
///
/// Statements run in autocommit mode, metadata before base rows: DuckDB
/// checks foreign keys against rows deleted earlier in the same transaction,
/// so both deletes cannot share one. For catalog entities, rows still
/// referenced from another table (a panel with samples) are refused before
/// anything is deleted.
///
/// Returns the number of base rows deleted.
pub fn delete_rows(db: &CatalogDb, schema: &EntitySchema, ids: &[i64]) -> CatalogResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let conn = db.conn();

    if let Some(entity) = Entity::from_table(schema.table()) {
        ensure_unreferenced(conn, entity, ids, &placeholders)?;
    }

    if let Some(metadata_table) = schema.metadata_table() {
        let sql = format!(
            "DELETE FROM \"{metadata_table}\" WHERE \"{}\" IN ({placeholders})",
            schema.fk_column()
        );
        log::debug!("{sql}");
        conn.execute(&sql, duckdb::params_from_iter(ids))
            .query_context(&format!("delete from {metadata_table}"))?;
    }

    let table = schema.table();
    let sql = format!("DELETE FROM \"{table}\" WHERE id IN ({placeholders})");
    log::debug!("{sql}");
    let deleted = conn
        .execute(&sql, duckdb::params_from_iter(ids))
        .query_context(&format!("delete from {table}"))?;

    log::info!("Deleted {deleted} rows from {table} where id is in {ids:?}");
    Ok(deleted)
}

fn ensure_unreferenced(
    conn: &Connection,
    entity: Entity,
    ids: &[i64],
    placeholders: &str,
) -> CatalogResult<()> {
    for (table, column) in entity.referenced_by() {
        let sql = format!("SELECT COUNT(*) FROM \"{table}\" WHERE \"{column}\" IN ({placeholders})");
        let referencing: i64 = conn
            .query_row(&sql, duckdb::params_from_iter(ids), |row| row.get(0))
            .query_context(&format!("check references from {table}"))?;
        if referencing > 0 {
            return invalid(format!(
                "{entity} rows {ids:?} are still referenced by {referencing} rows in {table}.{column}"
            ));
        }
    }
    Ok(())
}
