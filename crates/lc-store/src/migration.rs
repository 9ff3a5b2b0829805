//! Catalog schema versioning.
//!
//! The applied version lives in `catalog_meta.schema_version`, outside the
//! `main` schema the browsing commands list. Writable opens bring the file up
//! to [`latest_version`]; read-only opens only check that it is there already.

use crate::ddl::{Migration, MIGRATIONS};
use crate::error::{CatalogError, CatalogResult};
use duckdb::Connection;

fn migration_error(message: String) -> CatalogError {
    CatalogError::MigrationError(message)
}

/// Highest version this build knows how to create.
pub fn latest_version() -> i32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Return the highest applied version, or 0 for a fresh database.
pub fn current_version(conn: &Connection) -> CatalogResult<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM catalog_meta.schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| migration_error(format!("failed to read schema version: {e}")))
}

/// Apply every migration newer than the recorded version.
///
/// Each migration and its version row commit together, so a failing DDL
/// file leaves the catalog at the previous version. A catalog written by a
/// newer build is refused. Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> CatalogResult<usize> {
    conn.execute_batch(
        "CREATE SCHEMA IF NOT EXISTS catalog_meta;
         CREATE TABLE IF NOT EXISTS catalog_meta.schema_version (
             version    INTEGER NOT NULL,
             applied_at TIMESTAMP NOT NULL DEFAULT now()
         );",
    )
    .map_err(|e| migration_error(format!("failed to create schema_version table: {e}")))?;

    let current = current_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(migration_error(format!(
            "catalog schema v{current:03} is newer than this build supports (v{latest:03})"
        )));
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    for migration in &pending {
        apply(conn, migration)?;
    }
    if !pending.is_empty() {
        log::debug!("Catalog schema at v{latest:03} ({} applied)", pending.len());
    }
    Ok(pending.len())
}

fn apply(conn: &Connection, migration: &Migration) -> CatalogResult<()> {
    log::debug!("Applying catalog migration v{:03}", migration.version);
    let version = migration.version;
    let result = conn
        .execute_batch("BEGIN TRANSACTION")
        .and_then(|_| conn.execute_batch(migration.sql))
        .and_then(|_| {
            conn.execute(
                "INSERT INTO catalog_meta.schema_version (version) VALUES (?)",
                duckdb::params![version],
            )
        })
        .and_then(|_| conn.execute_batch("COMMIT"));

    result.map_err(|e| {
        let _ = conn.execute_batch("ROLLBACK");
        migration_error(format!("migration v{version:03} failed: {e}"))
    })
}

/// Fail unless the catalog already carries the latest schema.
///
/// Used for read-only opens, which cannot migrate.
pub fn ensure_current(conn: &Connection) -> CatalogResult<()> {
    let current = current_version(conn)?;
    let latest = latest_version();
    if current != latest {
        return Err(migration_error(format!(
            "catalog schema is v{current:03}, expected v{latest:03}; open it writable once to migrate"
        )));
    }
    Ok(())
}
