//! Tables command - catalog tables with row counts.

use anyhow::{Context, Result};
use lc_store::query::{list_tables, table_row_count};

use crate::cli::GlobalArgs;
use crate::context::CatalogContext;

/// Execute the tables command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let conn = ctx.db.conn();
    let tables = list_tables(conn).context("Failed to list catalog tables")?;

    println!("Catalog tables in {} ({}):\n", ctx.database_path, tables.len());
    for table in &tables {
        let count = table_row_count(conn, table).unwrap_or_else(|e| {
            log::warn!("Failed to count rows in {table}: {e}");
            0
        });
        println!("  {:<40} {:>6} rows", table, count);
    }
    Ok(())
}
