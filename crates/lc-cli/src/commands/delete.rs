//! Delete command.

use anyhow::{Context, Result};
use lc_store::delete_rows;

use crate::cli::{DeleteArgs, GlobalArgs};
use crate::commands::common::table_schema;
use crate::context::CatalogContext;

/// Execute the delete command
pub(crate) fn execute(args: &DeleteArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let schema = table_schema(&args.table)?;

    let deleted = delete_rows(&ctx.db, &schema, &args.ids)
        .with_context(|| format!("Failed to delete from {}", args.table))?;
    println!("Deleted {deleted} of {} rows from {}", args.ids.len(), args.table);
    Ok(())
}
