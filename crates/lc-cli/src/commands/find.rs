//! Find command - natural-key lookup.

use anyhow::{Context, Result};
use lc_store::find_id;

use crate::cli::{FindArgs, GlobalArgs};
use crate::commands::common::{parse_criteria, table_schema};
use crate::context::CatalogContext;

/// Execute the find command
pub(crate) fn execute(args: &FindArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let schema = table_schema(&args.table)?;
    let (keys, values) = parse_criteria(&args.criteria)?;

    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    let id = find_id(ctx.db.conn(), &schema, &keys, &values)
        .with_context(|| format!("Lookup in {} failed", args.table))?;

    println!("{id}");
    Ok(())
}
