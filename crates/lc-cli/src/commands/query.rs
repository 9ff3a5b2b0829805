//! Query command - ad hoc SQL against the catalog.

use anyhow::{Context, Result};
use lc_store::query::query_frame;

use crate::cli::{GlobalArgs, QueryArgs};
use crate::commands::common::print_frame;
use crate::context::CatalogContext;

/// Execute the query command
pub(crate) fn execute(args: &QueryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let frame = query_frame(ctx.db.conn(), &args.sql).context("Failed to execute query")?;
    print_frame(&frame, args.output)
}
