//! Relation command - many-to-many correlation through a junction table.

use anyhow::{Context, Result};
use lc_store::join_many_to_many;

use crate::cli::{GlobalArgs, RelationArgs};
use crate::commands::common::{print_frame, table_schema};
use crate::context::CatalogContext;

/// Execute the relation command
pub(crate) fn execute(args: &RelationArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let a = table_schema(&args.a)?;
    let b = table_schema(&args.b)?;
    let junction = table_schema(&args.junction)?;

    let frame = join_many_to_many(ctx.db.conn(), &a, &b, &junction).with_context(|| {
        format!(
            "Failed to relate {} and {} through {}",
            args.a, args.b, args.junction
        )
    })?;
    print_frame(&frame, args.output)
}
