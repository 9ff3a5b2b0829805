//! Show command - prints one table.

use anyhow::{Context, Result};
use lc_core::PivotStyle;
use lc_store::{read_entity, read_entity_with_metadata_as};

use crate::cli::{GlobalArgs, ShowArgs};
use crate::commands::common::{print_frame, table_schema};
use crate::context::CatalogContext;

/// Execute the show command
pub(crate) fn execute(args: &ShowArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let schema = table_schema(&args.table)?;

    let frame = if args.metadata {
        let style = if args.split {
            PivotStyle::Split
        } else {
            ctx.pivot
        };
        read_entity_with_metadata_as(ctx.db.conn(), &schema, style)
    } else {
        read_entity(ctx.db.conn(), &schema)
    }
    .with_context(|| format!("Failed to read {}", args.table))?;

    print_frame(&frame, args.output)
}
