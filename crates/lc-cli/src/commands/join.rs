//! Join command - an entity with its parents.

use anyhow::{Context, Result};
use lc_store::{join_with_multiple_parents, join_with_parent, ParentLink};

use crate::cli::{GlobalArgs, JoinArgs};
use crate::commands::common::{parse_parent, print_frame, table_schema};
use crate::context::CatalogContext;

/// Execute the join command
pub(crate) fn execute(args: &JoinArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let entity = table_schema(&args.entity)?;
    let parents = args
        .parents
        .iter()
        .map(|p| parse_parent(p))
        .collect::<Result<Vec<ParentLink>>>()?;

    let frame = match parents.as_slice() {
        [single] => join_with_parent(
            ctx.db.conn(),
            &entity,
            &single.parent,
            single.fk_base.as_deref(),
        ),
        many => join_with_multiple_parents(ctx.db.conn(), &entity, many),
    }
    .with_context(|| format!("Failed to join {} with {}", args.entity, args.parents.join(", ")))?;

    print_frame(&frame, args.output)
}
