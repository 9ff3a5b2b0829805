//! Joins across parent/child and many-to-many relations.
//!
//! All joins are inner joins: a child whose parent id has no match is left
//! out of the result. Inputs are read with their metadata pivoted on, so the
//! columns are already suffixed per table before joining. The child side
//! keeps its all-null columns until after the join, so a foreign key that is
//! null on every row yields an empty result instead of a missing column.

use crate::error::{CatalogError, CatalogResult};
use crate::frame::Frame;
use crate::read::{read_entity, read_entity_with_metadata, read_pivoted};
use duckdb::Connection;
use lc_core::{EntitySchema, PivotStyle};

/// One parent in a [`join_with_multiple_parents`] call.
#[derive(Debug, Clone)]
pub struct ParentLink {
    pub parent: EntitySchema,
    /// Unsuffixed fk column in the child; defaults to the parent's
    /// `<singular>_id`.
    pub fk_base: Option<String>,
}

impl ParentLink {
    pub fn new(parent: EntitySchema) -> Self {
        Self {
            parent,
            fk_base: None,
        }
    }

    pub fn with_fk(parent: EntitySchema, fk_base: impl Into<String>) -> Self {
        Self {
            parent,
            fk_base: Some(fk_base.into()),
        }
    }

    fn fk_base(&self) -> &str {
        self.fk_base
            .as_deref()
            .unwrap_or_else(|| self.parent.fk_column())
    }

    fn fk_column(&self, child: &EntitySchema) -> String {
        child.suffixed(self.fk_base())
    }

    /// Suffix for this parent's overlapping columns: `_<parent singular>`
    /// through the default fk, otherwise the fk name without `_id`
    /// (`registered_measurement_id` gives `_registered_measurement`).
    pub fn suffix(&self) -> String {
        let base = self.fk_base();
        if base == self.parent.fk_column() {
            return self.parent.suffix();
        }
        format!("_{}", base.strip_suffix("_id").unwrap_or(base))
    }
}

/// Inner-join `data` to `parent` on `data[fk_column] == parent["id" + suffixes.1]`,
/// then drop `fk_column`.
///
/// Overlapping column names get `suffixes.0` on the left and `suffixes.1` on
/// the right.
pub fn join_parent(
    data: &Frame,
    parent: &Frame,
    fk_column: &str,
    suffixes: (&str, &str),
) -> CatalogResult<Frame> {
    let parent_id = format!("id{}", suffixes.1);
    join_on(data, parent, fk_column, &parent_id, suffixes)
}

/// Join through one [`ParentLink`], keying on the parent's own id column.
fn join_link(
    data: &Frame,
    parent: &Frame,
    link: &ParentLink,
    child: &EntitySchema,
    left_suffix: &str,
) -> CatalogResult<Frame> {
    let right_suffix = link.suffix();
    join_on(
        data,
        parent,
        &link.fk_column(child),
        &link.parent.id_column(),
        (left_suffix, &right_suffix),
    )
}

fn join_on(
    data: &Frame,
    parent: &Frame,
    fk_column: &str,
    parent_key: &str,
    suffixes: (&str, &str),
) -> CatalogResult<Frame> {
    let mut merged = data.inner_join(parent, fk_column, parent_key, suffixes)?;
    // The fk itself is renamed when the parent has a column of the same name.
    let fk_out = if fk_column != parent_key && parent.has_column(fk_column) {
        format!("{fk_column}{}", suffixes.0)
    } else {
        fk_column.to_string()
    };
    merged.drop_columns(&[fk_out.as_str()]);
    Ok(merged)
}

/// Read `entity` and `parent` with metadata and join them.
///
/// `fk_base` is the unsuffixed fk column in `entity` (default: the parent's
/// `<singular>_id`). The suffix pair is `(_<entity>, ParentLink::suffix)`,
/// which is `_<parent>` through the default fk.
pub fn join_with_parent(
    conn: &Connection,
    entity: &EntitySchema,
    parent: &EntitySchema,
    fk_base: Option<&str>,
) -> CatalogResult<Frame> {
    let link = ParentLink {
        parent: parent.clone(),
        fk_base: fk_base.map(str::to_string),
    };
    let data = read_pivoted(conn, entity, PivotStyle::Combined)?;
    let parent_data = read_entity_with_metadata(conn, parent)?;

    let mut merged = join_link(&data, &parent_data, &link, entity, &entity.suffix())?;
    merged.drop_null_columns();
    Ok(merged)
}

/// Fold the parent joins over `parents`, left to right.
///
/// Columns already accumulated keep their names; an overlapping parent
/// column gets [`ParentLink::suffix`], so two links to the same table stay
/// apart by their fk names. With no parents the entity frame is returned as
/// read.
pub fn join_with_multiple_parents(
    conn: &Connection,
    entity: &EntitySchema,
    parents: &[ParentLink],
) -> CatalogResult<Frame> {
    let mut data = read_pivoted(conn, entity, PivotStyle::Combined)?;
    for link in parents {
        let parent_data = read_entity_with_metadata(conn, &link.parent)?;
        data = join_link(&data, &parent_data, link, entity, "")?;
    }
    data.drop_null_columns();
    Ok(data)
}

/// Correlate `a` and `b` through `junction`, one output row per junction row
/// whose two ends both exist.
///
/// Fails with [`CatalogError::EmptyRelation`] when the junction has no rows.
/// Junction columns are dropped from the result.
pub fn join_many_to_many(
    conn: &Connection,
    a: &EntitySchema,
    b: &EntitySchema,
    junction: &EntitySchema,
) -> CatalogResult<Frame> {
    let data_a = read_entity_with_metadata(conn, a)?;
    let data_b = read_entity_with_metadata(conn, b)?;
    let mut links = read_entity(conn, junction)?;
    if links.is_empty() {
        return Err(CatalogError::EmptyRelation {
            table: junction.table().to_string(),
        });
    }
    let link_id = junction.id_column();
    links.drop_columns(&[link_id.as_str()]);
    let junction_columns: Vec<String> = links.columns().to_vec();

    let a_fk = junction.suffixed(a.fk_column());
    let b_fk = junction.suffixed(b.fk_column());
    let a_suffix = a.suffix();
    let b_suffix = b.suffix();

    let merged = data_a.inner_join(&links, &a.id_column(), &a_fk, ("", &a_suffix))?;
    let mut merged = merged.inner_join(&data_b, &b_fk, &b.id_column(), ("", &b_suffix))?;

    let drop: Vec<&str> = junction_columns.iter().map(String::as_str).collect();
    merged.drop_columns(&drop);
    merged.drop_null_columns();
    Ok(merged)
}

#[cfg(test)]
#[path = "join_test.rs"]
mod tests;
