//! Transactional entity writes.
//!
//! A load inserts one entity row, its metadata rows, and any relation rows as
//! one transaction on [`CatalogDb`]. Inputs are validated before the
//! transaction opens; any failure inside it rolls every row back and the
//! error reaches the caller unchanged.
//!
//! - [`catalog`]: materials, fabrications, measurement types, panels, samples
//! - [`measurement`]: UT and XCT measurements with their sample links
//! - [`dataset`]: datasets and measurement registrations

pub mod catalog;
pub mod dataset;
pub mod measurement;

pub use catalog::{
    load_fabrication, load_material, load_measurementtype, load_panel, load_sample, NewMaterial,
    NewPanel, NewSample,
};
pub use dataset::{load_dataset, load_registration, NewDataset, NewRegistration};
pub use measurement::{
    load_ut_measurement, load_xct_measurement, NewMeasurement, SignalType, UtSettings,
    XctSettings,
};

use crate::connection::{probe, CatalogDb};
use crate::error::{invalid, CatalogResult, CatalogResultExt};
use duckdb::types::Value;
use duckdb::Connection;
use lc_core::{validate_identifier, Entity, EntitySchema, MetadataEntry};

/// Column/value pairs for one INSERT, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, Value)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    pub fn with(mut self, column: impl Into<String>, value: Value) -> Self {
        self.0.push((column.into(), value));
        self
    }

    pub fn with_text(self, column: impl Into<String>, value: &str) -> Self {
        self.with(column, Value::Text(value.to_string()))
    }

    pub fn with_id(self, column: impl Into<String>, id: i64) -> Self {
        self.with(column, Value::BigInt(id))
    }

    /// Add a text column only when `value` is present.
    pub fn with_opt_text(self, column: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with_text(column, v),
            None => self,
        }
    }

    /// Add an id column only when `id` is present.
    pub fn with_opt_id(self, column: impl Into<String>, id: Option<i64>) -> Self {
        match id {
            Some(id) => self.with_id(column, id),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }
}

/// Insert one row into `table` and return its generated id.
///
/// Probes the connection first, rejects an empty attribute set, and checks
/// every identifier before building the statement. The caller owns the
/// transaction boundary.
pub fn insert_row(conn: &Connection, table: &str, attributes: &Attributes) -> CatalogResult<i64> {
    probe(conn)?;
    if attributes.is_empty() {
        return invalid(format!("no attributes to insert into '{table}'"));
    }
    validate_identifier(table)?;
    for column in attributes.columns() {
        validate_identifier(column)?;
    }

    let columns = attributes
        .columns()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; attributes.len()].join(", ");
    let sql = format!("INSERT INTO \"{table}\" ({columns}) VALUES ({placeholders}) RETURNING id");
    log::debug!("{sql}");

    conn.query_row(
        &sql,
        duckdb::params_from_iter(attributes.values()),
        |row| row.get::<_, i64>(0),
    )
    .insert_context(table)
}

/// Insert an entity row plus its metadata rows without opening a
/// transaction. Loaders call this inside [`CatalogDb::transaction`].
pub(crate) fn insert_entity(
    conn: &Connection,
    schema: &EntitySchema,
    attributes: &Attributes,
    metadata: &[MetadataEntry],
) -> CatalogResult<i64> {
    let id = insert_row(conn, schema.table(), attributes)?;
    insert_metadata(conn, schema, id, metadata)?;
    Ok(id)
}

/// Attach metadata rows to entity `id`.
pub(crate) fn insert_metadata(
    conn: &Connection,
    schema: &EntitySchema,
    id: i64,
    metadata: &[MetadataEntry],
) -> CatalogResult<()> {
    if metadata.is_empty() {
        return Ok(());
    }
    let Some(metadata_table) = schema.metadata_table() else {
        return invalid(format!("'{}' does not take metadata", schema.table()));
    };
    for entry in metadata {
        let row = Attributes::new()
            .with_id(schema.fk_column(), id)
            .with_text("key", &entry.key)
            .with_text("value", &entry.value_text())
            .with_text("type", entry.tag.as_str());
        insert_row(conn, metadata_table, &row)?;
    }
    Ok(())
}

/// Link `left_id` and `right_id` through a junction table.
pub(crate) fn insert_relation(
    conn: &Connection,
    junction: &EntitySchema,
    (left_column, left_id): (&str, i64),
    (right_column, right_id): (&str, i64),
) -> CatalogResult<i64> {
    let row = Attributes::new()
        .with_id(left_column, left_id)
        .with_id(right_column, right_id);
    insert_row(conn, junction.table(), &row)
}

/// Insert an entity row and its metadata as one transaction.
pub fn load_entity(
    db: &CatalogDb,
    schema: &EntitySchema,
    attributes: Attributes,
    metadata: &[MetadataEntry],
) -> CatalogResult<i64> {
    if attributes.is_empty() {
        return invalid(format!("no attributes to insert into '{}'", schema.table()));
    }
    require_free_metadata_keys(schema, &attributes, metadata)?;
    let id = db.transaction(|conn| insert_entity(conn, schema, &attributes, metadata))?;
    log::info!("Row loaded into '{}' with ID {id}", schema.table());
    Ok(id)
}

// ── Validation ─────────────────────────────────────────────────────────

pub(crate) fn require_text(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return invalid(format!("{field} must be a non-empty string"));
    }
    Ok(())
}

pub(crate) fn require_opt_text(field: &str, value: Option<&str>) -> CatalogResult<()> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}

pub(crate) fn require_id(field: &str, id: i64) -> CatalogResult<()> {
    if id <= 0 {
        return invalid(format!("{field} must be a positive integer"));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: f64) -> CatalogResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return invalid(format!("{field} must be a positive number"));
    }
    Ok(())
}

/// Reject metadata keys that name an id column of the entity's table.
///
/// A pivoted key overwrites the base cell of the same name, and the id and
/// foreign-key cells are what lookups and joins match on. Reserved are `id`,
/// the catalog entity's foreign keys, and any `*_id` column being inserted.
pub(crate) fn require_free_metadata_keys(
    schema: &EntitySchema,
    attributes: &Attributes,
    metadata: &[MetadataEntry],
) -> CatalogResult<()> {
    let catalog_keys = Entity::from_table(schema.table()).map_or(&[][..], Entity::key_columns);
    for entry in metadata {
        let key = entry.key.as_str();
        let reserved = key == "id"
            || catalog_keys.contains(&key)
            || (key.ends_with("_id") && attributes.columns().any(|c| c == key));
        if reserved {
            return invalid(format!(
                "Metadata key '{key}' names an id column of '{}'",
                schema.table()
            ));
        }
    }
    Ok(())
}

/// Reject repeated entries in a natural-key list.
pub(crate) fn require_distinct(field: &str, values: &[String]) -> CatalogResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    for v in values {
        require_text(field, v)?;
        if !seen.insert(v.as_str()) {
            return invalid(format!("{field} contains '{v}' more than once"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "write_test.rs"]
mod tests;
