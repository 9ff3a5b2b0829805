//! Entity schema descriptors.
//!
//! An [`EntitySchema`] carries every name derived from a plural table name
//! (singular, metadata table, foreign-key column), computed once through
//! [`crate::naming`] instead of re-sliced at each call site. [`Entity`] and
//! [`Relation`] enumerate the tables the catalog ships with.

use crate::error::CoreResult;
use crate::naming;
use crate::table_name::TableName;
use std::fmt;

/// Names derived from one plural table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntitySchema {
    table: TableName,
    singular: String,
    metadata_table: Option<String>,
    fk_column: String,
}

impl EntitySchema {
    /// Descriptor for an entity table that has a `<singular>_metadata`
    /// companion.
    pub fn new(table: TableName) -> Self {
        let metadata_table = Some(naming::metadata_table(&table));
        Self::build(table, metadata_table)
    }

    /// Descriptor for a table without metadata, such as a junction table.
    pub fn without_metadata(table: TableName) -> Self {
        Self::build(table, None)
    }

    /// Validate an ad-hoc plural table name and describe it, assuming it has
    /// a metadata table.
    pub fn parse(table: &str) -> CoreResult<Self> {
        Ok(Self::new(TableName::parse(table)?))
    }

    fn build(table: TableName, metadata_table: Option<String>) -> Self {
        let singular = naming::singular(&table).to_string();
        let fk_column = naming::fk_column(&table);
        Self {
            table,
            singular,
            metadata_table,
            fk_column,
        }
    }

    /// Plural table name.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Singular form used for suffixes and derived names.
    pub fn singular(&self) -> &str {
        &self.singular
    }

    /// Metadata table name, if this table has one.
    pub fn metadata_table(&self) -> Option<&str> {
        self.metadata_table.as_deref()
    }

    /// Column naming this table from a child or junction table.
    pub fn fk_column(&self) -> &str {
        &self.fk_column
    }

    /// `_<singular>`.
    pub fn suffix(&self) -> String {
        naming::suffix(&self.table)
    }

    /// `column` as it appears after this table has been read.
    pub fn suffixed(&self, column: &str) -> String {
        naming::suffixed(column, &self.table)
    }

    /// The suffixed surrogate key column (`id_<singular>`).
    pub fn id_column(&self) -> String {
        self.suffixed("id")
    }
}

impl fmt::Display for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table)
    }
}

/// The catalog's entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// `materials`
    Material,
    /// `fabrications`
    Fabrication,
    /// `panels`
    Panel,
    /// `samples`
    Sample,
    /// `measurementtypes`
    MeasurementType,
    /// `measurements`
    Measurement,
    /// `datasets`
    Dataset,
    /// `measurement_registrations`
    Registration,
}

impl Entity {
    /// Every entity, parents before children.
    pub const ALL: [Entity; 8] = [
        Entity::Material,
        Entity::Fabrication,
        Entity::Panel,
        Entity::Sample,
        Entity::MeasurementType,
        Entity::Measurement,
        Entity::Dataset,
        Entity::Registration,
    ];

    /// Plural table name.
    pub fn table(self) -> &'static str {
        match self {
            Entity::Material => "materials",
            Entity::Fabrication => "fabrications",
            Entity::Panel => "panels",
            Entity::Sample => "samples",
            Entity::MeasurementType => "measurementtypes",
            Entity::Measurement => "measurements",
            Entity::Dataset => "datasets",
            Entity::Registration => "measurement_registrations",
        }
    }

    /// Schema descriptor for this entity.
    pub fn schema(self) -> EntitySchema {
        EntitySchema::new(TableName::from_static(self.table()))
    }

    /// `(table, column)` pairs holding foreign keys to this entity, metadata
    /// tables excluded.
    pub fn referenced_by(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Entity::Material => &[("panels", "material_id")],
            Entity::Fabrication => &[("panels", "fabrication_id")],
            Entity::Panel => &[("samples", "panel_id")],
            Entity::Sample => &[("sample_measurements", "sample_id")],
            Entity::MeasurementType => &[("measurements", "measurementtype_id")],
            Entity::Measurement => &[
                ("sample_measurements", "measurement_id"),
                ("dataset_measurements", "measurement_id"),
                ("measurement_registrations", "reference_measurement_id"),
                ("measurement_registrations", "registered_measurement_id"),
            ],
            Entity::Dataset => &[("dataset_measurements", "dataset_id")],
            Entity::Registration => &[],
        }
    }

    /// Columns of this entity's table that hold ids: `id` and its outbound
    /// foreign keys.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            Entity::Material | Entity::Fabrication | Entity::MeasurementType | Entity::Dataset => {
                &["id"]
            }
            Entity::Panel => &["id", "material_id", "fabrication_id"],
            Entity::Sample => &["id", "panel_id"],
            Entity::Measurement => &["id", "measurementtype_id", "parent_measurement_id"],
            Entity::Registration => &[
                "id",
                "reference_measurement_id",
                "registered_measurement_id",
            ],
        }
    }

    /// Look up an entity by its plural table name.
    pub fn from_table(table: &str) -> Option<Entity> {
        Self::ALL.into_iter().find(|e| e.table() == table)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// The catalog's many-to-many junction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `sample_measurements`: samples covered by a measurement.
    SampleMeasurements,
    /// `dataset_measurements`: measurements grouped into a dataset.
    DatasetMeasurements,
}

impl Relation {
    /// Every junction table.
    pub const ALL: [Relation; 2] = [Relation::SampleMeasurements, Relation::DatasetMeasurements];

    /// Junction table name.
    pub fn table(self) -> &'static str {
        match self {
            Relation::SampleMeasurements => "sample_measurements",
            Relation::DatasetMeasurements => "dataset_measurements",
        }
    }

    /// Schema descriptor for the junction table.
    pub fn schema(self) -> EntitySchema {
        EntitySchema::without_metadata(TableName::from_static(self.table()))
    }

    /// Look up a junction by table name.
    pub fn from_table(table: &str) -> Option<Relation> {
        Self::ALL.into_iter().find(|r| r.table() == table)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Resolve a table name to a descriptor, preferring the built-in catalog
/// tables so junction tables are known to lack metadata.
pub fn schema_for(table: &str) -> CoreResult<EntitySchema> {
    if let Some(entity) = Entity::from_table(table) {
        return Ok(entity.schema());
    }
    if let Some(relation) = Relation::from_table(table) {
        return Ok(relation.schema());
    }
    EntitySchema::parse(table)
}

#[cfg(test)]
#[path = "entity_test.rs"]
mod tests;
