//! Measurement loaders.
//!
//! UT and XCT measurements share the `measurements` table and differ only in
//! the metadata they record. Both link the measurement to the samples it
//! covers and may derive from a parent measurement named by file path.

use super::{
    insert_entity, insert_relation, require_distinct, require_free_metadata_keys, require_id,
    require_text, Attributes,
};
use crate::connection::CatalogDb;
use crate::error::{invalid, CatalogError, CatalogResult};
use crate::lookup::{find_id, find_ids_by_name};
use duckdb::Connection;
use lc_core::{Entity, FileInfo, MetadataEntry, MetadataValue, Relation, TypeTag};
use std::fmt;
use std::str::FromStr;

/// Fields common to every measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub file_path: String,
    pub measurementtype_id: i64,
    pub info: FileInfo,
    /// Samples covered by the measurement, by name.
    pub sample_names: Vec<String>,
    /// File path of the measurement this one was derived from.
    pub parent_measurement_path: Option<String>,
    /// How the parent was transformed; required with a parent.
    pub transformations: Option<String>,
    pub extra: Vec<MetadataEntry>,
}

/// Ultrasonic signal representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalType {
    Rf,
    Amplitude,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Rf => "RF",
            SignalType::Amplitude => "Amplitude",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RF" => Ok(SignalType::Rf),
            "Amplitude" => Ok(SignalType::Amplitude),
            other => Err(CatalogError::Validation(format!(
                "Signal type must be either 'RF' or 'Amplitude', got '{other}'"
            ))),
        }
    }
}

/// UT-specific acquisition settings.
#[derive(Debug, Clone, PartialEq)]
pub struct UtSettings {
    pub signal_type: SignalType,
    /// Volume axis order, three distinct labels such as `["z", "x", "y"]`.
    pub axes_order: Vec<String>,
}

/// XCT-specific reconstruction flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XctSettings {
    /// Volume is front-wall aligned.
    pub aligned: bool,
    pub equalized: bool,
}

pub fn load_ut_measurement(
    db: &CatalogDb,
    measurement: &NewMeasurement,
    ut: &UtSettings,
) -> CatalogResult<i64> {
    validate_measurement(measurement)?;
    if ut.axes_order.len() != 3 {
        return invalid("Axes order must contain exactly three axes");
    }
    require_distinct("Axes order", &ut.axes_order)?;

    let specific = vec![
        MetadataEntry::new("signal_type", ut.signal_type.as_str(), TypeTag::Str),
        MetadataEntry::new(
            "axes_order",
            MetadataValue::list(ut.axes_order.iter().cloned()),
            TypeTag::List,
        ),
    ];
    let id = load_measurement(db, measurement, specific)?;
    log::info!(
        "UT measurement from '{}' loaded with ID {id}",
        measurement.file_path
    );
    Ok(id)
}

pub fn load_xct_measurement(
    db: &CatalogDb,
    measurement: &NewMeasurement,
    xct: &XctSettings,
) -> CatalogResult<i64> {
    validate_measurement(measurement)?;

    let specific = vec![
        MetadataEntry::new("aligned", xct.aligned, TypeTag::Bool),
        MetadataEntry::new("equalized", xct.equalized, TypeTag::Bool),
    ];
    let id = load_measurement(db, measurement, specific)?;
    log::info!(
        "XCT measurement from '{}' loaded with ID {id}",
        measurement.file_path
    );
    Ok(id)
}

fn validate_measurement(m: &NewMeasurement) -> CatalogResult<()> {
    require_text("File path", &m.file_path)?;
    require_id("Measurement type ID", m.measurementtype_id)?;
    if m.info.height <= 0 || m.info.width <= 0 || m.info.depth <= 0 {
        return invalid("Height, width and depth must be positive integers");
    }
    require_text("Data type", &m.info.dtype)?;
    require_text("File type", &m.info.file_type)?;
    if m.sample_names.is_empty() {
        return invalid("Sample names must be a non-empty list");
    }
    require_distinct("Sample names", &m.sample_names)?;

    match (&m.parent_measurement_path, &m.transformations) {
        (Some(parent), transformations) => {
            require_text("Parent measurement path", parent)?;
            if parent == &m.file_path {
                return invalid("A measurement cannot be its own parent");
            }
            match transformations {
                Some(t) if !t.trim().is_empty() => Ok(()),
                _ => invalid(
                    "Transformations must be a non-empty string when a parent measurement is given",
                ),
            }
        }
        (None, Some(t)) => require_text("Transformations", t),
        (None, None) => Ok(()),
    }
}

fn load_measurement(
    db: &CatalogDb,
    m: &NewMeasurement,
    specific: Vec<MetadataEntry>,
) -> CatalogResult<i64> {
    let mut metadata = vec![
        MetadataEntry::new("height", m.info.height, TypeTag::Int),
        MetadataEntry::new("width", m.info.width, TypeTag::Int),
        MetadataEntry::new("depth", m.info.depth, TypeTag::Int),
        MetadataEntry::new("dtype", m.info.dtype.as_str(), TypeTag::Str),
        MetadataEntry::new("file_type", m.info.file_type.as_str(), TypeTag::Str),
    ];
    metadata.extend(specific);
    if let Some(t) = &m.transformations {
        metadata.push(MetadataEntry::new("transformations", t.as_str(), TypeTag::Str));
    }
    metadata.extend(m.extra.iter().cloned());

    let schema = Entity::Measurement.schema();
    require_free_metadata_keys(&schema, &Attributes::new(), &metadata)?;

    db.transaction(|conn| {
        let parent_id = match &m.parent_measurement_path {
            Some(path) => Some(measurement_id_by_path(conn, path)?),
            None => None,
        };

        let row = Attributes::new()
            .with_text("file_path", &m.file_path)
            .with_id("measurementtype_id", m.measurementtype_id)
            .with_opt_id("parent_measurement_id", parent_id);
        let id = insert_entity(conn, &schema, &row, &metadata)?;

        let sample_ids = find_ids_by_name(conn, &Entity::Sample.schema(), &m.sample_names)?;
        let junction = Relation::SampleMeasurements.schema();
        for sample_id in sample_ids {
            insert_relation(
                conn,
                &junction,
                ("sample_id", sample_id),
                ("measurement_id", id),
            )?;
        }
        Ok(id)
    })
}

/// Resolve a measurement by its file path.
pub(crate) fn measurement_id_by_path(conn: &Connection, path: &str) -> CatalogResult<i64> {
    let schema = Entity::Measurement.schema();
    let column = schema.suffixed("file_path");
    find_id(conn, &schema, &[column.as_str()], &[path])
}

#[cfg(test)]
#[path = "measurement_test.rs"]
mod tests;
