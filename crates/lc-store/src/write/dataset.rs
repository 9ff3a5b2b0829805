//! Loaders for derived records: datasets grouping measurements, and
//! pairwise registrations between two measurements.

use super::measurement::measurement_id_by_path;
use super::{
    insert_entity, insert_relation, require_distinct, require_free_metadata_keys,
    require_opt_text, require_text, Attributes,
};
use crate::connection::CatalogDb;
use crate::error::{invalid, CatalogResult};
use lc_core::{Entity, MetadataEntry, MetadataValue, Relation, TypeTag};

/// A named group of measurements with one or more learning targets.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    pub name: String,
    pub description: Option<String>,
    /// Member measurements, by file path.
    pub measurement_paths: Vec<String>,
    /// Each target becomes its own `target` metadata row.
    pub targets: Vec<String>,
    pub extra: Vec<MetadataEntry>,
}

/// A rigid or affine registration of one measurement onto another.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub reference_file_path: String,
    pub registered_file_path: String,
    /// Homogeneous 2D transform, row-major.
    pub transform: [[f64; 3]; 3],
    pub method: String,
    pub extra: Vec<MetadataEntry>,
}

pub fn load_dataset(db: &CatalogDb, dataset: &NewDataset) -> CatalogResult<i64> {
    require_text("Dataset name", &dataset.name)?;
    require_opt_text("Description", dataset.description.as_deref())?;
    if dataset.measurement_paths.is_empty() {
        return invalid("Measurement paths must be a non-empty list");
    }
    require_distinct("Measurement paths", &dataset.measurement_paths)?;
    if dataset.targets.is_empty() {
        return invalid("Targets must be a non-empty list");
    }
    for target in &dataset.targets {
        require_text("Target", target)?;
    }

    let mut metadata: Vec<MetadataEntry> = dataset
        .targets
        .iter()
        .map(|t| MetadataEntry::new("target", t.as_str(), TypeTag::Str))
        .collect();
    metadata.extend(dataset.extra.iter().cloned());

    let schema = Entity::Dataset.schema();
    let row = Attributes::new()
        .with_text("name", &dataset.name)
        .with_opt_text("description", dataset.description.as_deref());
    require_free_metadata_keys(&schema, &row, &metadata)?;

    let id = db.transaction(|conn| {
        let id = insert_entity(conn, &schema, &row, &metadata)?;
        let junction = Relation::DatasetMeasurements.schema();
        for path in &dataset.measurement_paths {
            let measurement_id = measurement_id_by_path(conn, path)?;
            insert_relation(
                conn,
                &junction,
                ("dataset_id", id),
                ("measurement_id", measurement_id),
            )?;
        }
        Ok(id)
    })?;
    log::info!("Dataset '{}' loaded with ID {id}", dataset.name);
    Ok(id)
}

pub fn load_registration(db: &CatalogDb, registration: &NewRegistration) -> CatalogResult<i64> {
    require_text("Reference file path", &registration.reference_file_path)?;
    require_text("Registered file path", &registration.registered_file_path)?;
    if registration.reference_file_path == registration.registered_file_path {
        return invalid("Reference and registered measurements must differ");
    }
    if registration.transform.iter().flatten().any(|v| !v.is_finite()) {
        return invalid("Transform must contain only finite numbers");
    }
    require_text("Registration method", &registration.method)?;

    let matrix = MetadataValue::list(
        registration
            .transform
            .iter()
            .map(|row| MetadataValue::list(row.iter().copied())),
    );
    let mut metadata = vec![
        MetadataEntry::new("transform", matrix, TypeTag::Matrix),
        MetadataEntry::new("method", registration.method.as_str(), TypeTag::Str),
    ];
    metadata.extend(registration.extra.iter().cloned());

    let schema = Entity::Registration.schema();
    require_free_metadata_keys(&schema, &Attributes::new(), &metadata)?;
    let id = db.transaction(|conn| {
        let reference_id = measurement_id_by_path(conn, &registration.reference_file_path)?;
        let registered_id = measurement_id_by_path(conn, &registration.registered_file_path)?;
        let row = Attributes::new()
            .with_id("reference_measurement_id", reference_id)
            .with_id("registered_measurement_id", registered_id);
        insert_entity(conn, &schema, &row, &metadata)
    })?;
    log::info!(
        "Registration of '{}' onto '{}' loaded with ID {id}",
        registration.registered_file_path,
        registration.reference_file_path
    );
    Ok(id)
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
