//! Loaders for the physical inventory: materials, fabrication methods,
//! measurement types, panels, and samples.

use super::{
    insert_entity, require_free_metadata_keys, require_id, require_opt_text, require_positive,
    require_text, Attributes,
};
use crate::connection::CatalogDb;
use crate::error::{invalid, CatalogResult};
use lc_core::{Entity, MetadataEntry, MetadataValue, TypeTag};

/// A material and its layer thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterial {
    pub name: String,
    pub layer_thickness: f64,
    pub extra: Vec<MetadataEntry>,
}

/// A panel cut from one material by one fabrication method.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPanel {
    pub name: String,
    pub material_id: i64,
    pub fabrication_id: i64,
    pub height: f64,
    pub width: f64,
    pub thickness: f64,
    pub edges_cutted: bool,
    /// Ply orientations, outermost first.
    pub layer_layout: Option<Vec<i64>>,
    pub description: Option<String>,
    pub extra: Vec<MetadataEntry>,
}

/// A sample taken from a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSample {
    pub name: String,
    pub panel_id: i64,
    pub height: f64,
    pub width: f64,
    pub thickness: f64,
    pub keyhole: bool,
    pub parallel_faces: bool,
    pub description: Option<String>,
    pub extra: Vec<MetadataEntry>,
}

pub fn load_fabrication(db: &CatalogDb, name: &str, extra: &[MetadataEntry]) -> CatalogResult<i64> {
    load_named(db, Entity::Fabrication, "Fabrication", name, extra)
}

pub fn load_measurementtype(
    db: &CatalogDb,
    name: &str,
    extra: &[MetadataEntry],
) -> CatalogResult<i64> {
    load_named(db, Entity::MeasurementType, "Measurement type", name, extra)
}

pub fn load_material(db: &CatalogDb, material: &NewMaterial) -> CatalogResult<i64> {
    require_text("Material name", &material.name)?;
    require_positive("Layer thickness", material.layer_thickness)?;

    let mut metadata = vec![MetadataEntry::new(
        "layer_thickness",
        material.layer_thickness,
        TypeTag::Float,
    )];
    metadata.extend(material.extra.iter().cloned());

    let schema = Entity::Material.schema();
    let row = Attributes::new().with_text("name", &material.name);
    require_free_metadata_keys(&schema, &row, &metadata)?;
    let id = db.transaction(|conn| insert_entity(conn, &schema, &row, &metadata))?;
    log::info!("Material '{}' loaded with ID {id}", material.name);
    Ok(id)
}

pub fn load_panel(db: &CatalogDb, panel: &NewPanel) -> CatalogResult<i64> {
    require_text("Panel name", &panel.name)?;
    require_id("Material ID", panel.material_id)?;
    require_id("Fabrication ID", panel.fabrication_id)?;
    require_dimensions(panel.height, panel.width, panel.thickness)?;
    require_opt_text("Description", panel.description.as_deref())?;
    if let Some(layout) = &panel.layer_layout {
        if layout.is_empty() {
            return invalid("Layer layout must be a non-empty list of integers");
        }
    }

    let mut metadata = dimension_metadata(panel.height, panel.width, panel.thickness);
    metadata.push(MetadataEntry::new("edges_cutted", panel.edges_cutted, TypeTag::Bool));
    if let Some(layout) = &panel.layer_layout {
        metadata.push(MetadataEntry::new(
            "layer_layout",
            MetadataValue::list(layout.iter().copied()),
            TypeTag::List,
        ));
    }
    metadata.extend(panel.extra.iter().cloned());

    let schema = Entity::Panel.schema();
    let row = Attributes::new()
        .with_text("name", &panel.name)
        .with_id("material_id", panel.material_id)
        .with_id("fabrication_id", panel.fabrication_id)
        .with_opt_text("description", panel.description.as_deref());
    require_free_metadata_keys(&schema, &row, &metadata)?;
    let id = db.transaction(|conn| insert_entity(conn, &schema, &row, &metadata))?;
    log::info!("Panel '{}' loaded with ID {id}", panel.name);
    Ok(id)
}

pub fn load_sample(db: &CatalogDb, sample: &NewSample) -> CatalogResult<i64> {
    require_text("Sample name", &sample.name)?;
    require_id("Panel ID", sample.panel_id)?;
    require_dimensions(sample.height, sample.width, sample.thickness)?;
    require_opt_text("Description", sample.description.as_deref())?;

    let mut metadata = dimension_metadata(sample.height, sample.width, sample.thickness);
    metadata.push(MetadataEntry::new("keyhole", sample.keyhole, TypeTag::Bool));
    metadata.push(MetadataEntry::new(
        "parallel_faces",
        sample.parallel_faces,
        TypeTag::Bool,
    ));
    metadata.extend(sample.extra.iter().cloned());

    let schema = Entity::Sample.schema();
    let row = Attributes::new()
        .with_text("name", &sample.name)
        .with_id("panel_id", sample.panel_id)
        .with_opt_text("description", sample.description.as_deref());
    require_free_metadata_keys(&schema, &row, &metadata)?;
    let id = db.transaction(|conn| insert_entity(conn, &schema, &row, &metadata))?;
    log::info!("Sample '{}' loaded with ID {id}", sample.name);
    Ok(id)
}

fn load_named(
    db: &CatalogDb,
    entity: Entity,
    label: &str,
    name: &str,
    extra: &[MetadataEntry],
) -> CatalogResult<i64> {
    require_text(&format!("{label} name"), name)?;
    let schema = entity.schema();
    let row = Attributes::new().with_text("name", name);
    require_free_metadata_keys(&schema, &row, extra)?;
    let id = db.transaction(|conn| insert_entity(conn, &schema, &row, extra))?;
    log::info!("{label} '{name}' loaded with ID {id}");
    Ok(id)
}

fn require_dimensions(height: f64, width: f64, thickness: f64) -> CatalogResult<()> {
    require_positive("Height", height)?;
    require_positive("Width", width)?;
    require_positive("Thickness", thickness)
}

fn dimension_metadata(height: f64, width: f64, thickness: f64) -> Vec<MetadataEntry> {
    vec![
        MetadataEntry::new("height", height, TypeTag::Millimetres),
        MetadataEntry::new("width", width, TypeTag::Millimetres),
        MetadataEntry::new("thickness", thickness, TypeTag::Millimetres),
    ]
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
