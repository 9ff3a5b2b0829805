//! Fixtures shared by the store's unit tests.

use crate::write::{
    load_fabrication, load_material, load_measurementtype, load_panel, load_sample,
    load_ut_measurement, NewMaterial, NewMeasurement, NewPanel, NewSample, SignalType,
    UtSettings,
};
use crate::CatalogDb;
use lc_core::FileInfo;

/// Query a single i64 value (convenience for COUNT(*) assertions).
pub(crate) fn count(db: &CatalogDb, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

pub(crate) fn material(db: &CatalogDb, name: &str) -> i64 {
    load_material(
        db,
        &NewMaterial {
            name: name.to_string(),
            layer_thickness: 0.25,
            extra: vec![],
        },
    )
    .unwrap()
}

pub(crate) fn panel(db: &CatalogDb, name: &str, material_id: i64, fabrication_id: i64) -> i64 {
    load_panel(
        db,
        &NewPanel {
            name: name.to_string(),
            material_id,
            fabrication_id,
            height: 300.0,
            width: 300.0,
            thickness: 4.5,
            edges_cutted: true,
            layer_layout: None,
            description: None,
            extra: vec![],
        },
    )
    .unwrap()
}

pub(crate) fn sample(db: &CatalogDb, name: &str, panel_id: i64) -> i64 {
    load_sample(
        db,
        &NewSample {
            name: name.to_string(),
            panel_id,
            height: 50.0,
            width: 25.0,
            thickness: 4.5,
            keyhole: false,
            parallel_faces: true,
            description: None,
            extra: vec![],
        },
    )
    .unwrap()
}

pub(crate) fn file_info() -> FileInfo {
    FileInfo {
        height: 512,
        width: 512,
        depth: 300,
        dtype: "uint16".to_string(),
        file_type: ".tif".to_string(),
    }
}

pub(crate) fn measurement(
    file_path: &str,
    measurementtype_id: i64,
    samples: &[&str],
) -> NewMeasurement {
    NewMeasurement {
        file_path: file_path.to_string(),
        measurementtype_id,
        info: file_info(),
        sample_names: samples.iter().map(|s| s.to_string()).collect(),
        parent_measurement_path: None,
        transformations: None,
        extra: vec![],
    }
}

pub(crate) fn ut_settings() -> UtSettings {
    UtSettings {
        signal_type: SignalType::Amplitude,
        axes_order: vec!["z".to_string(), "x".to_string(), "y".to_string()],
    }
}

/// Ids of a small inventory: one material, fabrication, panel, measurement
/// type, and samples `S1` and `S2` cut from the panel.
pub(crate) struct Inventory {
    pub material: i64,
    pub fabrication: i64,
    pub panel: i64,
    pub samples: [i64; 2],
    pub measurementtype: i64,
}

pub(crate) fn inventory(db: &CatalogDb) -> Inventory {
    let material = material(db, "CFRP-01");
    let fabrication = load_fabrication(db, "autoclave", &[]).unwrap();
    let panel = panel(db, "P1", material, fabrication);
    let samples = [sample(db, "S1", panel), sample(db, "S2", panel)];
    let measurementtype = load_measurementtype(db, "UT pulse-echo", &[]).unwrap();
    Inventory {
        material,
        fabrication,
        panel,
        samples,
        measurementtype,
    }
}

/// Load a UT measurement of `samples` at `file_path`.
pub(crate) fn ut(db: &CatalogDb, file_path: &str, measurementtype_id: i64, samples: &[&str]) -> i64 {
    load_ut_measurement(
        db,
        &measurement(file_path, measurementtype_id, samples),
        &ut_settings(),
    )
    .unwrap()
}
