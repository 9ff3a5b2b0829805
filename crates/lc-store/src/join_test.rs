use super::*;
use crate::frame::Cell;
use crate::test_support::{inventory, material, measurement, panel, sample, ut, ut_settings};
use crate::write::load_ut_measurement;
use crate::CatalogDb;
use lc_core::{Entity, Relation};

fn texts(frame: &Frame, column: &str) -> Vec<String> {
    frame
        .column(column)
        .unwrap_or_else(|| panic!("missing column {column} in {:?}", frame.columns()))
        .into_iter()
        .map(|c| c.to_text().unwrap_or_default())
        .collect()
}

fn frame(columns: &[&str], rows: Vec<Vec<Cell>>) -> Frame {
    Frame::from_parts(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
}

// ── join_parent ────────────────────────────────────────────────────────

#[test]
fn join_parent_drops_fk_and_orphans() {
    let child = frame(
        &["id", "name", "panel_id"],
        vec![
            vec![Cell::Int(1), Cell::from("S1"), Cell::Int(10)],
            vec![Cell::Int(2), Cell::from("S2"), Cell::Int(99)],
            vec![Cell::Int(3), Cell::from("S3"), Cell::Null],
        ],
    );
    let parent = frame(&["id_p", "name"], vec![vec![Cell::Int(10), Cell::from("P1")]]);

    let merged = join_parent(&child, &parent, "panel_id", ("", "_p")).unwrap();
    assert_eq!(merged.columns(), &["id", "name", "id_p", "name_p"]);
    assert_eq!(merged.len(), 1);
    assert_eq!(texts(&merged, "name"), vec!["S1"]);
    assert_eq!(texts(&merged, "name_p"), vec!["P1"]);
}

// ── join_with_parent ───────────────────────────────────────────────────

#[test]
fn sample_joined_with_panel() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);

    let merged = join_with_parent(
        db.conn(),
        &Entity::Sample.schema(),
        &Entity::Panel.schema(),
        None,
    )
    .unwrap();
    assert_eq!(merged.len(), 2);
    assert!(!merged.has_column("panel_id_sample"));
    assert_eq!(texts(&merged, "name_sample"), vec!["S1", "S2"]);
    assert_eq!(texts(&merged, "name_panel"), vec!["P1", "P1"]);
    assert_eq!(merged.get(0, "id_panel"), Some(&Cell::Int(inv.panel)));
    assert_eq!(texts(&merged, "keyhole_sample")[0], "false bool");
    assert_eq!(texts(&merged, "edges_cutted_panel")[0], "true bool");
}

#[test]
fn self_join_through_parent_measurement() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);
    let parent = ut(&db, "/data/raw.tif", inv.measurementtype, &["S1"]);
    let mut child = measurement("/data/cropped.tif", inv.measurementtype, &["S1"]);
    child.parent_measurement_path = Some("/data/raw.tif".to_string());
    child.transformations = Some("crop".to_string());
    let child_id = load_ut_measurement(&db, &child, &ut_settings()).unwrap();

    let measurements = Entity::Measurement.schema();
    let link = ParentLink::with_fk(measurements.clone(), "parent_measurement_id");
    let merged = join_with_multiple_parents(db.conn(), &measurements, &[link]).unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.get(0, "id_measurement"), Some(&Cell::Int(child_id)));
    assert_eq!(
        merged.get(0, "id_measurement_parent_measurement"),
        Some(&Cell::Int(parent))
    );
    assert_eq!(
        texts(&merged, "file_path_measurement_parent_measurement"),
        vec!["/data/raw.tif"]
    );
    assert!(!merged.has_column("parent_measurement_id_measurement"));
}

#[test]
fn single_parent_self_join_suffixes_by_fk() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);
    ut(&db, "/data/raw.tif", inv.measurementtype, &["S1"]);
    let mut child = measurement("/data/cropped.tif", inv.measurementtype, &["S1"]);
    child.parent_measurement_path = Some("/data/raw.tif".to_string());
    child.transformations = Some("crop".to_string());
    load_ut_measurement(&db, &child, &ut_settings()).unwrap();

    let measurements = Entity::Measurement.schema();
    let merged = join_with_parent(
        db.conn(),
        &measurements,
        &measurements,
        Some("parent_measurement_id"),
    )
    .unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(
        texts(&merged, "file_path_measurement_measurement"),
        vec!["/data/cropped.tif"]
    );
    assert_eq!(
        texts(&merged, "file_path_measurement_parent_measurement"),
        vec!["/data/raw.tif"]
    );
    assert!(!merged.has_column("parent_measurement_id_measurement_measurement"));
}

#[test]
fn null_fk_on_every_row_joins_to_nothing() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);
    ut(&db, "/data/raw.tif", inv.measurementtype, &["S1"]);

    let measurements = Entity::Measurement.schema();
    let link = ParentLink::with_fk(measurements.clone(), "parent_measurement_id");
    let folded = join_with_multiple_parents(db.conn(), &measurements, &[link]).unwrap();
    assert!(folded.is_empty());

    let single = join_with_parent(
        db.conn(),
        &measurements,
        &measurements,
        Some("parent_measurement_id"),
    )
    .unwrap();
    assert!(single.is_empty());
}

#[test]
fn parent_link_suffix_follows_fk() {
    let measurements = Entity::Measurement.schema();
    assert_eq!(ParentLink::new(measurements.clone()).suffix(), "_measurement");
    assert_eq!(
        ParentLink::with_fk(measurements.clone(), "measurement_id").suffix(),
        "_measurement"
    );
    assert_eq!(
        ParentLink::with_fk(measurements, "registered_measurement_id").suffix(),
        "_registered_measurement"
    );
}

// ── join_with_multiple_parents ─────────────────────────────────────────

#[test]
fn panel_joined_with_material_and_fabrication() {
    let db = CatalogDb::open_memory().unwrap();
    inventory(&db);

    let merged = join_with_multiple_parents(
        db.conn(),
        &Entity::Panel.schema(),
        &[
            ParentLink::new(Entity::Material.schema()),
            ParentLink::new(Entity::Fabrication.schema()),
        ],
    )
    .unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(texts(&merged, "name_panel"), vec!["P1"]);
    assert_eq!(texts(&merged, "name_material"), vec!["CFRP-01"]);
    assert_eq!(texts(&merged, "name_fabrication"), vec!["autoclave"]);
    assert!(!merged.has_column("material_id_panel"));
    assert!(!merged.has_column("fabrication_id_panel"));
}

#[test]
fn parent_without_metadata_still_joins() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);
    let other_material = material(&db, "GFRP-02");
    panel(&db, "P2", other_material, inv.fabrication);
    db.conn()
        .execute("DELETE FROM material_metadata WHERE material_id = ?", [other_material])
        .unwrap();

    let merged = join_with_multiple_parents(
        db.conn(),
        &Entity::Panel.schema(),
        &[ParentLink::new(Entity::Material.schema())],
    )
    .unwrap();
    assert_eq!(texts(&merged, "name_panel"), vec!["P1", "P2"]);
}

#[test]
fn no_parents_returns_entity() {
    let db = CatalogDb::open_memory().unwrap();
    inventory(&db);

    let merged = join_with_multiple_parents(db.conn(), &Entity::Sample.schema(), &[]).unwrap();
    let direct =
        crate::read::read_entity_with_metadata(db.conn(), &Entity::Sample.schema()).unwrap();
    assert_eq!(merged, direct);
}

// ── join_many_to_many ──────────────────────────────────────────────────

#[test]
fn samples_with_measurements_fan_out() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);
    ut(&db, "/data/scan1.tif", inv.measurementtype, &["S1", "S2"]);
    ut(&db, "/data/scan2.tif", inv.measurementtype, &["S1"]);

    let merged = join_many_to_many(
        db.conn(),
        &Entity::Sample.schema(),
        &Entity::Measurement.schema(),
        &Relation::SampleMeasurements.schema(),
    )
    .unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(texts(&merged, "name_sample"), vec!["S1", "S1", "S2"]);
    assert_eq!(
        texts(&merged, "file_path_measurement"),
        vec!["/data/scan1.tif", "/data/scan2.tif", "/data/scan1.tif"]
    );
    assert!(merged
        .columns()
        .iter()
        .all(|c| !c.ends_with("_sample_measurement")));
}

#[test]
fn many_to_many_skips_unlinked_rows() {
    let db = CatalogDb::open_memory().unwrap();
    let inv = inventory(&db);
    sample(&db, "S3", inv.panel);
    ut(&db, "/data/scan1.tif", inv.measurementtype, &["S2"]);

    let merged = join_many_to_many(
        db.conn(),
        &Entity::Sample.schema(),
        &Entity::Measurement.schema(),
        &Relation::SampleMeasurements.schema(),
    )
    .unwrap();
    assert_eq!(texts(&merged, "name_sample"), vec!["S2"]);
}

#[test]
fn many_to_many_empty_junction() {
    let db = CatalogDb::open_memory().unwrap();
    inventory(&db);

    let err = join_many_to_many(
        db.conn(),
        &Entity::Dataset.schema(),
        &Entity::Measurement.schema(),
        &Relation::DatasetMeasurements.schema(),
    )
    .unwrap_err();
    match err {
        CatalogError::EmptyRelation { table } => assert_eq!(table, "dataset_measurements"),
        other => panic!("expected EmptyRelation, got {other:?}"),
    }
}
