use super::*;
use crate::error::CatalogError;
use crate::read::read_entity_with_metadata;
use crate::test_support::{count, material, panel};
use lc_core::{Entity, MetadataEntry, TypeTag};

fn metadata_of(db: &CatalogDb, table: &str, fk: &str, id: i64) -> Vec<(String, String, String)> {
    let sql = format!(
        r#"SELECT "key", "value", "type" FROM {table} WHERE {fk} = ? ORDER BY id"#
    );
    let mut stmt = db.conn().prepare(&sql).unwrap();
    let rows = stmt
        .query_map([id], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    rows
}

fn entry(key: &str, value: &str, tag: &str) -> (String, String, String) {
    (key.to_string(), value.to_string(), tag.to_string())
}

fn new_panel(material_id: i64, fabrication_id: i64) -> NewPanel {
    NewPanel {
        name: "P1".to_string(),
        material_id,
        fabrication_id,
        height: 300.0,
        width: 250.0,
        thickness: 4.5,
        edges_cutted: false,
        layer_layout: Some(vec![0, 90, 0]),
        description: Some("first layup".to_string()),
        extra: vec![],
    }
}

// ── Materials ──────────────────────────────────────────────────────────

#[test]
fn material_with_extra_metadata() {
    let db = CatalogDb::open_memory().unwrap();
    let id = load_material(
        &db,
        &NewMaterial {
            name: "CFRP-01".to_string(),
            layer_thickness: 2.5,
            extra: vec![MetadataEntry::new(
                "color",
                "black",
                TypeTag::Custom("string".to_string()),
            )],
        },
    )
    .unwrap();
    assert_eq!(id, 1);

    let frame = read_entity_with_metadata(db.conn(), &Entity::Material.schema()).unwrap();
    assert_eq!(frame.len(), 1);
    assert_eq!(
        frame.get(0, "name_material").and_then(|c| c.to_text()),
        Some("CFRP-01".to_string())
    );
    assert_eq!(
        frame.get(0, "layer_thickness_material").and_then(|c| c.to_text()),
        Some("2.5 float".to_string())
    );
    assert_eq!(
        frame.get(0, "color_material").and_then(|c| c.to_text()),
        Some("black string".to_string())
    );
}

#[test]
fn material_rejects_bad_input() {
    let db = CatalogDb::open_memory().unwrap();
    for (name, thickness) in [("", 0.2), ("CFRP-01", 0.0), ("CFRP-01", -1.0)] {
        let err = load_material(
            &db,
            &NewMaterial {
                name: name.to_string(),
                layer_thickness: thickness,
                extra: vec![],
            },
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "got {err:?}");
    }
    assert_eq!(count(&db, "SELECT COUNT(*) FROM materials"), 0);
}

// ── Fabrications & measurement types ───────────────────────────────────

#[test]
fn named_entities() {
    let db = CatalogDb::open_memory().unwrap();
    let fab = load_fabrication(
        &db,
        "autoclave",
        &[MetadataEntry::new("pressure", 7.0, TypeTag::Float)],
    )
    .unwrap();
    let mt = load_measurementtype(&db, "XCT", &[]).unwrap();

    assert_eq!(
        metadata_of(&db, "fabrication_metadata", "fabrication_id", fab),
        vec![entry("pressure", "7.0", "float")]
    );
    assert!(metadata_of(&db, "measurementtype_metadata", "measurementtype_id", mt).is_empty());
    assert!(matches!(
        load_fabrication(&db, " ", &[]),
        Err(CatalogError::Validation(m)) if m.contains("Fabrication name")
    ));
}

#[test]
fn metadata_key_id_refused_before_insert() {
    let db = CatalogDb::open_memory().unwrap();
    let extra = [MetadataEntry::from_caller("id", "abc", "str").unwrap()];

    let err = load_fabrication(&db, "Press-X", &extra).unwrap_err();
    match err {
        CatalogError::Validation(msg) => assert!(msg.contains("'id'"), "{msg}"),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(count(&db, "SELECT COUNT(*) FROM fabrications"), 0);

    let id = load_fabrication(&db, "Press-X", &[]).unwrap();
    let found = crate::lookup::find_id(
        db.conn(),
        &Entity::Fabrication.schema(),
        &["name_fabrication"],
        &["Press-X"],
    )
    .unwrap();
    assert_eq!(found, id);
}

// ── Panels ─────────────────────────────────────────────────────────────

#[test]
fn panel_records_dimensions_and_layout() {
    let db = CatalogDb::open_memory().unwrap();
    let m = material(&db, "CFRP-01");
    let f = load_fabrication(&db, "autoclave", &[]).unwrap();
    let id = load_panel(&db, &new_panel(m, f)).unwrap();

    assert_eq!(
        metadata_of(&db, "panel_metadata", "panel_id", id),
        vec![
            entry("height", "300.0", "mm"),
            entry("width", "250.0", "mm"),
            entry("thickness", "4.5", "mm"),
            entry("edges_cutted", "false", "bool"),
            entry("layer_layout", "[0,90,0]", "list"),
        ]
    );
    let description: String = db
        .conn()
        .query_row("SELECT description FROM panels WHERE id = ?", [id], |r| r.get(0))
        .unwrap();
    assert_eq!(description, "first layup");
}

#[test]
fn panel_without_layout() {
    let db = CatalogDb::open_memory().unwrap();
    let m = material(&db, "CFRP-01");
    let f = load_fabrication(&db, "autoclave", &[]).unwrap();
    let id = panel(&db, "P2", m, f);
    let keys: Vec<String> = metadata_of(&db, "panel_metadata", "panel_id", id)
        .into_iter()
        .map(|(k, _, _)| k)
        .collect();
    assert!(!keys.contains(&"layer_layout".to_string()));
}

#[test]
fn panel_rejects_bad_input() {
    let db = CatalogDb::open_memory().unwrap();
    let m = material(&db, "CFRP-01");
    let f = load_fabrication(&db, "autoclave", &[]).unwrap();

    let cases: [fn(&mut NewPanel); 6] = [
        |p| p.name = String::new(),
        |p| p.material_id = 0,
        |p| p.fabrication_id = -3,
        |p| p.width = 0.0,
        |p| p.layer_layout = Some(vec![]),
        |p| p.description = Some("  ".to_string()),
    ];
    for mutate in cases {
        let mut p = new_panel(m, f);
        mutate(&mut p);
        let err = load_panel(&db, &p).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "got {err:?}");
    }
    assert_eq!(count(&db, "SELECT COUNT(*) FROM panels"), 0);
}

#[test]
fn panel_with_unknown_material_rolls_back() {
    let db = CatalogDb::open_memory().unwrap();
    let f = load_fabrication(&db, "autoclave", &[]).unwrap();

    let err = load_panel(&db, &new_panel(42, f)).unwrap_err();
    assert!(matches!(err, CatalogError::Insert { .. }), "got {err:?}");
    assert_eq!(count(&db, "SELECT COUNT(*) FROM panels"), 0);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM panel_metadata"), 0);
}

#[test]
fn panel_metadata_cannot_shadow_foreign_keys() {
    let db = CatalogDb::open_memory().unwrap();
    let m = material(&db, "CFRP-01");
    let f = load_fabrication(&db, "autoclave", &[]).unwrap();
    let mut p = new_panel(m, f);
    p.extra = vec![MetadataEntry::new("material_id", "7", TypeTag::Int)];

    assert!(matches!(load_panel(&db, &p), Err(CatalogError::Validation(_))));
    assert_eq!(count(&db, "SELECT COUNT(*) FROM panels"), 0);

    // A display column may still be overridden.
    p.extra = vec![MetadataEntry::new("name", "P1-renamed", TypeTag::Str)];
    load_panel(&db, &p).unwrap();
}

// ── Samples ────────────────────────────────────────────────────────────

#[test]
fn sample_records_flags() {
    let db = CatalogDb::open_memory().unwrap();
    let m = material(&db, "CFRP-01");
    let f = load_fabrication(&db, "autoclave", &[]).unwrap();
    let p = panel(&db, "P1", m, f);

    let id = load_sample(
        &db,
        &NewSample {
            name: "S1".to_string(),
            panel_id: p,
            height: 50.0,
            width: 25.0,
            thickness: 4.5,
            keyhole: true,
            parallel_faces: false,
            description: None,
            extra: vec![MetadataEntry::new("operator", "jd", TypeTag::Str)],
        },
    )
    .unwrap();

    assert_eq!(
        metadata_of(&db, "sample_metadata", "sample_id", id),
        vec![
            entry("height", "50.0", "mm"),
            entry("width", "25.0", "mm"),
            entry("thickness", "4.5", "mm"),
            entry("keyhole", "true", "bool"),
            entry("parallel_faces", "false", "bool"),
            entry("operator", "jd", "str"),
        ]
    );
}

#[test]
fn sample_rejects_non_finite_dimension() {
    let db = CatalogDb::open_memory().unwrap();
    let err = load_sample(
        &db,
        &NewSample {
            name: "S1".to_string(),
            panel_id: 1,
            height: f64::NAN,
            width: 25.0,
            thickness: 4.5,
            keyhole: false,
            parallel_faces: true,
            description: None,
            extra: vec![],
        },
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(m) if m.contains("Height")));
}
