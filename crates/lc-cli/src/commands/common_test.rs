use super::*;
use lc_core::{MetadataValue, TypeTag};
use lc_store::Cell;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_metadata_default_and_explicit_type() {
    let entries = parse_metadata(&strings(&["color=black", "layers:int=12", "note:string=a=b:c"]))
        .unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].key, "color");
    assert_eq!(entries[0].value, MetadataValue::Text("black".to_string()));
    assert_eq!(entries[0].tag, TypeTag::Str);
    assert_eq!(entries[1].tag, TypeTag::Int);
    assert_eq!(entries[2].tag, TypeTag::Custom("string".to_string()));
    assert_eq!(entries[2].value_text(), "a=b:c");
}

#[test]
fn test_parse_metadata_rejects_missing_value() {
    assert!(parse_metadata(&strings(&["color"])).is_err());
    assert!(parse_metadata(&strings(&["=black"])).is_err());
}

#[test]
fn test_parse_criteria() {
    let (keys, values) =
        parse_criteria(&strings(&["file_path_measurement=/data/a=b.tif", " name_sample =S1"]))
            .unwrap();
    assert_eq!(keys, vec!["file_path_measurement", "name_sample"]);
    assert_eq!(values, vec!["/data/a=b.tif", "S1"]);
    assert!(parse_criteria(&strings(&["name_sample"])).is_err());
}

#[test]
fn test_parse_parent() {
    let link = parse_parent("measurements:reference_measurement_id").unwrap();
    assert_eq!(link.parent.table().as_str(), "measurements");
    assert_eq!(link.fk_base.as_deref(), Some("reference_measurement_id"));

    let link = parse_parent("materials").unwrap();
    assert!(link.fk_base.is_none());

    assert!(parse_parent("materials:").is_err());
    assert!(parse_parent("bad table").is_err());
}

#[test]
fn test_parse_transform() {
    let m = parse_transform("1,0,12.5; 0,1,-3 ;0,0,1").unwrap();
    assert_eq!(m[0], [1.0, 0.0, 12.5]);
    assert_eq!(m[1][2], -3.0);
    assert!(parse_transform("1,0,0;0,1,0").is_err());
    assert!(parse_transform("1,0;0,1,0;0,0,1").is_err());
    assert!(parse_transform("1,0,x;0,1,0;0,0,1").is_err());
}

#[test]
fn test_calculate_column_widths() {
    let widths = calculate_column_widths(
        &["id", "name"],
        &[strings(&["1", "CFRP-01"]), strings(&["10", "é"])],
    );
    assert_eq!(widths, vec![2, 7]);
}

#[test]
fn test_frame_rows_render_nulls() {
    let frame = Frame::from_parts(
        strings(&["id_sample", "description_sample"]),
        vec![vec![Cell::Int(1), Cell::Null]],
    )
    .unwrap();
    assert_eq!(frame_rows(&frame), vec![strings(&["1", "null"])]);
}

#[test]
fn test_resolve_name() {
    let db = CatalogDb::open_memory().unwrap();
    let id = lc_store::write::load_fabrication(&db, "autoclave", &[]).unwrap();
    assert_eq!(resolve_name(&db, Entity::Fabrication, "autoclave").unwrap(), id);
    let err = resolve_name(&db, Entity::Fabrication, "press").unwrap_err();
    assert!(format!("{err:#}").contains("press"));
}
