use super::*;

#[test]
fn test_singular_strips_one_trailing_s() {
    assert_eq!(singular("materials"), "material");
    assert_eq!(singular("measurementtypes"), "measurementtype");
    assert_eq!(singular("measurement_registrations"), "measurement_registration");
    assert_eq!(singular("ss"), "s");
}

#[test]
fn test_singular_without_trailing_s_is_unchanged() {
    assert_eq!(singular("data"), "data");
    assert_eq!(singular(""), "");
}

#[test]
fn test_metadata_table() {
    assert_eq!(metadata_table("panels"), "panel_metadata");
    assert_eq!(
        metadata_table("measurement_registrations"),
        "measurement_registration_metadata"
    );
}

#[test]
fn test_fk_column() {
    assert_eq!(fk_column("samples"), "sample_id");
    assert_eq!(fk_column("measurementtypes"), "measurementtype_id");
}

#[test]
fn test_suffixed() {
    assert_eq!(suffixed("name", "materials"), "name_material");
    assert_eq!(suffixed("id", "sample_measurements"), "id_sample_measurement");
    assert_eq!(suffix("datasets"), "_dataset");
}
