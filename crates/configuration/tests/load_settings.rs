use configuration::{TableOptions, load_settings_from};
use std::fs;

#[test]
fn file_settings_layer_onto_table_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reporting.toml");
    fs::write(
        &path,
        "[table]\nwith_total = true\n\n[periods]\niso_weeks = true\n",
    )
    .unwrap();

    let name = dir.path().join("reporting");
    let settings = load_settings_from(name.to_str().unwrap()).unwrap();

    let options = TableOptions::default().merged(&settings.table);
    assert!(options.with_total);
    assert!(options.with_data);
    assert!(settings.periods.iso_weeks);
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let name = dir.path().join("absent");
    let settings = load_settings_from(name.to_str().unwrap()).unwrap();
    assert_eq!(settings.logging.level, "info");
}
