//! Tests for loading settings files.

use puzzleville::Settings;
use std::io::Write;

fn settings_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_settings() {
    let file = settings_file(
        r#"
starting_level = 2
show_route = false
show_hints = false

[engine]
refund_replaced_tiles = true
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(*settings.starting_level(), 2);
    assert!(!*settings.show_route());
    assert!(!*settings.show_hints());
    assert!(settings.engine().refund_replaced_tiles);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = settings_file("");
    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read settings file"));
}

#[test]
fn test_malformed_toml() {
    let file = settings_file("starting_level = \"two\"");
    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse settings"));
    assert!(err.file.ends_with(".rs"));
}

#[test]
fn test_level_zero_rejected() {
    let file = settings_file("starting_level = 0");
    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("starting_level counts from 1"));
}
