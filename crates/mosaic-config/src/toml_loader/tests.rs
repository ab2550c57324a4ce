//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_mosaic_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        mosaic_common::ConfigError::FileNotFound(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[panes]
title = "work"
width = 1000

[process]
close_timeout_ms = 5000
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.panes.title, "work");
    assert_eq!(config.panes.width, 1000);
    assert_eq!(config.process.close_timeout_ms, 5000);
    // Defaults preserved
    assert_eq!(config.panes.height, 600);
    assert_eq!(config.workspace.width, 1920);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, mosaic_common::ConfigError::ParseError(_)));
}

#[test]
fn invalid_values_fall_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[workspace]
cell_width = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.workspace.cell_width, 8);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mosaic").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.panes.title, "Terminal");
    assert_eq!(config.interaction.frame_interval_ms, 16);
}

#[test]
fn default_config_path_ends_with_config_toml() {
    if std::env::var_os(CONFIG_PATH_ENV).is_some() {
        return;
    }
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("mosaic/config.toml"));
    }
}

#[test]
fn default_config_template_parses_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.toml");
    create_default_config(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("# Mosaic Configuration"));
    let parsed: crate::MosaicConfig = toml::from_str(&raw).unwrap();
    assert!(crate::validation::validate(&parsed).is_ok());
}
