//! Mosaic configuration system.
//!
//! TOML-based configuration with validation. All sections use sensible
//! defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{MosaicConfig, CONFIG_SCHEMA_VERSION};

use mosaic_common::ConfigError;
use std::path::Path;

/// Load config from an explicit path, or from the platform default path
/// when none is given (creating a default file there if needed).
pub fn load_config(path: Option<&Path>) -> Result<MosaicConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[panes]\ntitle = \"dev\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.panes.title, "dev");
    }

    #[test]
    fn load_config_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
