//! # Configuration System
//!
//! Centralized configuration for the studynotes pipeline.
//!
//! This crate provides:
//! - Configuration structures for every pipeline stage
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (env > file > defaults)
//! - Configuration validation
//!
//! A [`Config`] is loaded once per process and handed to whatever needs it;
//! nothing here keeps global state.

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    AssistantConfig, Config, ObservabilityConfig, OpenAiConfig, PathsConfig, PollingConfig,
    QnaConfig
};
pub use file_loader::{ConfigFileError, discover, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{EnvError, load_from_env};
pub use precedence::merge_configs;
pub use validation::validate;
pub use validator::Validate;

use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SN_CONFIG";

/// Errors raised while assembling the effective configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    File(#[from] ConfigFileError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors)
}

/// Assemble the effective configuration for a working directory.
///
/// Defaults are overlaid with the discovered config file (if any) and then
/// with the environment; the result is validated before it is returned.
pub fn load(dir: &Path) -> Result<Config, ConfigError> {
    let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let file_config = match discover(dir, explicit.as_deref()) {
        Some(path) => {
            tracing::debug!("Loading configuration file {}", path.display());
            Some(load_from_file(&path)?)
        }
        None => None
    };

    let env_config = load_from_env()?;
    let config = merge_configs(Config::default(), file_config, "file", env_config, "env");

    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
            std::env::remove_var("SN_NOTES_FILE");
        }

        let config = load(dir.path()).unwrap();
        assert_eq!(config.paths.notes_file, "exam_notes.json");
    }

    #[test]
    #[serial]
    fn test_load_reads_discovered_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("studynotes.toml"),
            "[paths]\nnotes_file = \"revision.json\"\n"
        )
        .unwrap();
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
            std::env::remove_var("SN_NOTES_FILE");
        }

        let config = load(dir.path()).unwrap();
        assert_eq!(config.paths.notes_file, "revision.json");
    }

    #[test]
    #[serial]
    fn test_load_rejects_invalid_result() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("studynotes.toml"),
            "[observability]\nlogging_level = \"loud\"\n"
        )
        .unwrap();
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
            std::env::remove_var("SN_LOG_LEVEL");
        }

        let result = load(dir.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
