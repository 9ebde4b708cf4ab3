//! # Configuration Validation
//!
//! Provides validation for all configuration structures using the `validator` crate.

use crate::config::Config;
use validator::Validate;

/// Validate configuration structure.
///
/// ## Validation Rules
/// ### OpenAI
/// - `base_url`: must start with `http://` or `https://`
/// - `assistant_model`, `completion_model`: 1-128 characters
/// - `timeout_seconds`: 1-600
///
/// ### Assistant
/// - `name`, `vector_store_name`: 1-256 characters
/// - `instructions`, `corpus_path`: non-empty
///
/// ### Paths
/// - `assistant_id_file`, `notes_file`: non-empty
///
/// ### Polling
/// - `max_attempts`: 1-10000
/// - `multiplier`: 1.0-10.0
/// - `initial_interval_ms` must not exceed `max_interval_ms`
///
/// ### Observability
/// - `logging_level`: must be "trace", "debug", "info", "warn", or "error"
pub fn validate(config: &Config) -> Result<(), validator::ValidationErrors> {
    config.validate()
}
