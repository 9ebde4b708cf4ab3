//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `OPENAI_*`: The variables the OpenAI tooling already understands
//! - `SN_*`: Everything specific to studynotes

use crate::config::{
    AssistantConfig, Config, ObservabilityConfig, OpenAiConfig, PathsConfig, PollingConfig,
    QnaConfig
};
use std::env;

/// Environment variable held a value that does not parse.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key}: {value:?} ({reason})")]
pub struct EnvError {
    pub key: String,
    pub value: String,
    pub reason: String
}

/// Load configuration from environment variables.
///
/// Unset variables keep their default. A variable that is set but does not
/// parse is an error rather than being silently ignored.
///
/// ## Environment Variables
/// ### OpenAI
/// - `OPENAI_API_KEY`: Secret key
/// - `OPENAI_BASE_URL`: API root (default: "https://api.openai.com/v1")
/// - `SN_ASSISTANT_MODEL`: Assistant model (default: "gpt-4o-mini")
/// - `SN_COMPLETION_MODEL`: Notes completion model (default: "gpt-4o-mini")
/// - `SN_TIMEOUT_SECONDS`: Request timeout (default: 60)
///
/// ### Assistant
/// - `SN_ASSISTANT_NAME`: Assistant display name
/// - `SN_VECTOR_STORE_NAME`: Vector store name
/// - `SN_CORPUS_PATH`: Document to upload (default: "data/calculus_basics.pdf")
///
/// ### Paths
/// - `SN_ASSISTANT_ID_FILE`: Assistant id file (default: "assistant_id.txt")
/// - `SN_NOTES_FILE`: Notes output (default: "exam_notes.json")
///
/// ### Polling
/// - `SN_POLL_MAX_ATTEMPTS`, `SN_POLL_INITIAL_MS`, `SN_POLL_MAX_MS`,
///   `SN_POLL_MULTIPLIER`
///
/// ### Observability
/// - `SN_LOG_LEVEL`: Logging level (trace/debug/info/warn/error)
pub fn load_from_env() -> Result<Config, EnvError> {
    Ok(Config {
        openai: load_openai_from_env()?,
        assistant: load_assistant_from_env(),
        paths: load_paths_from_env(),
        polling: load_polling_from_env()?,
        qna: QnaConfig::default(),
        observability: load_observability_from_env()
    })
}

fn load_openai_from_env() -> Result<OpenAiConfig, EnvError> {
    let defaults = OpenAiConfig::default();
    Ok(OpenAiConfig {
        api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
        base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
        assistant_model: env::var("SN_ASSISTANT_MODEL").unwrap_or(defaults.assistant_model),
        completion_model: env::var("SN_COMPLETION_MODEL").unwrap_or(defaults.completion_model),
        timeout_seconds: parse_env("SN_TIMEOUT_SECONDS")?.unwrap_or(defaults.timeout_seconds)
    })
}

fn load_assistant_from_env() -> AssistantConfig {
    let defaults = AssistantConfig::default();
    AssistantConfig {
        name: env::var("SN_ASSISTANT_NAME").unwrap_or(defaults.name),
        instructions: defaults.instructions,
        vector_store_name: env::var("SN_VECTOR_STORE_NAME").unwrap_or(defaults.vector_store_name),
        corpus_path: env::var("SN_CORPUS_PATH").unwrap_or(defaults.corpus_path)
    }
}

fn load_paths_from_env() -> PathsConfig {
    let defaults = PathsConfig::default();
    PathsConfig {
        assistant_id_file: env::var("SN_ASSISTANT_ID_FILE").unwrap_or(defaults.assistant_id_file),
        notes_file: env::var("SN_NOTES_FILE").unwrap_or(defaults.notes_file)
    }
}

fn load_polling_from_env() -> Result<PollingConfig, EnvError> {
    let defaults = PollingConfig::default();
    Ok(PollingConfig {
        max_attempts: parse_env("SN_POLL_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts),
        initial_interval_ms: parse_env("SN_POLL_INITIAL_MS")?
            .unwrap_or(defaults.initial_interval_ms),
        max_interval_ms: parse_env("SN_POLL_MAX_MS")?.unwrap_or(defaults.max_interval_ms),
        multiplier: parse_env("SN_POLL_MULTIPLIER")?.unwrap_or(defaults.multiplier)
    })
}

fn load_observability_from_env() -> ObservabilityConfig {
    ObservabilityConfig {
        logging_level: env::var("SN_LOG_LEVEL")
            .unwrap_or_else(|_| ObservabilityConfig::default().logging_level)
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(s) => s.trim().parse::<T>().map(Some).map_err(|e| EnvError {
            key: key.to_string(),
            value: s.clone(),
            reason: e.to_string()
        }),
        Err(_) => Ok(None)
    }
}
