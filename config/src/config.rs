//! # Configuration Structures
//!
//! This module defines all configuration structures for the studynotes
//! pipeline.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation
//! - Fall back to a sensible default for every field

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main configuration structure for the studynotes pipeline.
///
/// ## Fields
/// - `openai`: Credentials, endpoint and model selection
/// - `assistant`: How the hosted assistant and its corpus are provisioned
/// - `paths`: Local files shared between the pipeline stages
/// - `polling`: Bounds on waiting for a remote run to finish
/// - `qna`: Seed questions for the interactive stage
/// - `observability`: Logging configuration
///
/// ## Validation
/// All nested configurations must pass their own validation rules.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    /// OpenAI endpoint, credentials and models
    #[serde(default)]
    #[validate(nested)]
    pub openai: OpenAiConfig,

    /// Assistant provisioning settings
    #[serde(default)]
    #[validate(nested)]
    pub assistant: AssistantConfig,

    /// Local state files
    #[serde(default)]
    #[validate(nested)]
    pub paths: PathsConfig,

    /// Run polling policy
    #[serde(default)]
    #[validate(nested)]
    pub polling: PollingConfig,

    /// Question-and-answer settings
    #[serde(default)]
    pub qna: QnaConfig,

    /// Logging configuration
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig
}

/// OpenAI connection settings.
///
/// ## Fields
/// - `api_key`: Secret key (optional here; the remote stages require it)
/// - `base_url`: API root (default: "https://api.openai.com/v1")
/// - `assistant_model`: Model backing the assistant (default: "gpt-4o-mini")
/// - `completion_model`: Model used to structure notes (default:
///   "gpt-4o-mini")
/// - `timeout_seconds`: Per-request timeout (default: 60, range: 1-600)
#[derive(Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct OpenAiConfig {
    /// Secret API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// API root URL
    #[serde(default = "default_openai_base_url")]
    #[validate(custom(function = "validate_base_url"))]
    pub base_url: String,

    /// Model backing the hosted assistant
    #[serde(default = "default_openai_model")]
    #[validate(length(min = 1, max = 128))]
    pub assistant_model: String,

    /// Model used for the structured notes completion
    #[serde(default = "default_openai_model")]
    #[validate(length(min = 1, max = 128))]
    pub completion_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_openai_timeout")]
    #[validate(range(min = 1, max = 600))]
    pub timeout_seconds: u64
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn validate_base_url(value: &str) -> Result<(), validator::ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(validator::ValidationError::new("base_url must be an http(s) URL"))
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_timeout() -> u64 {
    60
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            assistant_model: default_openai_model(),
            completion_model: default_openai_model(),
            timeout_seconds: default_openai_timeout()
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("assistant_model", &self.assistant_model)
            .field("completion_model", &self.completion_model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Hosted assistant provisioning settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct AssistantConfig {
    /// Display name of the assistant
    #[serde(default = "default_assistant_name")]
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    /// System instructions given to the assistant
    #[serde(default = "default_assistant_instructions")]
    #[validate(length(min = 1))]
    pub instructions: String,

    /// Name of the vector store holding the corpus
    #[serde(default = "default_vector_store_name")]
    #[validate(length(min = 1, max = 256))]
    pub vector_store_name: String,

    /// Document uploaded as the assistant's corpus
    #[serde(default = "default_corpus_path")]
    #[validate(length(min = 1))]
    pub corpus_path: String
}

fn default_assistant_name() -> String {
    "Study Q&A Assistant".to_string()
}

fn default_assistant_instructions() -> String {
    "You are a helpful tutor. Use the knowledge in the attached files to answer questions. \
     Cite sources where possible."
        .to_string()
}

fn default_vector_store_name() -> String {
    "Study Materials".to_string()
}

fn default_corpus_path() -> String {
    "data/calculus_basics.pdf".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            instructions: default_assistant_instructions(),
            vector_store_name: default_vector_store_name(),
            corpus_path: default_corpus_path()
        }
    }
}

/// Local files shared between stages.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PathsConfig {
    /// File holding the provisioned assistant id
    #[serde(default = "default_assistant_id_file")]
    #[validate(length(min = 1))]
    pub assistant_id_file: String,

    /// File the generated notes are written to
    #[serde(default = "default_notes_file")]
    #[validate(length(min = 1))]
    pub notes_file: String
}

fn default_assistant_id_file() -> String {
    "assistant_id.txt".to_string()
}

fn default_notes_file() -> String {
    "exam_notes.json".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            assistant_id_file: default_assistant_id_file(),
            notes_file: default_notes_file()
        }
    }
}

/// Bounds on polling a remote run until it reaches a terminal state.
///
/// ## Fields
/// - `max_attempts`: Status checks before giving up (default: 120, range:
///   1-10000)
/// - `initial_interval_ms`: Delay before the second check (default: 500)
/// - `max_interval_ms`: Upper bound for the delay (default: 5000)
/// - `multiplier`: Exponential growth factor (default: 2.0, range: 1.0-10.0)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_polling_intervals"))]
pub struct PollingConfig {
    #[serde(default = "default_polling_max_attempts")]
    #[validate(range(min = 1, max = 10000))]
    pub max_attempts: u32,

    #[serde(default = "default_polling_initial_interval")]
    #[validate(range(min = 1, max = 60000))]
    pub initial_interval_ms: u64,

    #[serde(default = "default_polling_max_interval")]
    #[validate(range(min = 1, max = 300000))]
    pub max_interval_ms: u64,

    #[serde(default = "default_polling_multiplier")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub multiplier: f64
}

fn default_polling_max_attempts() -> u32 {
    120
}

fn default_polling_initial_interval() -> u64 {
    500
}

fn default_polling_max_interval() -> u64 {
    5000
}

fn default_polling_multiplier() -> f64 {
    2.0
}

fn validate_polling_intervals(value: &PollingConfig) -> Result<(), validator::ValidationError> {
    if value.initial_interval_ms > value.max_interval_ms {
        return Err(validator::ValidationError::new(
            "initial_interval_ms exceeds max_interval_ms"
        ));
    }
    Ok(())
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_polling_max_attempts(),
            initial_interval_ms: default_polling_initial_interval(),
            max_interval_ms: default_polling_max_interval(),
            multiplier: default_polling_multiplier()
        }
    }
}

/// Seed questions asked before the interactive loop starts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct QnaConfig {
    #[serde(default)]
    pub questions: Vec<String>
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    /// Logging level
    #[serde(default = "default_observability_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String
}

fn default_observability_logging_level() -> String {
    "info".to_string()
}

fn validate_logging_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level"))
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging_level: default_observability_logging_level()
        }
    }
}
