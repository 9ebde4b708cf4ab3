//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. Environment variables (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)

use crate::config::{
    AssistantConfig, Config, ObservabilityConfig, OpenAiConfig, PathsConfig, PollingConfig
};
use std::fmt::Debug;

/// Merge configuration sources with precedence.
///
/// A field from a higher-priority source replaces the current value only when
/// it differs from the built-in default, so a source that merely carries
/// defaults for fields it never set cannot clobber a lower-priority value.
/// Seed questions are replaced wholesale when the override provides any.
pub fn merge_configs(
    defaults: Config,
    file_config: Option<Config>,
    file_source_name: &str,
    env_config: Config,
    env_source_name: &str
) -> Config {
    let mut config = defaults;

    if let Some(file) = file_config {
        config = merge_with_logging(config, file, file_source_name);
    }
    merge_with_logging(config, env_config, env_source_name)
}

fn merge_with_logging(mut base: Config, override_config: Config, source_name: &str) -> Config {
    let defaults = Config::default();
    let mut changes = Vec::new();

    merge_openai(
        &mut base.openai,
        &override_config.openai,
        &defaults.openai,
        &mut changes
    );
    merge_assistant(
        &mut base.assistant,
        &override_config.assistant,
        &defaults.assistant,
        &mut changes
    );
    merge_paths(
        &mut base.paths,
        &override_config.paths,
        &defaults.paths,
        &mut changes
    );
    merge_polling(
        &mut base.polling,
        &override_config.polling,
        &defaults.polling,
        &mut changes
    );
    merge_observability(
        &mut base.observability,
        &override_config.observability,
        &defaults.observability,
        &mut changes
    );

    if !override_config.qna.questions.is_empty() && override_config.qna != base.qna {
        changes.push(format!(
            "qna.questions = [{} questions]",
            override_config.qna.questions.len()
        ));
        base.qna = override_config.qna;
    }

    if !changes.is_empty() {
        tracing::debug!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn take<T>(
    name: &str,
    base: &mut T,
    override_value: &T,
    default: &T,
    changes: &mut Vec<String>
) where
    T: PartialEq + Clone + Debug,
{
    if override_value != default && override_value != base {
        changes.push(format!("{name} = {override_value:?}"));
        base.clone_from(override_value);
    }
}

fn merge_openai(
    base: &mut OpenAiConfig,
    over: &OpenAiConfig,
    default: &OpenAiConfig,
    changes: &mut Vec<String>
) {
    if over.api_key.is_some() && over.api_key != base.api_key {
        changes.push("openai.api_key = ***".to_string());
        base.api_key.clone_from(&over.api_key);
    }
    take(
        "openai.base_url",
        &mut base.base_url,
        &over.base_url,
        &default.base_url,
        changes
    );
    take(
        "openai.assistant_model",
        &mut base.assistant_model,
        &over.assistant_model,
        &default.assistant_model,
        changes
    );
    take(
        "openai.completion_model",
        &mut base.completion_model,
        &over.completion_model,
        &default.completion_model,
        changes
    );
    take(
        "openai.timeout_seconds",
        &mut base.timeout_seconds,
        &over.timeout_seconds,
        &default.timeout_seconds,
        changes
    );
}

fn merge_assistant(
    base: &mut AssistantConfig,
    over: &AssistantConfig,
    default: &AssistantConfig,
    changes: &mut Vec<String>
) {
    take(
        "assistant.name",
        &mut base.name,
        &over.name,
        &default.name,
        changes
    );
    take(
        "assistant.instructions",
        &mut base.instructions,
        &over.instructions,
        &default.instructions,
        changes
    );
    take(
        "assistant.vector_store_name",
        &mut base.vector_store_name,
        &over.vector_store_name,
        &default.vector_store_name,
        changes
    );
    take(
        "assistant.corpus_path",
        &mut base.corpus_path,
        &over.corpus_path,
        &default.corpus_path,
        changes
    );
}

fn merge_paths(
    base: &mut PathsConfig,
    over: &PathsConfig,
    default: &PathsConfig,
    changes: &mut Vec<String>
) {
    take(
        "paths.assistant_id_file",
        &mut base.assistant_id_file,
        &over.assistant_id_file,
        &default.assistant_id_file,
        changes
    );
    take(
        "paths.notes_file",
        &mut base.notes_file,
        &over.notes_file,
        &default.notes_file,
        changes
    );
}

fn merge_polling(
    base: &mut PollingConfig,
    over: &PollingConfig,
    default: &PollingConfig,
    changes: &mut Vec<String>
) {
    take(
        "polling.max_attempts",
        &mut base.max_attempts,
        &over.max_attempts,
        &default.max_attempts,
        changes
    );
    take(
        "polling.initial_interval_ms",
        &mut base.initial_interval_ms,
        &over.initial_interval_ms,
        &default.initial_interval_ms,
        changes
    );
    take(
        "polling.max_interval_ms",
        &mut base.max_interval_ms,
        &over.max_interval_ms,
        &default.max_interval_ms,
        changes
    );
    take(
        "polling.multiplier",
        &mut base.multiplier,
        &over.multiplier,
        &default.multiplier,
        changes
    );
}

fn merge_observability(
    base: &mut ObservabilityConfig,
    over: &ObservabilityConfig,
    default: &ObservabilityConfig,
    changes: &mut Vec<String>
) {
    take(
        "observability.logging_level",
        &mut base.logging_level,
        &over.logging_level,
        &default.logging_level,
        changes
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_file() {
        let mut file = Config::default();
        file.paths.notes_file = "file.json".to_string();
        file.openai.completion_model = "gpt-4o".to_string();

        let mut env = Config::default();
        env.paths.notes_file = "env.json".to_string();

        let merged = merge_configs(Config::default(), Some(file), "file", env, "env");
        assert_eq!(merged.paths.notes_file, "env.json");
        assert_eq!(merged.openai.completion_model, "gpt-4o");
    }

    #[test]
    fn test_default_valued_env_does_not_clobber_file() {
        let mut file = Config::default();
        file.polling.max_attempts = 5;

        let merged = merge_configs(Config::default(), Some(file), "file", Config::default(), "env");
        assert_eq!(merged.polling.max_attempts, 5);
    }

    #[test]
    fn test_api_key_only_from_sources_that_set_it() {
        let mut file = Config::default();
        file.openai.api_key = Some("sk-file".to_string());

        let merged = merge_configs(Config::default(), Some(file), "file", Config::default(), "env");
        assert_eq!(merged.openai.api_key.as_deref(), Some("sk-file"));

        let mut env = Config::default();
        env.openai.api_key = Some("sk-env".to_string());
        let merged = merge_configs(Config::default(), None, "file", env, "env");
        assert_eq!(merged.openai.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_questions_from_file_survive() {
        let mut file = Config::default();
        file.qna.questions = vec!["What is a limit?".to_string()];

        let merged = merge_configs(Config::default(), Some(file), "file", Config::default(), "env");
        assert_eq!(merged.qna.questions, vec!["What is a limit?"]);
    }
}
