use crate::error::ServiceError;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs
};
use async_openai::types::responses::ResponseFormat;
use async_trait::async_trait;
use config::Config;
use notes::CompletionService;
use std::time::Duration;

/// JSON-mode chat completions through `async-openai`.
pub struct OpenAiCompletionService {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration
}

impl OpenAiCompletionService {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.trim_end_matches('/'));
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            timeout: Duration::from_secs(60)
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let api_key = config
            .openai
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ServiceError::MissingApiKey)?;
        Ok(Self::new(
            api_key,
            &config.openai.base_url,
            &config.openai.completion_model
        )
        .with_timeout(Duration::from_secs(config.openai.timeout_seconds)))
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    type Error = ServiceError;

    async fn complete_json(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user)
                    .build()?
                    .into()
            ])
            .response_format(ResponseFormat::JsonObject)
            .build()?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| ServiceError::Timeout {
                seconds: self.timeout.as_secs()
            })??;
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ServiceError::EmptyCompletion {
                model: self.model.clone()
            })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
