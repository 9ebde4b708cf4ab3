#![allow(deprecated)]

use crate::run::RunStatus;
use async_openai::error::OpenAIError;
use async_openai::types::assistants::{RunObject, RunObjectIncompleteDetailsReason};
use errors::GenerationError;
use thiserror::Error;

/// Failures talking to the OpenAI API.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("OpenAI API error: {0}")]
    Api(#[from] OpenAIError),

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Run {run_id} ended with status {status}: {reason}")]
    RunFailed {
        run_id: String,
        status: RunStatus,
        reason: String
    },

    #[error("Run {run_id} still {status} after {attempts} polls")]
    PollTimeout {
        run_id: String,
        status: RunStatus,
        attempts: u32
    },

    #[error("Event stream error: {0}")]
    Stream(String),

    #[error("No response from OpenAI within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Thread {thread_id} has no assistant reply")]
    EmptyAnswer { thread_id: String },

    #[error("Completion from {model} had no content")]
    EmptyCompletion { model: String },

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey
}

impl ServiceError {
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        ServiceError::Io {
            path: path.display().to_string(),
            reason: err.to_string()
        }
    }

    /// A run that stopped without completing, with the service's reason.
    pub fn run_ended(run: &RunObject) -> Self {
        let reason = match (&run.last_error, &run.incomplete_details) {
            (Some(error), _) => error.message.clone(),
            (None, Some(details)) => match details.reason {
                RunObjectIncompleteDetailsReason::MaxCompletionTokens => {
                    "max_completion_tokens reached".to_string()
                }
                RunObjectIncompleteDetailsReason::MaxPromptTokens => "max_prompt_tokens reached".to_string()
            },
            (None, None) => "no error details".to_string()
        };
        ServiceError::RunFailed {
            run_id: run.id.clone(),
            status: RunStatus::from(&run.status),
            reason
        }
    }

    /// True when the API reported that the resource does not exist.
    ///
    /// The client does not surface status codes, so this matches the
    /// `invalid_request_error` messages OpenAI sends with a 404.
    pub fn is_not_found(&self) -> bool {
        let ServiceError::Api(OpenAIError::ApiError(api)) = self else {
            return false;
        };
        api.message.starts_with("No such ") || api.message.contains(" found with id")
    }
}

impl From<ServiceError> for GenerationError {
    fn from(err: ServiceError) -> Self {
        GenerationError::external("openai", err)
    }
}
