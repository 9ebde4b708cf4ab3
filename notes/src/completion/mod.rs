//! The seam between note generation and whatever model produces the JSON.

use async_trait::async_trait;
use std::fmt::Display;

pub mod mock;

pub use mock::MockCompletionService;

/// A chat-completion backend that answers in JSON mode.
#[async_trait]
pub trait CompletionService: Send + Sync {
    type Error: Display + Send + Sync + 'static;

    /// Sends a system and a user message and returns the raw response body,
    /// which the caller expects to be a single JSON document.
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, Self::Error>;

    /// Name used when reporting failures from this backend.
    fn provider_name(&self) -> &str;
}
