use super::CompletionService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A request the mock received, kept for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub system: String,
    pub user: String
}

/// In-memory completion backend.
///
/// Responses are handed out in the order they were queued. Once the queue is
/// empty the fallback is returned, or an error if there is none.
#[derive(Clone, Default)]
pub struct MockCompletionService {
    responses: Arc<RwLock<VecDeque<Result<String, String>>>>,
    fallback: Arc<RwLock<Option<String>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>
}

impl MockCompletionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that answers every request with the same body.
    pub async fn always(body: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_fallback(body).await;
        mock
    }

    pub async fn push_response(&self, body: impl Into<String>) {
        self.responses.write().await.push_back(Ok(body.into()));
    }

    pub async fn push_failure(&self, message: impl Into<String>) {
        self.responses.write().await.push_back(Err(message.into()));
    }

    pub async fn set_fallback(&self, body: impl Into<String>) {
        *self.fallback.write().await = Some(body.into());
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    type Error = String;

    async fn complete_json(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        self.requests.write().await.push(RecordedRequest {
            system: system.to_string(),
            user: user.to_string()
        });

        if let Some(next) = self.responses.write().await.pop_front() {
            return next;
        }
        self.fallback
            .read()
            .await
            .clone()
            .ok_or_else(|| "no mock response queued".to_string())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
