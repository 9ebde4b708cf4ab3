#![allow(deprecated)]

use crate::error::ServiceError;
use crate::message::{self, Citations};
use crate::poll::PollPolicy;
use crate::run::RunStatus;
use async_openai::Client;
use async_openai::config::{OPENAI_BETA_HEADER, OpenAIConfig};
use async_openai::error::{OpenAIError, StreamError};
use async_openai::traits::RequestOptionsBuilder;
use async_openai::types::assistants::{
    AssistantObject, AssistantStreamEvent, AssistantToolFileSearchResources, AssistantToolResources,
    AssistantTools, AssistantToolsFileSearch, CreateAssistantRequestArgs, CreateMessageRequestArgs,
    CreateRunRequestArgs, CreateThreadRequest, DeleteAssistantResponse, MessageObject, MessageRole,
    ModifyAssistantRequestArgs, RunObject, ThreadObject
};
use async_openai::types::files::{
    CreateFileRequestArgs, DeleteFileResponse, FilePurpose, ListFilesQueryArgs, OpenAIFile
};
use async_openai::types::vectorstores::{
    CreateVectorStoreFileRequestArgs, CreateVectorStoreRequestArgs, DeleteVectorStoreResponse,
    VectorStoreFileObject, VectorStoreObject
};
use config::Config;
use futures_util::StreamExt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const BETA_VALUE: &str = "assistants=v2";

/// Purpose tag for files used by assistants.
pub const FILE_PURPOSE: &str = "assistants";

/// Settings for a new assistant.
#[derive(Debug, Clone)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String
}

impl From<&Config> for AssistantSpec {
    fn from(config: &Config) -> Self {
        Self {
            name: config.assistant.name.clone(),
            instructions: config.assistant.instructions.clone(),
            model: config.openai.assistant_model.clone()
        }
    }
}

/// A streamed answer together with the latest message's citations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub citations: Citations
}

/// Vector stores attached to an assistant through `file_search`.
pub fn vector_store_ids(assistant: &AssistantObject) -> &[String] {
    assistant
        .tool_resources
        .as_ref()
        .and_then(|resources| resources.file_search.as_ref())
        .map(|search| search.vector_store_ids.as_slice())
        .unwrap_or_default()
}

/// Client for the OpenAI Assistants v2 API.
///
/// Every call is awaited to completion before the next one is issued; the
/// client holds no per-conversation state. Each request, and each gap
/// between streamed events, is bounded by the configured timeout.
pub struct AssistantClient {
    client: Client<OpenAIConfig>,
    poll: PollPolicy,
    timeout: Duration
}

impl AssistantClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ServiceError> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.trim_end_matches('/'))
            .with_header(OPENAI_BETA_HEADER, BETA_VALUE)?;
        Ok(Self {
            client: Client::with_config(config),
            poll: PollPolicy::default(),
            timeout: Duration::from_secs(60)
        })
    }

    /// Builds a client from the effective configuration.
    ///
    /// Fails with `MissingApiKey` when no key was configured.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let api_key = config
            .openai
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ServiceError::MissingApiKey)?;

        Ok(Self::new(api_key, &config.openai.base_url)?
            .with_poll_policy(PollPolicy::from(&config.polling))
            .with_timeout(Duration::from_secs(config.openai.timeout_seconds)))
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, OpenAIError>>
    ) -> Result<T, ServiceError> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ServiceError::Timeout {
                seconds: self.timeout.as_secs()
            })?
            .map_err(ServiceError::from)
    }

    pub async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantObject, ServiceError> {
        debug!("Creating assistant {}", spec.name);
        let request = CreateAssistantRequestArgs::default()
            .name(spec.name.as_str())
            .instructions(spec.instructions.as_str())
            .model(spec.model.as_str())
            .tools(vec![AssistantTools::FileSearch(AssistantToolsFileSearch::default())])
            .build()?;

        let assistant = self.bounded(self.client.assistants().create(request)).await?;
        info!("Assistant created with ID: {}", assistant.id);
        Ok(assistant)
    }

    pub async fn retrieve_assistant(&self, assistant_id: &str) -> Result<AssistantObject, ServiceError> {
        self.bounded(self.client.assistants().retrieve(assistant_id))
            .await
    }

    /// Points the assistant's `file_search` tool at a vector store.
    pub async fn attach_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str
    ) -> Result<AssistantObject, ServiceError> {
        let request = ModifyAssistantRequestArgs::default()
            .tool_resources(AssistantToolResources {
                code_interpreter: None,
                file_search: Some(AssistantToolFileSearchResources {
                    vector_store_ids: vec![vector_store_id.to_string()]
                })
            })
            .build()?;
        self.bounded(self.client.assistants().update(assistant_id, request))
            .await
    }

    pub async fn delete_assistant(&self, assistant_id: &str) -> Result<DeleteAssistantResponse, ServiceError> {
        self.bounded(self.client.assistants().delete(assistant_id))
            .await
    }

    /// Uploads a local file with purpose `assistants`.
    pub async fn upload_file(&self, path: &Path) -> Result<OpenAIFile, ServiceError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ServiceError::io(path, &e))?;

        debug!("Uploading {} ({} bytes)", path.display(), metadata.len());
        let request = CreateFileRequestArgs::default()
            .file(path)
            .purpose(FilePurpose::Assistants)
            .build()?;
        self.bounded(self.client.files().create(request)).await
    }

    /// Every file with the given purpose, following pagination to the end.
    pub async fn list_files(&self, purpose: &str) -> Result<Vec<OpenAIFile>, ServiceError> {
        let mut files = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let mut query = ListFilesQueryArgs::default();
            query.purpose(purpose);
            if let Some(cursor) = after.take() {
                query.after(cursor);
            }
            let query = query.build()?;

            let page = self
                .bounded(self.client.files().query(&query)?.list())
                .await?;
            let next = page.last_id.clone().filter(|_| page.has_more);
            files.extend(page.data);

            match next {
                Some(cursor) => after = Some(cursor),
                None => return Ok(files)
            }
        }
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteFileResponse, ServiceError> {
        self.bounded(self.client.files().delete(file_id)).await
    }

    pub async fn create_vector_store(&self, name: &str) -> Result<VectorStoreObject, ServiceError> {
        let request = CreateVectorStoreRequestArgs::default().name(name).build()?;
        self.bounded(self.client.vector_stores().create(request))
            .await
    }

    pub async fn add_file_to_vector_store(
        &self,
        vector_store_id: &str,
        file_id: &str
    ) -> Result<VectorStoreFileObject, ServiceError> {
        let request = CreateVectorStoreFileRequestArgs::default()
            .file_id(file_id)
            .build()?;
        self.bounded(
            self.client
                .vector_stores()
                .files(vector_store_id)
                .create(request)
        )
        .await
    }

    pub async fn delete_vector_store(
        &self,
        vector_store_id: &str
    ) -> Result<DeleteVectorStoreResponse, ServiceError> {
        self.bounded(self.client.vector_stores().delete(vector_store_id))
            .await
    }

    pub async fn create_thread(&self) -> Result<ThreadObject, ServiceError> {
        self.bounded(self.client.threads().create(CreateThreadRequest::default()))
            .await
    }

    pub async fn add_user_message(&self, thread_id: &str, content: &str) -> Result<MessageObject, ServiceError> {
        let request = CreateMessageRequestArgs::default()
            .role(MessageRole::User)
            .content(content)
            .build()?;
        self.bounded(self.client.threads().messages(thread_id).create(request))
            .await
    }

    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunObject, ServiceError> {
        let request = CreateRunRequestArgs::default()
            .assistant_id(assistant_id)
            .build()?;
        self.bounded(self.client.threads().runs(thread_id).create(request))
            .await
    }

    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunObject, ServiceError> {
        self.bounded(self.client.threads().runs(thread_id).retrieve(run_id))
            .await
    }

    /// Polls a run until it reaches a terminal state.
    ///
    /// Fails with `PollTimeout` once the policy's attempts are used up.
    pub async fn wait_for_run(&self, thread_id: &str, mut run: RunObject) -> Result<RunObject, ServiceError> {
        let mut attempt = 0;
        while !RunStatus::from(&run.status).is_terminal() {
            if attempt >= self.poll.max_attempts {
                return Err(ServiceError::PollTimeout {
                    status: RunStatus::from(&run.status),
                    run_id: run.id,
                    attempts: attempt
                });
            }
            attempt += 1;
            tokio::time::sleep(self.poll.delay_for(attempt)).await;
            run = self.retrieve_run(thread_id, &run.id).await?;
            debug!(
                "Run {} is {} after {} polls",
                run.id,
                RunStatus::from(&run.status),
                attempt
            );
        }
        Ok(run)
    }

    /// Messages of a thread, newest first.
    pub async fn list_messages(&self, thread_id: &str) -> Result<Vec<MessageObject>, ServiceError> {
        let page = self
            .bounded(
                self.client
                    .threads()
                    .messages(thread_id)
                    .query(&[("order", "desc")])?
                    .list()
            )
            .await?;
        Ok(page.data)
    }

    /// Starts a streamed run and hands every text delta to `on_text` as it
    /// arrives. Returns the full streamed text once the run completes.
    pub async fn stream_run<F>(
        &self,
        thread_id: &str,
        assistant_id: &str,
        on_text: F
    ) -> Result<String, ServiceError>
    where
        F: FnMut(&str)
    {
        let request = CreateRunRequestArgs::default()
            .assistant_id(assistant_id)
            .build()?;
        let mut events = self
            .bounded(self.client.threads().runs(thread_id).create_stream(request))
            .await?;

        let mut state = StreamState::new(on_text);
        while let Some(event) = self.bounded(async { Ok(events.next().await) }).await? {
            match event {
                Ok(event) => {
                    if state.apply(event)? {
                        break;
                    }
                }
                Err(OpenAIError::StreamError(err)) if matches!(*err, StreamError::UnknownEvent(_)) => {
                    debug!("Skipping stream event: {err}");
                }
                Err(err) => return Err(err.into())
            }
        }
        state.finish()
    }

    /// Asks one question on a fresh thread, streaming the answer through
    /// `on_text`, then reads the citations of the latest message.
    pub async fn ask<F>(&self, assistant_id: &str, question: &str, on_text: F) -> Result<Answer, ServiceError>
    where
        F: FnMut(&str)
    {
        let thread = self.create_thread().await?;
        self.add_user_message(&thread.id, question).await?;
        let text = self.stream_run(&thread.id, assistant_id, on_text).await?;

        let messages = self.list_messages(&thread.id).await?;
        let citations = messages
            .first()
            .map_or(Citations::Unavailable, Citations::of);
        Ok(Answer { text, citations })
    }

    /// Asks one question on a fresh thread and waits for the whole reply.
    pub async fn answer(&self, assistant_id: &str, prompt: &str) -> Result<String, ServiceError> {
        let thread = self.create_thread().await?;
        self.add_user_message(&thread.id, prompt).await?;

        let run = self.create_run(&thread.id, assistant_id).await?;
        let run = self.wait_for_run(&thread.id, run).await?;
        if !RunStatus::from(&run.status).is_completed() {
            return Err(ServiceError::run_ended(&run));
        }

        let messages = self.list_messages(&thread.id).await?;
        messages
            .iter()
            .find(|message| message.role == MessageRole::Assistant)
            .map(message::full_text)
            .filter(|text| !text.is_empty())
            .ok_or(ServiceError::EmptyAnswer {
                thread_id: thread.id
            })
    }
}

struct StreamState<F> {
    on_text: F,
    text: String,
    completed: bool
}

impl<F: FnMut(&str)> StreamState<F> {
    fn new(on_text: F) -> Self {
        Self {
            on_text,
            text: String::new(),
            completed: false
        }
    }

    /// Folds one event into the state. Returns `true` once the stream is over.
    fn apply(&mut self, event: AssistantStreamEvent) -> Result<bool, ServiceError> {
        match event {
            AssistantStreamEvent::ThreadMessageDelta(delta) => {
                for fragment in message::delta_text(&delta) {
                    (self.on_text)(fragment);
                    self.text.push_str(fragment);
                }
            }
            AssistantStreamEvent::ThreadRunCompleted(_) => self.completed = true,
            AssistantStreamEvent::ThreadRunFailed(run)
            | AssistantStreamEvent::ThreadRunIncomplete(run)
            | AssistantStreamEvent::ThreadRunCancelled(run)
            | AssistantStreamEvent::ThreadRunExpired(run)
            | AssistantStreamEvent::ThreadRunRequiresAction(run) => {
                return Err(ServiceError::run_ended(&run));
            }
            AssistantStreamEvent::ErrorEvent(error) => return Err(ServiceError::Stream(error.to_string())),
            AssistantStreamEvent::Done(_) => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn finish(self) -> Result<String, ServiceError> {
        if self.completed {
            Ok(self.text)
        } else {
            Err(ServiceError::Stream(
                "stream ended before the run completed".to_string()
            ))
        }
    }
}
