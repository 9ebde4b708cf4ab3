//! # OpenAI assistant access
//!
//! Everything the pipeline needs from OpenAI, on top of `async-openai`:
//! - [`AssistantClient`]: assistants, files, vector stores, threads, and
//!   streamed or polled runs
//! - [`OpenAiCompletionService`]: JSON-mode chat completions for note
//!   structuring
//! - [`AssistantIdFile`]: the id handed from provisioning to later stages

pub mod client;
pub mod completion;
pub mod error;
pub mod id_file;
pub mod message;
pub mod poll;
pub mod run;

pub use client::{Answer, AssistantClient, AssistantSpec, FILE_PURPOSE, vector_store_ids};
pub use completion::OpenAiCompletionService;
pub use error::ServiceError;
pub use id_file::AssistantIdFile;
pub use message::{Citation, Citations};
pub use poll::PollPolicy;
pub use run::RunStatus;
