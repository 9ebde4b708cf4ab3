//! Shared test fixtures for the studynotes workspace.
//!
//! Provides canonical note payloads in the shapes a completion backend or the
//! notes file can take:
//! - single note objects
//! - ten-note arrays, bare and wrapped
//! - completion bodies as the OpenAI chat API returns them
//!
//! and Assistants API objects and event streams for mock servers.

mod fixtures;
mod openai;

pub use fixtures::*;
pub use openai::*;
