#![allow(deprecated)]

use async_openai::types::assistants::RunStatus as ApiRunStatus;
use strum::{Display, EnumString};

/// Lifecycle state of an assistant run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired
}

impl RunStatus {
    /// Whether the run will not change state on its own any more.
    ///
    /// `requires_action` counts as terminal: the pipeline registers no
    /// function tools, so nothing would ever submit the outputs.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::RequiresAction
                | RunStatus::Cancelled
                | RunStatus::Failed
                | RunStatus::Completed
                | RunStatus::Incomplete
                | RunStatus::Expired
        )
    }

    pub fn is_completed(self) -> bool {
        self == RunStatus::Completed
    }
}

impl From<&ApiRunStatus> for RunStatus {
    fn from(status: &ApiRunStatus) -> Self {
        match status {
            ApiRunStatus::Queued => RunStatus::Queued,
            ApiRunStatus::InProgress => RunStatus::InProgress,
            ApiRunStatus::RequiresAction => RunStatus::RequiresAction,
            ApiRunStatus::Cancelling => RunStatus::Cancelling,
            ApiRunStatus::Cancelled => RunStatus::Cancelled,
            ApiRunStatus::Failed => RunStatus::Failed,
            ApiRunStatus::Completed => RunStatus::Completed,
            ApiRunStatus::Incomplete => RunStatus::Incomplete,
            ApiRunStatus::Expired => RunStatus::Expired
        }
    }
}
