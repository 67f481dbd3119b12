use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The status of a remote run.
///
/// The set of terminal statuses mirrors what the service reports;
/// statuses this crate doesn't know about are preserved in
/// [`RunStatus::Other`] so callers can keep polling instead of
/// failing on a protocol addition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The run is waiting to be scheduled.
    Queued,
    /// The run is being processed by the model.
    InProgress,
    /// The run is blocked on locally-executed tool outputs.
    RequiresAction,
    /// The run finished successfully.
    Completed,
    /// The run finished with an error.
    Failed,
    /// The run was cancelled.
    Cancelled,
    /// The run expired before reaching another terminal status.
    Expired,
    /// A status this crate doesn't know about.
    Other(String),
}

impl RunStatus {
    /// Whether this status ends the run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Expired
        )
    }

    /// Returns the lowercase wire name of this status.
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Other(status) => status,
        }
    }
}

/// The last error reported by a failed run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunError {
    /// A service-defined error code.
    pub code: String,
    /// A human-readable description.
    pub message: String,
}

/// A snapshot of a service-owned run state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// The service-assigned run identifier.
    pub id: String,
    /// The status observed at snapshot time.
    pub status: RunStatus,
    /// Tool calls the run is blocked on, if the status is
    /// [`RunStatus::RequiresAction`].
    pub required_action: Vec<ToolCallRequest>,
    /// The last error, populated for failed runs.
    pub last_error: Option<RunError>,
}

/// Describes a tool call request from the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool.
    pub arguments: Value,
}

/// The output of a locally-executed tool call, submitted back into the
/// run that requested it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The identifier of the tool call this output answers.
    pub call_id: String,
    /// The output content.
    pub output: String,
}
