//! A2A task types

use serde::{Deserialize, Serialize};

use super::{message::Message, Artifact};

/// A task in the A2A protocol
///
/// The gateway completes every task within a single request, so a task is
/// always returned in a terminal state with its full history and artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Context ID grouping related tasks/messages
    #[serde(rename = "contextId")]
    pub context_id: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Conversation messages exchanged for this task
    #[serde(default)]
    pub history: Vec<Message>,

    /// Outputs produced by the task
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Task {
    /// Create a new submitted task
    pub fn new(id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context_id: context_id.into(),
            status: TaskStatus::new(TaskState::Submitted),
            history: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Update the task state
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.status = TaskStatus::new(state);
        self
    }

    /// Append a message to the history
    pub fn with_history_message(mut self, message: Message) -> Self {
        self.history.push(message);
        self
    }

    /// Append an artifact
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }
}

/// Status block of a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
    /// Lifecycle state
    pub state: TaskState,
}

impl TaskStatus {
    pub fn new(state: TaskState) -> Self {
        Self { state }
    }
}

/// Task state in the A2A protocol lifecycle
///
/// Task lifecycle: submitted → working → completed/failed/canceled/rejected
/// Non-terminal states: input-required, auth-required (awaiting client input)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task requires additional input from the client
    InputRequired,

    /// Task requires authentication or authorization
    AuthRequired,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,

    /// Task was canceled by the client
    Canceled,

    /// Task was rejected by the agent
    Rejected,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled | TaskState::Rejected
        )
    }
}
