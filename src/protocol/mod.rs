//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};

pub mod agent;
pub mod error;
pub mod message;
pub mod operation;
pub mod task;

pub use agent::{AgentCapabilities, AgentCard, AgentSkill, CardSettings};
pub use error::{error_codes, A2AError, A2AResult};
pub use message::{Message, MessagePart, Role};
pub use operation::{A2AOperation, ParsedRequest, Turn};
pub use task::{Task, TaskState, TaskStatus};

/// Artifacts represent task outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique identifier of the Artifact
    pub artifact_id: String,

    /// Contents of the Artifact. Must contain at least one part
    pub parts: Vec<MessagePart>,
}

impl Artifact {
    /// Create an unnamed artifact
    pub fn new(artifact_id: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            parts,
        }
    }
}
