//! Dispatch response types

use serde_json::{json, Value};

use crate::{
    codec::JsonRpcResponse,
    protocol::{error::A2AError, task::TaskState},
};

/// HTTP status for a request body that is not JSON
pub const PARSE_ERROR_STATUS: u16 = 400;

/// Outcome of dispatching one request
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResponse {
    /// A handler ran; the task state tells whether it succeeded
    Task(JsonRpcResponse),

    /// The request was rejected with a JSON-RPC error envelope
    ProtocolError {
        status: u16,
        envelope: JsonRpcResponse,
    },

    /// No agent is configured under the requested id
    AgentNotFound { agent_id: String },
}

impl DispatchResponse {
    /// HTTP status code to answer with
    pub fn http_status(&self) -> u16 {
        match self {
            DispatchResponse::Task(_) => 200,
            DispatchResponse::ProtocolError { status, .. } => *status,
            DispatchResponse::AgentNotFound { .. } => 404,
        }
    }

    /// JSON body to answer with
    pub fn body(&self) -> Value {
        match self {
            DispatchResponse::Task(envelope) | DispatchResponse::ProtocolError { envelope, .. } => {
                serde_json::to_value(envelope).unwrap_or(Value::Null)
            }
            DispatchResponse::AgentNotFound { agent_id } => {
                let err = A2AError::AgentNotFound {
                    agent_id: agent_id.clone(),
                };
                json!({ "error": err.to_string() })
            }
        }
    }

    /// Short label used in logs
    pub fn outcome(&self) -> &'static str {
        match self {
            DispatchResponse::Task(envelope) => match envelope.result.as_ref() {
                Some(task) if task.status.state == TaskState::Failed => "failed",
                _ => "completed",
            },
            DispatchResponse::ProtocolError { .. } => "protocol_error",
            DispatchResponse::AgentNotFound { .. } => "agent_not_found",
        }
    }

    /// The JSON-RPC envelope, if the response carries one
    pub fn envelope(&self) -> Option<&JsonRpcResponse> {
        match self {
            DispatchResponse::Task(envelope) | DispatchResponse::ProtocolError { envelope, .. } => {
                Some(envelope)
            }
            DispatchResponse::AgentNotFound { .. } => None,
        }
    }
}
