//! Inbound A2A operations

use serde_json::Value;

/// The only JSON-RPC method the gateway serves
pub const SEND_MESSAGE: &str = "message/send";

/// JSON-RPC method requested by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum A2AOperation {
    /// `message/send`: deliver a user message, receive a completed task
    SendMessage,

    /// Any other method name, carried verbatim for error reporting
    Unsupported(String),
}

impl A2AOperation {
    /// Map a JSON-RPC method name to an operation
    pub fn from_method(method: &str) -> Self {
        match method {
            SEND_MESSAGE => A2AOperation::SendMessage,
            other => A2AOperation::Unsupported(other.to_string()),
        }
    }

    /// JSON-RPC method name of this operation
    pub fn method(&self) -> &str {
        match self {
            A2AOperation::SendMessage => SEND_MESSAGE,
            A2AOperation::Unsupported(method) => method,
        }
    }
}

/// Raw result of parsing a JSON-RPC request body
///
/// Every field has a usable default, so parsing never fails; validation
/// happens afterwards in the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// Request correlation id, echoed verbatim in the response
    pub request_id: Value,

    /// Method name (empty when absent)
    pub method: String,

    /// Extracted user utterance (empty when none could be found)
    pub user_message: String,

    /// Conversation id (caller-supplied or freshly generated)
    pub context_id: String,
}

impl ParsedRequest {
    pub fn operation(&self) -> A2AOperation {
        A2AOperation::from_method(&self.method)
    }

    /// Normalized unit handed to an agent handler
    pub fn into_turn(self) -> Turn {
        Turn {
            request_id: self.request_id,
            context_id: self.context_id,
            user_message: self.user_message,
        }
    }
}

/// One user turn routed to an agent
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub request_id: Value,
    pub context_id: String,
    pub user_message: String,
}
