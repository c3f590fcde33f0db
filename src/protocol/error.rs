//! Error types for the A2A gateway

use thiserror::Error;

/// Reserved JSON-RPC 2.0 error codes used by the gateway
pub mod error_codes {
    /// Body could not be parsed as JSON
    pub const PARSE_ERROR: i64 = -32700;

    /// Requested method is not supported
    pub const METHOD_NOT_FOUND: i64 = -32601;

    /// Params were missing or unusable
    pub const INVALID_PARAMS: i64 = -32602;

    /// Internal error, including a recognized agent without a handler
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Main error type for A2A gateway operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Request body is not valid JSON
    #[error("Parse error")]
    Parse(#[source] serde_json::Error),

    /// JSON-RPC method other than `message/send`
    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    /// Params did not yield a usable user message
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Agent id is configured but no handler is bound to it
    #[error("No handler for agent: {agent_id}")]
    HandlerNotFound { agent_id: String },

    /// Agent id is not configured at all
    #[error("Agent '{agent_id}' not found")]
    AgentNotFound { agent_id: String },

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Outbound request timed out
    #[error("Request timeout")]
    Timeout,
}

impl A2AError {
    /// JSON-RPC error code reported for this error
    pub fn rpc_code(&self) -> i64 {
        match self {
            A2AError::Parse(_) => error_codes::PARSE_ERROR,
            A2AError::MethodNotFound { .. } => error_codes::METHOD_NOT_FOUND,
            A2AError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            _ => error_codes::INTERNAL_ERROR,
        }
    }
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}
