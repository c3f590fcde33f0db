//! A2A message types

use serde::{Deserialize, Serialize};

/// A message in the A2A protocol
///
/// The gateway emits exactly two per task: the user utterance and the agent
/// reply, each carrying one text part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Optional message identifier
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Role of the message sender
    pub role: Role,

    /// Message content parts
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// Create a new message with text content
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            message_id: None,
            role,
            parts: vec![MessagePart::text(text)],
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Set the message ID
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }
}

/// A part of an outgoing message, discriminated by its `kind` field
///
/// Inbound parts are read as raw JSON by the codec, so only the text kind
/// the gateway emits is modelled here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessagePart {
    Text { text: String },
}

impl MessagePart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Text of this part
    pub fn as_text(&self) -> &str {
        match self {
            MessagePart::Text { text } => text,
        }
    }
}
