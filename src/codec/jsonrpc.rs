//! JSON-RPC 2.0 codec for the A2A protocol
//!
//! Decodes inbound `message/send` envelopes into a [`ParsedRequest`] and
//! encodes task results and protocol errors back into JSON-RPC responses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{
    error::A2AError, message::Message, operation::ParsedRequest, task::Task, Artifact,
    MessagePart, TaskState,
};

use super::ids::{IdGenerator, UuidGenerator};

/// JSON-RPC protocol version tag
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 response envelope
///
/// Exactly one of `result` or `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, task: Task) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(task),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC 2.0 codec for the server side of `message/send`
#[derive(Debug, Clone)]
pub struct JsonRpcCodec {
    ids: Arc<dyn IdGenerator>,
}

impl JsonRpcCodec {
    /// Create a codec generating UUIDv7 identifiers
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(UuidGenerator))
    }

    /// Create a codec drawing identifiers from `ids`
    pub fn with_id_generator(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Decode a raw request body into JSON
    pub fn decode_body(&self, body: &[u8]) -> Result<Value, A2AError> {
        serde_json::from_slice(body).map_err(A2AError::Parse)
    }

    /// Extract `(id, method, user message, context id)` from a request body
    ///
    /// Never fails: missing or malformed fields fall back to generated ids or
    /// empty strings. `contextId` is echoed only when it is a JSON string; any
    /// other value (a number, an object) is replaced by a fresh id, so the
    /// task's `contextId` is always a string.
    pub fn parse_request(&self, body: &Value) -> ParsedRequest {
        let request_id = match body.get("id") {
            Some(id) => id.clone(),
            None => Value::String(self.ids.next_id()),
        };

        let method = match body.get("method") {
            Some(Value::String(method)) => method.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let message = body.get("params").and_then(|params| params.get("message"));

        let context_id = message
            .and_then(|m| m.get("contextId"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.ids.next_id());

        let parts = message
            .and_then(|m| m.get("parts"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        ParsedRequest {
            request_id,
            method,
            user_message: extract_user_message(parts),
            context_id,
        }
    }

    /// Build the result envelope for a finished turn
    ///
    /// Draws four fresh ids: the task, both history messages and the artifact.
    pub fn format_response(
        &self,
        request_id: Value,
        context_id: &str,
        user_message: &str,
        agent_response: &str,
        state: TaskState,
    ) -> JsonRpcResponse {
        let task = Task::new(self.ids.next_id(), context_id)
            .with_state(state)
            .with_history_message(
                Message::user(user_message).with_message_id(self.ids.next_id()),
            )
            .with_history_message(
                Message::agent(agent_response).with_message_id(self.ids.next_id()),
            )
            .with_artifact(Artifact::new(
                self.ids.next_id(),
                vec![MessagePart::text(agent_response)],
            ));

        JsonRpcResponse::success(request_id, task)
    }

    /// Build an error envelope
    pub fn format_error(
        request_id: Value,
        code: i64,
        message: impl Into<String>,
    ) -> JsonRpcResponse {
        JsonRpcResponse::error(request_id, code, message)
    }

    /// Build the error envelope reporting `err`
    pub fn format_a2a_error(request_id: Value, err: &A2AError) -> JsonRpcResponse {
        Self::format_error(request_id, err.rpc_code(), err.to_string())
    }
}

impl Default for JsonRpcCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the user utterance out of a multi-turn `parts` array
///
/// The last text part whose `metadata.role` is `"user"` (the default when no
/// role is given) wins. When that yields nothing, the first text part is used
/// regardless of role.
pub fn extract_user_message(parts: &[Value]) -> String {
    let latest_user_text = parts
        .iter()
        .rev()
        .find(|part| is_text_part(part) && part_role(part) == "user")
        .map(part_text)
        .unwrap_or_default();

    if !latest_user_text.is_empty() {
        return latest_user_text.to_string();
    }

    parts
        .iter()
        .find(|part| is_text_part(part))
        .map(part_text)
        .unwrap_or_default()
        .to_string()
}

fn is_text_part(part: &Value) -> bool {
    part.get("kind").and_then(Value::as_str) == Some("text")
}

fn part_role(part: &Value) -> &str {
    match part.get("metadata").and_then(|metadata| metadata.get("role")) {
        Some(Value::String(role)) => role.as_str(),
        Some(_) => "",
        None => "user",
    }
}

fn part_text(part: &Value) -> &str {
    part.get("text").and_then(Value::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::codec::ids::SequentialIds;

    use super::*;

    fn codec() -> JsonRpcCodec {
        JsonRpcCodec::with_id_generator(Arc::new(SequentialIds::new("gen")))
    }

    fn body_with_parts(parts: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": "req-1",
            "method": "message/send",
            "params": {"message": {"contextId": "ctx-1", "parts": parts}}
        })
    }

    #[test]
    fn test_parse_full_request() {
        let parsed = codec().parse_request(&body_with_parts(json!([
            {"kind": "text", "text": "weather in Paris"}
        ])));

        assert_eq!(parsed.request_id, json!("req-1"));
        assert_eq!(parsed.method, "message/send");
        assert_eq!(parsed.user_message, "weather in Paris");
        assert_eq!(parsed.context_id, "ctx-1");
    }

    #[test]
    fn test_parse_generates_missing_ids() {
        let parsed = codec().parse_request(&json!({"method": "message/send"}));

        assert_eq!(parsed.request_id, json!("gen-1"));
        assert_eq!(parsed.context_id, "gen-2");
        assert_eq!(parsed.user_message, "");
    }

    #[test]
    fn test_parse_keeps_numeric_id() {
        let parsed = codec().parse_request(&json!({"id": 42, "method": "message/send"}));
        assert_eq!(parsed.request_id, json!(42));
    }

    #[test]
    fn test_parse_non_object_body_degrades() {
        let parsed = codec().parse_request(&json!(["not", "an", "object"]));

        assert_eq!(parsed.method, "");
        assert_eq!(parsed.user_message, "");
        assert_eq!(parsed.request_id, json!("gen-1"));
    }

    #[test]
    fn test_parse_replaces_non_string_context_id() {
        let parsed = codec().parse_request(&json!({
            "id": "req-1",
            "method": "message/send",
            "params": {"message": {"contextId": 7, "parts": []}}
        }));

        assert_eq!(parsed.context_id, "gen-1");
    }

    #[test]
    fn test_parse_non_string_method() {
        let parsed = codec().parse_request(&json!({"method": 5}));
        assert_eq!(parsed.method, "5");
    }

    #[test]
    fn test_latest_user_part_wins() {
        let message = extract_user_message(&[
            json!({"kind": "text", "text": "A", "metadata": {"role": "agent"}}),
            json!({"kind": "text", "text": "B", "metadata": {"role": "user"}}),
        ]);
        assert_eq!(message, "B");

        let message = extract_user_message(&[
            json!({"kind": "text", "text": "first question"}),
            json!({"kind": "text", "text": "answer", "metadata": {"role": "agent"}}),
            json!({"kind": "text", "text": "follow-up"}),
        ]);
        assert_eq!(message, "follow-up");
    }

    #[test]
    fn test_fallback_to_first_text_part() {
        let message = extract_user_message(&[
            json!({"kind": "text", "text": "A", "metadata": {"role": "agent"}}),
        ]);
        assert_eq!(message, "A");

        let message = extract_user_message(&[
            json!({"kind": "data", "data": {}}),
            json!({"kind": "text", "text": "X", "metadata": {"role": "agent"}}),
            json!({"kind": "text", "text": "Y", "metadata": {"role": "agent"}}),
        ]);
        assert_eq!(message, "X");
    }

    #[test]
    fn test_empty_user_text_falls_back() {
        let message = extract_user_message(&[
            json!({"kind": "text", "text": "context", "metadata": {"role": "agent"}}),
            json!({"kind": "text", "text": ""}),
        ]);
        assert_eq!(message, "context");
    }

    #[test]
    fn test_no_text_parts() {
        assert_eq!(extract_user_message(&[]), "");
        assert_eq!(
            extract_user_message(&[json!({"kind": "file", "file": {"uri": "x"}})]),
            ""
        );
        assert_eq!(extract_user_message(&[json!({"text": "untagged"})]), "");
    }

    #[test]
    fn test_metadata_without_role_defaults_to_user() {
        let message = extract_user_message(&[
            json!({"kind": "text", "text": "first"}),
            json!({"kind": "text", "text": "second", "metadata": {"source": "ui"}}),
        ]);
        assert_eq!(message, "second");
    }

    #[test]
    fn test_format_response_shape() {
        let response = codec().format_response(
            json!("req-1"),
            "ctx-1",
            "weather in Paris",
            "Sunny, 20C",
            TaskState::Completed,
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "id": "req-1",
                "result": {
                    "id": "gen-1",
                    "contextId": "ctx-1",
                    "status": {"state": "completed"},
                    "history": [
                        {
                            "messageId": "gen-2",
                            "role": "user",
                            "parts": [{"kind": "text", "text": "weather in Paris"}]
                        },
                        {
                            "messageId": "gen-3",
                            "role": "agent",
                            "parts": [{"kind": "text", "text": "Sunny, 20C"}]
                        }
                    ],
                    "artifacts": [
                        {
                            "artifactId": "gen-4",
                            "parts": [{"kind": "text", "text": "Sunny, 20C"}]
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_format_response_uses_fresh_ids() {
        let codec = JsonRpcCodec::new();
        let response =
            codec.format_response(json!(1), "ctx", "hi", "hello", TaskState::Failed);
        let task = response.result.unwrap();

        let mut ids = vec![task.id.clone(), task.artifacts[0].artifact_id.clone()];
        ids.extend(task.history.iter().filter_map(|m| m.message_id.clone()));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(task.status.state, TaskState::Failed);
    }

    #[test]
    fn test_format_error() {
        let response = JsonRpcCodec::format_error(json!("req-9"), -32601, "Method not found: x");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "id": "req-9",
                "error": {"code": -32601, "message": "Method not found: x"}
            })
        );
    }

    #[test]
    fn test_decode_body_rejects_invalid_json() {
        let err = codec().decode_body(b"{not json").unwrap_err();
        assert_eq!(err.rpc_code(), -32700);

        let envelope = JsonRpcCodec::format_a2a_error(json!(""), &err);
        assert_eq!(envelope.error.unwrap().message, "Parse error");
    }
}
