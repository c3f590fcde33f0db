//! Request dispatcher routing JSON-RPC calls to agent handlers

use std::{
    any::Any,
    convert::Infallible,
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::FutureExt;
use serde_json::Value;
use tower_service::Service;

use crate::{
    agent::AgentRegistry,
    codec::JsonRpcCodec,
    protocol::{error::A2AError, operation::A2AOperation, task::TaskState},
    service::{response::PARSE_ERROR_STATUS, DispatchRequest, DispatchResponse},
};

/// Dispatcher turning a [`DispatchRequest`] into a [`DispatchResponse`]
///
/// Checks run in a fixed order: unknown agent, unparseable body, unsupported
/// method, missing user text, unbound handler. Only then is the handler
/// invoked. Handler errors and panics become failed tasks, so the service
/// itself never fails.
#[derive(Debug, Clone)]
pub struct DispatchService {
    registry: Arc<AgentRegistry>,
    codec: JsonRpcCodec,
}

impl DispatchService {
    pub fn new(registry: Arc<AgentRegistry>, codec: JsonRpcCodec) -> Self {
        Self { registry, codec }
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Route one request through the dispatch state machine
    pub async fn dispatch(&self, req: DispatchRequest) -> DispatchResponse {
        if self.registry.get(&req.agent_id).is_none() {
            return DispatchResponse::AgentNotFound {
                agent_id: req.agent_id,
            };
        }

        let body = match self.codec.decode_body(&req.body) {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(agent_id = %req.agent_id, error = ?err, "unparseable request body");
                return protocol_error(PARSE_ERROR_STATUS, Value::String(String::new()), &err);
            }
        };

        let parsed = self.codec.parse_request(&body);
        if let A2AOperation::Unsupported(method) = parsed.operation() {
            return protocol_error(200, parsed.request_id, &A2AError::MethodNotFound { method });
        }
        if parsed.user_message.is_empty() {
            let err = A2AError::InvalidParams("no message text".into());
            return protocol_error(200, parsed.request_id, &err);
        }

        let Some(handler) = self.registry.handler(&req.agent_id) else {
            tracing::error!(agent_id = %req.agent_id, "agent has no handler bound");
            let err = A2AError::HandlerNotFound {
                agent_id: req.agent_id,
            };
            return protocol_error(200, parsed.request_id, &err);
        };

        let turn = parsed.into_turn();
        let outcome = AssertUnwindSafe(handler.handle(&turn.user_message))
            .catch_unwind()
            .await;

        let (state, reply) = match outcome {
            Ok(Ok(reply)) => (TaskState::Completed, reply),
            Ok(Err(err)) => {
                tracing::warn!(agent_id = %req.agent_id, error = %err, "handler failed");
                (TaskState::Failed, format!("Error processing request: {err}"))
            }
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                tracing::error!(agent_id = %req.agent_id, %reason, "handler panicked");
                (TaskState::Failed, format!("Error processing request: {reason}"))
            }
        };

        DispatchResponse::Task(self.codec.format_response(
            turn.request_id,
            &turn.context_id,
            &turn.user_message,
            &reply,
            state,
        ))
    }
}

fn protocol_error(status: u16, request_id: Value, err: &A2AError) -> DispatchResponse {
    DispatchResponse::ProtocolError {
        status,
        envelope: JsonRpcCodec::format_a2a_error(request_id, err),
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        reason.to_string()
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        reason.clone()
    } else {
        "handler panicked".to_string()
    }
}

impl Service<DispatchRequest> for DispatchService {
    type Response = DispatchResponse;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: DispatchRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { Ok(service.dispatch(req).await) })
    }
}
