//! HTTP binding of the gateway, served with axum

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use serde_json::{json, Map, Value};
use tower::ServiceExt;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_layer::Layer;

use crate::{
    agent::AgentRegistry,
    codec::JsonRpcCodec,
    layer::{DispatchTraceLayer, DispatchTraceService},
    protocol::error::A2AError,
    service::{DispatchRequest, DispatchResponse, DispatchService},
};

/// Name reported by the service listing
pub const SERVICE_NAME: &str = "Weather Agent Server";

/// Shared state of the HTTP gateway
#[derive(Clone)]
pub struct GatewayState {
    dispatcher: DispatchTraceService<DispatchService>,
    registry: Arc<AgentRegistry>,
    base_url: Arc<str>,
}

impl GatewayState {
    /// Create gateway state
    ///
    /// `base_url` is the externally visible root used in cards and the
    /// service listing, e.g. `http://localhost:8000`.
    pub fn new(registry: Arc<AgentRegistry>, codec: JsonRpcCodec, base_url: &str) -> Self {
        let dispatcher =
            DispatchTraceLayer::new().layer(DispatchService::new(registry.clone(), codec));
        Self {
            dispatcher,
            registry,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Build the axum router exposing every configured agent
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(list_agents))
        .route("/health", get(health))
        .route("/{agent_id}/.well-known/agent.json", get(agent_card))
        .route("/{agent_id}/", post(send_message))
        .route("/{agent_id}", post(send_message))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

/// GET / - agents with their card and endpoint URLs
async fn list_agents(State(state): State<GatewayState>) -> Json<Value> {
    let base_url = state.base_url();
    let agents: Map<String, Value> = state
        .registry
        .agents()
        .map(|agent| {
            let entry = json!({
                "card": agent.card_url(base_url),
                "endpoint": agent.endpoint_url(base_url),
                "framework": agent.framework,
            });
            (agent.id.clone(), entry)
        })
        .collect();

    Json(json!({ "service": SERVICE_NAME, "agents": agents }))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /{agent_id}/.well-known/agent.json
async fn agent_card(State(state): State<GatewayState>, Path(agent_id): Path<String>) -> Response {
    match state.registry.get(&agent_id) {
        Some(agent) => Json(agent.card(state.base_url())).into_response(),
        None => {
            let err = A2AError::AgentNotFound { agent_id };
            (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

/// POST /{agent_id}/ - JSON-RPC `message/send`
async fn send_message(
    State(state): State<GatewayState>,
    Path(agent_id): Path<String>,
    body: Bytes,
) -> DispatchResponse {
    state
        .dispatcher
        .oneshot(DispatchRequest::new(agent_id, body))
        .await
        .unwrap_or_else(|never| match never {})
}
