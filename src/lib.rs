//! # Weather A2A
//!
//! A gateway exposing several weather agents through the Agent2Agent (A2A)
//! protocol: a JSON-RPC 2.0 `message/send` endpoint plus a discovery card per
//! agent.
//!
//! Requests flow through Tower services: the axum transport hands each call to
//! a [`DispatchService`](service::DispatchService), wrapped in a
//! [`DispatchTraceLayer`](layer::DispatchTraceLayer), which parses the
//! envelope, routes it to the agent's [`AgentHandler`](agent::AgentHandler) and
//! formats the resulting task.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weather_a2a::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lookup = Arc::new(OpenMeteoClient::new()?);
//!     let registry = weather_registry(default_agents(), lookup)?;
//!     let state = GatewayState::new(
//!         Arc::new(registry),
//!         JsonRpcCodec::new(),
//!         "http://localhost:8000",
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, build_router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod codec;
pub mod config;
pub mod layer;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod weather;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        agent::{default_agents, handler_fn, weather_registry, AgentHandler, AgentRegistry},
        codec::JsonRpcCodec,
        protocol::error::A2AError,
        protocol::{AgentCard, Message, MessagePart, Role, Task, TaskState},
        service::{DispatchRequest, DispatchResponse, DispatchService},
        transport::{build_router, GatewayState},
        weather::{OpenMeteoClient, WeatherLookup},
    };
}
