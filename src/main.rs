use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_a2a::{
    agent::weather_registry,
    codec::JsonRpcCodec,
    config::ServerConfig,
    transport::{build_router, GatewayState},
    weather::OpenMeteoClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::parse();
    let base_url = config.base_url();

    let agents = config.load_agents()?;
    let lookup = OpenMeteoClient::with_timeout(config.weather_timeout())?;
    let registry = weather_registry(agents, Arc::new(lookup))?;
    for agent_id in registry.unbound_agents() {
        tracing::warn!(%agent_id, "agent has no handler and will answer with internal errors");
    }

    let agent_ids: Vec<_> = registry.agents().map(|agent| agent.id.as_str()).collect();
    tracing::info!("Starting Weather Agent Server at {base_url}");
    tracing::info!("Available agents: {}", agent_ids.join(", "));

    let state = GatewayState::new(Arc::new(registry), JsonRpcCodec::new(), &base_url);
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down Weather Agent Server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
