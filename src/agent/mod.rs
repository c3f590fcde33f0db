//! Agent handlers and the registry binding them to agent ids

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use tower::BoxError;

use crate::{protocol::error::A2AResult, weather::WeatherLookup};

pub mod registry;
pub mod weather;

pub use registry::{
    default_agents, validate_agent_ids, AgentRegistry, AgentRegistryBuilder, AgentSettings,
};
pub use weather::{WeatherRequest, WeatherToolAgent};

/// Capability turning a user utterance into an agent reply
///
/// Implementations may take arbitrarily long and fail with any error; the
/// dispatcher converts failures into failed tasks, so handlers do not need
/// to format their own error replies.
#[async_trait]
pub trait AgentHandler: Send + Sync {
    async fn handle(&self, message: &str) -> Result<String, BoxError>;
}

/// Handler backed by an async closure
///
/// Created with [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async closure as an [`AgentHandler`]
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut> AgentHandler for HandlerFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    async fn handle(&self, message: &str) -> Result<String, BoxError> {
        (self.f)(message.to_string()).await
    }
}

/// Build a registry binding a [`WeatherToolAgent`] to every configured agent
pub fn weather_registry(
    agents: Vec<AgentSettings>,
    lookup: Arc<dyn WeatherLookup>,
) -> A2AResult<AgentRegistry> {
    let handler: Arc<dyn AgentHandler> = Arc::new(WeatherToolAgent::new(lookup));
    agents
        .into_iter()
        .fold(AgentRegistry::builder(), |builder, agent| {
            builder.agent(agent, handler.clone())
        })
        .build()
}

#[cfg(test)]
mod tests {
    use crate::weather::MockWeatherLookup;

    use super::*;

    #[tokio::test]
    async fn test_handler_fn() {
        let handler = handler_fn(|message: String| async move {
            Ok::<_, BoxError>(message.to_uppercase())
        });
        assert_eq!(handler.handle("sunny").await.unwrap(), "SUNNY");
    }

    #[test]
    fn test_weather_registry_binds_every_agent() {
        let registry =
            weather_registry(default_agents(), Arc::new(MockWeatherLookup::new())).unwrap();

        assert_eq!(registry.len(), 5);
        assert!(registry.unbound_agents().is_empty());
        for agent in registry.agents() {
            assert!(registry.handler(&agent.id).is_some());
        }
    }
}
