//! Immutable table of configured agents and their handlers

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::protocol::{
    agent::{AgentCard, CardSettings},
    error::{A2AError, A2AResult},
};

use super::AgentHandler;

/// Display metadata of one configured agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Path segment the agent is served under, e.g. `langgraph`
    pub id: String,
    pub name: String,
    pub description: String,
    /// Framework label shown on the card, e.g. `LangGraph`
    pub framework: String,
}

impl AgentSettings {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        framework: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            framework: framework.into(),
        }
    }

    /// JSON-RPC endpoint under `base_url`
    pub fn endpoint_url(&self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self.id)
    }

    /// Agent card location under `base_url`
    pub fn card_url(&self, base_url: &str) -> String {
        format!("{}.well-known/agent.json", self.endpoint_url(base_url))
    }

    /// Discovery card advertising this agent under `base_url`
    pub fn card(&self, base_url: &str) -> AgentCard {
        AgentCard::generate(&CardSettings::new(
            &self.name,
            &self.description,
            self.endpoint_url(base_url),
            &self.framework,
        ))
    }
}

/// The five weather agents served by default
pub fn default_agents() -> Vec<AgentSettings> {
    vec![
        AgentSettings::new(
            "ag2",
            "WeatherAgent-AG2",
            "Weather agent built with AG2 (AutoGen) framework. Provides current weather and \
             forecasts using the A2A protocol.",
            "AG2",
        ),
        AgentSettings::new(
            "google-adk",
            "WeatherAgent-GoogleADK",
            "Weather agent built with Google's Agent Development Kit (ADK). Powered by Gemini \
             models.",
            "Google ADK",
        ),
        AgentSettings::new(
            "openai-sdk",
            "WeatherAgent-OpenAI",
            "Weather agent built with OpenAI's Agents SDK. Uses GPT models for natural language \
             understanding.",
            "OpenAI Agents SDK",
        ),
        AgentSettings::new(
            "langgraph",
            "WeatherAgent-LangGraph",
            "Weather agent built with LangChain's LangGraph framework. Implements a ReAct agent \
             pattern.",
            "LangGraph",
        ),
        AgentSettings::new(
            "crewai",
            "WeatherAgent-CrewAI",
            "Weather agent built with CrewAI framework. Designed for multi-agent task \
             orchestration.",
            "CrewAI",
        ),
    ]
}

/// Configured agents plus the handler bound to each
///
/// Built once at startup and shared read-only. Agents and handlers are kept
/// apart so a configured agent without a handler is representable and can be
/// reported as an internal error instead of a routing failure.
pub struct AgentRegistry {
    agents: Vec<AgentSettings>,
    handlers: HashMap<String, Arc<dyn AgentHandler>>,
}

impl AgentRegistry {
    pub fn builder() -> AgentRegistryBuilder {
        AgentRegistryBuilder::default()
    }

    /// Look up a configured agent
    pub fn get(&self, agent_id: &str) -> Option<&AgentSettings> {
        self.agents.iter().find(|agent| agent.id == agent_id)
    }

    /// Handler bound to `agent_id`, if any
    pub fn handler(&self, agent_id: &str) -> Option<Arc<dyn AgentHandler>> {
        self.handlers.get(agent_id).cloned()
    }

    /// Configured agents in registration order
    pub fn agents(&self) -> impl Iterator<Item = &AgentSettings> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Ids of configured agents that have no handler
    pub fn unbound_agents(&self) -> Vec<&str> {
        self.agents
            .iter()
            .filter(|agent| !self.handlers.contains_key(&agent.id))
            .map(|agent| agent.id.as_str())
            .collect()
    }
}

impl fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.agents.iter().map(|agent| agent.id.as_str()).collect();
        f.debug_struct("AgentRegistry")
            .field("agents", &ids)
            .field("bound", &self.handlers.len())
            .finish()
    }
}

/// Builder for [`AgentRegistry`]
#[derive(Default)]
pub struct AgentRegistryBuilder {
    agents: Vec<AgentSettings>,
    handlers: HashMap<String, Arc<dyn AgentHandler>>,
}

impl AgentRegistryBuilder {
    /// Register an agent and bind its handler
    pub fn agent(mut self, settings: AgentSettings, handler: Arc<dyn AgentHandler>) -> Self {
        self.handlers.insert(settings.id.clone(), handler);
        self.agents.push(settings);
        self
    }

    /// Register an agent without binding a handler
    pub fn unbound_agent(mut self, settings: AgentSettings) -> Self {
        self.agents.push(settings);
        self
    }

    /// Validate agent ids and build the registry
    pub fn build(self) -> A2AResult<AgentRegistry> {
        validate_agent_ids(&self.agents)?;

        Ok(AgentRegistry {
            agents: self.agents,
            handlers: self.handlers,
        })
    }
}

/// Check that ids are non-empty, unique, and usable as a single path segment
pub fn validate_agent_ids(agents: &[AgentSettings]) -> A2AResult<()> {
    let mut seen = HashSet::new();
    for agent in agents {
        if agent.id.is_empty() {
            return Err(A2AError::Config("agent id cannot be empty".into()));
        }
        if agent.id.contains('/') || agent.id.starts_with('.') {
            return Err(A2AError::Config(format!(
                "agent id '{}' is not a valid path segment",
                agent.id
            )));
        }
        if agent.id == "health" {
            return Err(A2AError::Config("agent id 'health' is reserved".into()));
        }
        if !seen.insert(agent.id.as_str()) {
            return Err(A2AError::Config(format!(
                "duplicate agent id '{}'",
                agent.id
            )));
        }
    }
    Ok(())
}
