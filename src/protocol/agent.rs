//! Agent discovery types and card generation

use serde::{Deserialize, Serialize};

/// Organization advertised when none is configured
pub const DEFAULT_ORGANIZATION: &str = "AG2 AI";

/// Card version advertised when none is configured
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Agent Card for agent discovery
///
/// The Agent Card is published at `/{agent}/.well-known/agent.json` and
/// describes the agent's identity, capabilities and skills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Name of the agent
    pub name: String,

    /// Human-readable description of the agent
    pub description: String,

    /// JSON-RPC endpoint of the agent
    pub url: String,

    /// Organization operating the agent
    pub provider: AgentProvider,

    /// Agent version
    pub version: String,

    /// Agent capabilities
    pub capabilities: AgentCapabilities,

    /// MIME types accepted as input
    pub default_input_modes: Vec<String>,

    /// MIME types produced as output
    pub default_output_modes: Vec<String>,

    /// Skills advertised by the agent, in display order
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Generate the card for a weather agent
    ///
    /// Pure: identical settings always yield identical cards.
    pub fn generate(settings: &CardSettings) -> Self {
        let framework = settings.framework.as_str();
        let framework_tag = framework.to_lowercase();

        Self {
            name: settings.name.clone(),
            description: settings.description.clone(),
            url: settings.url.clone(),
            provider: AgentProvider {
                organization: settings.organization.clone(),
            },
            version: settings.version.clone(),
            capabilities: AgentCapabilities::default(),
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string(), "application/json".to_string()],
            skills: vec![
                AgentSkill::new(
                    "current_weather",
                    "Current Weather",
                    format!(
                        "Get real-time weather conditions for any city worldwide using {framework}."
                    ),
                )
                .with_tags([
                    "weather",
                    "current",
                    "temperature",
                    "conditions",
                    framework_tag.as_str(),
                ])
                .with_examples([
                    "What's the weather in Tokyo?",
                    "Current weather in London, UK",
                    "How hot is it in Dubai?",
                ]),
                AgentSkill::new(
                    "weather_forecast",
                    "Weather Forecast",
                    format!("Get multi-day weather forecasts for any city using {framework}."),
                )
                .with_tags([
                    "weather",
                    "forecast",
                    "prediction",
                    "planning",
                    framework_tag.as_str(),
                ])
                .with_examples([
                    "What's the 5-day forecast for Paris?",
                    "Will it rain in Seattle this week?",
                    "7-day forecast for Sydney",
                ]),
            ],
        }
    }
}

/// Inputs to card generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSettings {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Label of the framework backing the agent, e.g. "LangGraph"
    pub framework: String,
    pub organization: String,
    pub version: String,
}

impl CardSettings {
    /// Create settings with the default organization and version
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        framework: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            framework: framework.into(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    /// Override the provider organization
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Override the card version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Provider block of an agent card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentProvider {
    pub organization: String,
}

/// Agent capabilities
///
/// None of these are implemented by the gateway, so every flag is false.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Supports streaming responses
    #[serde(default)]
    pub streaming: bool,

    /// Supports push notifications via webhooks
    #[serde(default)]
    pub push_notifications: bool,

    /// Records task state transitions
    #[serde(default)]
    pub state_transition_history: bool,
}

/// A skill advertised on the agent card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Example utterances the skill handles
    #[serde(default)]
    pub examples: Vec<String>,
}

impl AgentSkill {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }
}
