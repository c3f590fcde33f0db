//! Server configuration

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use serde::Deserialize;
use url::Url;

use crate::{
    agent::{default_agents, validate_agent_ids, AgentSettings},
    protocol::error::{A2AError, A2AResult},
};

/// Configuration of the gateway process, read from flags or the environment
#[derive(Debug, Clone, Parser)]
#[command(name = "weather-a2a", version, about)]
pub struct ServerConfig {
    /// Externally visible base URL used in agent cards and the listing
    #[arg(long, env = "HOST_URL", default_value = "http://localhost:8000")]
    pub host_url: Url,

    /// Address to bind the HTTP listener to
    #[arg(long = "bind", env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// TOML file with `[[agents]]` tables replacing the built-in agents
    #[arg(long, env = "AGENTS_FILE")]
    pub agents_file: Option<PathBuf>,

    /// Per-call timeout of weather lookups, in seconds
    #[arg(long, env = "WEATHER_TIMEOUT_SECS", default_value_t = 10)]
    pub weather_timeout_secs: u64,
}

impl ServerConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.host_url.as_str().trim_end_matches('/').to_string()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_secs)
    }

    /// Agents to serve: the agents file when given, the built-in five otherwise
    pub fn load_agents(&self) -> A2AResult<Vec<AgentSettings>> {
        match &self.agents_file {
            Some(path) => load_agents(path),
            None => Ok(default_agents()),
        }
    }
}

/// Contents of an agents file
#[derive(Debug, Clone, Deserialize)]
pub struct AgentsFile {
    pub agents: Vec<AgentSettings>,
}

impl AgentsFile {
    /// Parse and validate agents from TOML text
    pub fn parse(text: &str) -> A2AResult<Self> {
        let file: AgentsFile = toml::from_str(text)
            .map_err(|e| A2AError::Config(format!("invalid agents file: {e}")))?;

        if file.agents.is_empty() {
            return Err(A2AError::Config("agents file defines no agents".into()));
        }
        validate_agent_ids(&file.agents)?;

        Ok(file)
    }
}

/// Read agents from a TOML file
pub fn load_agents(path: &Path) -> A2AResult<Vec<AgentSettings>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        A2AError::Config(format!("cannot read agents file {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loading agents file");

    Ok(AgentsFile::parse(&text)?.agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENTS: &str = r#"
[[agents]]
id = "ag2"
name = "WeatherAgent-AG2"
description = "Weather agent built with AG2"
framework = "AG2"

[[agents]]
id = "custom"
name = "WeatherAgent-Custom"
description = "In-house weather agent"
framework = "Custom"
"#;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["weather-a2a"]).unwrap();

        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.socket_addr(), "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.weather_timeout(), Duration::from_secs(10));
        assert_eq!(config.load_agents().unwrap().len(), 5);
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "weather-a2a",
            "--host-url",
            "https://weather.example.com/",
            "--bind",
            "127.0.0.1",
            "--port",
            "9000",
            "--weather-timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(config.base_url(), "https://weather.example.com");
        assert_eq!(config.socket_addr(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.weather_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_parse_agents_file() {
        let file = AgentsFile::parse(AGENTS).unwrap();

        assert_eq!(file.agents.len(), 2);
        assert_eq!(file.agents[1].id, "custom");
        assert_eq!(file.agents[1].framework, "Custom");
    }

    #[test]
    fn test_agents_file_rejects_bad_ids() {
        let duplicate = AGENTS.replace("\"custom\"", "\"ag2\"");
        let slash = AGENTS.replace("\"custom\"", "\"a/b\"");
        let empty = AGENTS.replace("\"custom\"", "\"\"");

        for text in [duplicate, slash, empty] {
            assert!(matches!(AgentsFile::parse(&text), Err(A2AError::Config(_))));
        }
    }

    #[test]
    fn test_agents_file_rejects_garbage() {
        assert!(AgentsFile::parse("agents = 3").is_err());
        assert!(AgentsFile::parse("agents = []").is_err());
    }

    #[test]
    fn test_missing_agents_file() {
        let err = load_agents(Path::new("/nonexistent/agents.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read agents file"));
    }
}
