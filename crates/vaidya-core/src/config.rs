use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, VaidyaError};

/// Top-level configuration for the Vaidya application.
///
/// Loaded from `~/.vaidya/config.toml` by default, then overridden by
/// environment variables via [`VaidyaConfig::apply_env`]. Constructed once at
/// process start and passed explicitly to whichever component needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaidyaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for VaidyaConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            graph: GraphConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl VaidyaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VaidyaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VaidyaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Apply overrides from the process environment.
    ///
    /// Recognized variables: `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`,
    /// `GEMINI_API_KEY`, `VAIDYA_PORT`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Split out from
    /// [`apply_env`](Self::apply_env) so tests can supply variables without
    /// mutating the process environment.
    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = get("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Some(user) = get("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Some(password) = get("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
        if let Some(key) = get("GEMINI_API_KEY") {
            self.llm.api_key = key;
        }
        if let Some(port) = get("VAIDYA_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!("Ignoring invalid VAIDYA_PORT value: {}", port),
            }
        }
    }

    /// Fail early when a credential the process cannot run without is absent.
    pub fn validate(&self) -> Result<()> {
        if self.graph.uri.is_empty() {
            return Err(VaidyaError::Config("graph.uri is empty".to_string()));
        }
        if self.llm.api_key.is_empty() {
            return Err(VaidyaError::Config(
                "llm.api_key is empty (set GEMINI_API_KEY)".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8650,
        }
    }
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Bolt URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// Database user.
    pub user: String,
    /// Database password, stored as provided.
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
        }
    }
}

/// Hosted LLM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key for the Gemini service.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Serve the chat endpoint through the graph-to-Cypher chain instead of
    /// the persona interview chain.
    pub graph_qa: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-pro".to_string(),
            graph_qa: false,
        }
    }
}
