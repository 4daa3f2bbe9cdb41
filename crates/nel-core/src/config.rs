//! NEL Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Knowledge-base lookup configuration
    pub knowledge_base: KnowledgeBaseConfig,

    /// Linker behaviour
    pub linker: LinkerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        // Server
        if let Ok(host) = std::env::var("NEL_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("NEL_PORT") {
            self.server.port = parse_var("NEL_PORT", port)?;
        }

        // Knowledge base
        if let Ok(provider) = std::env::var("NEL_KB_PROVIDER") {
            self.knowledge_base.provider = provider.parse()?;
        }
        if let Ok(endpoint) = std::env::var("NEL_KB_ENDPOINT") {
            self.knowledge_base.endpoint = endpoint;
        }
        if let Ok(agent) = std::env::var("NEL_KB_USER_AGENT") {
            self.knowledge_base.user_agent = agent;
        }
        if let Ok(path) = std::env::var("NEL_GAZETTEER") {
            self.knowledge_base.gazetteer_path = Some(PathBuf::from(path));
        }

        // Linker
        if let Ok(marker) = std::env::var("NEL_UPSTREAM_MARKER") {
            self.linker.upstream_app_marker = marker;
        }
        if let Ok(limit) = std::env::var("NEL_MAX_CONCURRENT_LOOKUPS") {
            self.linker.max_concurrent_lookups = parse_var("NEL_MAX_CONCURRENT_LOOKUPS", limit)?;
        }
        if let Ok(flag) = std::env::var("NEL_EMIT_RELATIONS") {
            self.linker.emit_relations = parse_var("NEL_EMIT_RELATIONS", flag)?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(flag) = std::env::var("LOG_JSON") {
            self.logging.json_format = parse_var("LOG_JSON", flag)?;
        }

        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Knowledge-base configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    /// Knowledge base to query
    pub provider: KnowledgeBaseProvider,

    /// Search API endpoint
    pub endpoint: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Gazetteer JSON file (gazetteer provider only)
    pub gazetteer_path: Option<PathBuf>,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            provider: KnowledgeBaseProvider::Wikidata,
            endpoint: "https://www.wikidata.org/w/api.php".to_string(),
            user_agent: format!("nel/{} (https://github.com/hephaex/nel)", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            gazetteer_path: None,
        }
    }
}

/// Supported knowledge-base providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeBaseProvider {
    Wikidata,
    Gazetteer,
}

impl std::str::FromStr for KnowledgeBaseProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wikidata" => Ok(Self::Wikidata),
            "gazetteer" => Ok(Self::Gazetteer),
            _ => Err(ConfigError::InvalidValue {
                key: "NEL_KB_PROVIDER".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Linker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Token identifying views produced by the upstream NER app
    pub upstream_app_marker: String,

    /// Knowledge-base lookups in flight per view (1 = sequential)
    pub max_concurrent_lookups: usize,

    /// Emit entity-relation annotations
    pub emit_relations: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            upstream_app_marker: "spacy_nlp".to_string(),
            max_concurrent_lookups: 1,
            emit_relations: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
