//! NEL Core - Container model, vocabulary, and shared traits
//!
//! This crate defines the core abstractions used throughout the NEL system:
//! - MMIF container model (container, views, annotations)
//! - Annotation vocabulary and typed input/output records
//! - Per-run annotation identifier generation
//! - App metadata declaration
//! - Common error types
//! - The knowledge-base search trait
//! - Configuration management

pub mod config;
pub mod ids;
pub mod metadata;
pub mod mmif;
pub mod vocab;

pub use config::{
    AppConfig, ConfigError, KnowledgeBaseConfig, KnowledgeBaseProvider, LinkerConfig,
    LoggingConfig, ServerConfig,
};
pub use ids::Identifiers;
pub use metadata::AppMetadata;
pub use mmif::{Annotation, Contain, Contains, Mmif, Properties, View, ViewMetadata};
pub use vocab::{AnnotationType, EntityLink, EntityRelation, NamedEntity, SyntacticRelation};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for NEL operations
#[derive(Error, Debug)]
pub enum NelError {
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    #[error("Malformed annotation {annotation} in view {view}: {reason}")]
    MalformedAnnotation {
        view: String,
        annotation: String,
        reason: String,
    },

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NelError>;

impl From<ConfigError> for NelError {
    fn from(err: ConfigError) -> Self {
        NelError::ConfigError(err.to_string())
    }
}

// ============================================================================
// Knowledge Base Search
// ============================================================================

/// Result type requested from the knowledge base
pub const RESULT_TYPE_ITEM: &str = "item";

/// Language used for knowledge-base lookups
pub const SEARCH_LANGUAGE: &str = "en";

/// A knowledge-base search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Text to search for
    pub query: String,

    /// Kind of record to return (e.g. "item")
    pub result_type: String,

    /// Language of labels and descriptions
    pub language: String,

    /// Maximum number of candidates
    pub limit: usize,
}

impl SearchQuery {
    /// Top-ranked English item lookup for a surface text
    pub fn item(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            result_type: RESULT_TYPE_ITEM.to_string(),
            language: SEARCH_LANGUAGE.to_string(),
            limit: 1,
        }
    }
}

/// One candidate returned by a knowledge-base search.
///
/// Every field is optional; fields missing from the response are
/// omitted from the emitted records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Trait for knowledge-base search backends
#[async_trait::async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Search for candidates, best match first
    async fn search(&self, query: &SearchQuery) -> Result<Vec<KbMatch>>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
