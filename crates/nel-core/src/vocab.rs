//! Annotation vocabulary
//!
//! Type URIs consumed and produced by the linker, plus the typed records
//! read from and written to annotation properties.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type URIs
// ============================================================================

pub const NAMED_ENTITY: &str = "http://vocab.lappsgrid.org/NamedEntity";
pub const SYNTACTIC_RELATION: &str = "http://vocab.lappsgrid.org/SyntacticRelation";
pub const LINKED_NAMED_ENTITY: &str = "http://vocab.lappsgrid.org/LinkedNamedEntity";
pub const LINKED_NAMED_ENTITY_RELATION: &str =
    "http://vocab.lappsgrid.org/LinkedNamedEntityRelation";

/// Last path segment of a type URI
pub fn basename(uri: &str) -> &str {
    uri.trim_end_matches('/').rsplit('/').next().unwrap_or(uri)
}

/// Annotation type tag
///
/// Types produced by other tools are carried through untouched as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationType {
    NamedEntity,
    SyntacticRelation,
    EntityLink,
    EntityRelation,
    Other(String),
}

impl AnnotationType {
    /// Get the type URI
    pub fn as_str(&self) -> &str {
        match self {
            Self::NamedEntity => NAMED_ENTITY,
            Self::SyntacticRelation => SYNTACTIC_RELATION,
            Self::EntityLink => LINKED_NAMED_ENTITY,
            Self::EntityRelation => LINKED_NAMED_ENTITY_RELATION,
            Self::Other(uri) => uri,
        }
    }
}

impl From<String> for AnnotationType {
    fn from(uri: String) -> Self {
        match uri.as_str() {
            NAMED_ENTITY => Self::NamedEntity,
            SYNTACTIC_RELATION => Self::SyntacticRelation,
            LINKED_NAMED_ENTITY => Self::EntityLink,
            LINKED_NAMED_ENTITY_RELATION => Self::EntityRelation,
            _ => Self::Other(uri),
        }
    }
}

impl From<&str> for AnnotationType {
    fn from(uri: &str) -> Self {
        Self::from(uri.to_string())
    }
}

impl From<AnnotationType> for String {
    fn from(at_type: AnnotationType) -> Self {
        match at_type {
            AnnotationType::Other(uri) => uri,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Input Records
// ============================================================================

/// Entity mention produced by the upstream recognizer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedEntity {
    pub text: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub start: Option<u64>,

    #[serde(default)]
    pub end: Option<u64>,

    /// Text document the mention was recognized in
    #[serde(default)]
    pub document: Option<String>,

    /// Token index of the mention's syntactic head
    pub root_i: u64,
}

/// Dependency edge between a child token and its head
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyntacticRelation {
    pub child_i: u64,
    pub head_i: u64,
    pub dep: String,
    pub head_text: String,
    pub head_lemma: String,

    #[serde(default)]
    pub document: Option<String>,
}

// ============================================================================
// Output Records
// ============================================================================

/// Entity mention linked to a knowledge-base item.
///
/// Field order is the serialized property order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityLink {
    pub root_i: u64,
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Two linked entities sharing a syntactic head
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRelation {
    pub e1_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e1_label: Option<String>,
    pub e1_root_i: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e1_wikidata_id: Option<String>,
    pub e1_dep: String,

    pub e2_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e2_label: Option<String>,
    pub e2_root_i: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e2_wikidata_id: Option<String>,
    pub e2_dep: String,

    pub rel_text: String,
    pub rel_lemma: String,
    pub rel_i: u64,
}
