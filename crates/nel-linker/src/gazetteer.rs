//! Offline knowledge base backed by a surface-text lookup table
//!
//! The JSON form maps a surface text to its ranked candidates:
//!
//! ```json
//! {"Paris": [{"id": "Q90", "label": "Paris", "description": "capital of France"}]}
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use nel_core::{KbMatch, KnowledgeBase, NelError, Result, SearchQuery};

/// In-memory knowledge base
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, Vec<KbMatch>>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate for `text` (ranked after existing ones)
    pub fn with_entry(mut self, text: impl Into<String>, candidate: KbMatch) -> Self {
        self.entries.entry(text.into()).or_default().push(candidate);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json)
            .map_err(|e| NelError::ConfigError(format!("Invalid gazetteer: {e}")))?;
        Ok(Self { entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KnowledgeBase for Gazetteer {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<KbMatch>> {
        Ok(self
            .entries
            .get(&query.query)
            .map(|candidates| candidates.iter().take(query.limit).cloned().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "gazetteer"
    }
}
