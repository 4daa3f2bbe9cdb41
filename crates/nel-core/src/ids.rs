//! Annotation identifier generation
//!
//! Identifiers are `<prefix><n>` with a 1-based counter per prefix. The
//! generator never looks at identifiers already present in a container,
//! so it must be reset at the start of every annotate run.

use std::collections::HashMap;

/// Prefix for entity-link annotation ids
pub const ENTITY_LINK_PREFIX: &str = "nel";

/// Prefix for entity-relation annotation ids
pub const ENTITY_RELATION_PREFIX: &str = "nelr";

/// Per-prefix identifier counters scoped to one run
#[derive(Debug, Clone, Default)]
pub struct Identifiers {
    counters: HashMap<String, u64>,
}

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all prefix counters
    pub fn reset(&mut self) {
        self.counters.clear();
    }

    /// Increment the counter for `prefix` and return the new identifier
    pub fn next(&mut self, prefix: &str) -> String {
        let count = self.counters.entry(prefix.to_string()).or_insert(0);
        *count += 1;
        format!("{prefix}{count}")
    }
}
