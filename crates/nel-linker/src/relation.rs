//! Relation discovery module
//!
//! Pairs linked entities whose syntactic roots attach to the same head
//! token. Entities and dependency edges are only compared within one
//! document scope.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use nel_core::mmif::qualify;
use nel_core::{EntityRelation, KbMatch, SyntacticRelation};

// ============================================================================
// Scopes
// ============================================================================

/// Document partition key for relation discovery
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// Annotations without an explicit document
    Default,
    /// Annotations referring to a named document
    Document(String),
}

impl Scope {
    pub fn of(document: Option<&str>) -> Self {
        match document {
            Some(document) => Self::Document(document.to_string()),
            None => Self::Default,
        }
    }

    /// Document id for records emitted in this scope
    pub fn document_id(&self, qualifier: Option<&str>) -> Option<String> {
        match self {
            Self::Default => None,
            Self::Document(document) => Some(qualify(qualifier, document)),
        }
    }
}

// ============================================================================
// Working Sets
// ============================================================================

/// An entity mention with its knowledge-base match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub text: String,
    pub root_i: u64,
    pub kb: KbMatch,
}

/// Head of a dependency edge, keyed by the child position
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeadLink {
    dep: String,
    head_text: String,
    head_lemma: String,
    head_i: u64,
}

/// Indexes one view's resolved entities and dependency edges
#[derive(Debug, Default)]
pub struct RelationLinker {
    entities: BTreeMap<Scope, BTreeMap<u64, ResolvedEntity>>,
    child_to_head: HashMap<Scope, HashMap<u64, HeadLink>>,
}

impl RelationLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a resolved entity by its root position.
    ///
    /// A later entity with the same root in the same scope replaces the earlier one.
    pub fn add_entity(&mut self, scope: Scope, entity: ResolvedEntity) {
        self.entities
            .entry(scope)
            .or_default()
            .insert(entity.root_i, entity);
    }

    /// Index a dependency edge by its child position
    pub fn add_dependency(&mut self, scope: Scope, edge: SyntacticRelation) {
        self.child_to_head.entry(scope).or_default().insert(
            edge.child_i,
            HeadLink {
                dep: edge.dep,
                head_text: edge.head_text,
                head_lemma: edge.head_lemma,
                head_i: edge.head_i,
            },
        );
    }

    /// Entity pairs sharing a head, ordered by scope then root positions.
    ///
    /// Each pair is reported once, with `e1.root_i < e2.root_i`. The head
    /// text and lemma are taken from e1's edge.
    pub fn relations(&self) -> Vec<(Scope, EntityRelation)> {
        let mut relations = Vec::new();

        for (scope, entities) in &self.entities {
            let Some(heads) = self.child_to_head.get(scope) else {
                continue;
            };

            for (i1, e1) in entities {
                let Some(h1) = heads.get(i1) else {
                    continue;
                };

                for (i2, e2) in entities.range((Bound::Excluded(*i1), Bound::Unbounded)) {
                    let Some(h2) = heads.get(i2) else {
                        continue;
                    };
                    if h1.head_i == h2.head_i {
                        relations.push((scope.clone(), relate(e1, h1, e2, h2)));
                    }
                }
            }
        }

        relations
    }
}

fn relate(e1: &ResolvedEntity, h1: &HeadLink, e2: &ResolvedEntity, h2: &HeadLink) -> EntityRelation {
    EntityRelation {
        e1_text: e1.text.clone(),
        e1_label: e1.kb.label.clone(),
        e1_root_i: e1.root_i,
        e1_wikidata_id: e1.kb.id.clone(),
        e1_dep: h1.dep.clone(),
        e2_text: e2.text.clone(),
        e2_label: e2.kb.label.clone(),
        e2_root_i: e2.root_i,
        e2_wikidata_id: e2.kb.id.clone(),
        e2_dep: h2.dep.clone(),
        rel_text: h1.head_text.clone(),
        rel_lemma: h1.head_lemma.clone(),
        rel_i: h1.head_i,
    }
}

// ============================================================================
// Tests
// ============================================================================
