//! Shared builders for linker integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use nel_core::{KbMatch, KnowledgeBase, LinkerConfig, Mmif, NelError, Result, SearchQuery};
use nel_linker::{Gazetteer, NelApp};
use serde_json::{json, Value};

pub const SPACY_APP: &str = "https://apps.clams.ai/spacy_nlp/0.0.8";
pub const NE: &str = "http://vocab.lappsgrid.org/NamedEntity";
pub const DEP: &str = "http://vocab.lappsgrid.org/SyntacticRelation";
pub const NEL: &str = "http://vocab.lappsgrid.org/LinkedNamedEntity";
pub const NELR: &str = "http://vocab.lappsgrid.org/LinkedNamedEntityRelation";

pub fn kb_match(id: &str, label: &str) -> KbMatch {
    KbMatch {
        id: Some(id.to_string()),
        label: Some(label.to_string()),
        description: Some(format!("description of {label}")),
        url: Some(format!("//www.wikidata.org/wiki/{id}")),
    }
}

pub fn entity(id: &str, text: &str, root_i: u64) -> Value {
    json!({
        "@type": NE,
        "properties": {
            "id": id, "start": 0, "end": text.len(), "text": text,
            "category": "GPE", "root_i": root_i
        }
    })
}

pub fn entity_in(id: &str, text: &str, root_i: u64, document: &str) -> Value {
    let mut value = entity(id, text, root_i);
    value["properties"]["document"] = json!(document);
    value
}

pub fn dependency(id: &str, child_i: u64, head_i: u64, dep: &str) -> Value {
    json!({
        "@type": DEP,
        "properties": {
            "id": id, "child_i": child_i, "head_i": head_i, "dep": dep,
            "head_text": format!("head{head_i}"), "head_lemma": format!("lemma{head_i}")
        }
    })
}

pub fn dependency_in(id: &str, child_i: u64, head_i: u64, dep: &str, document: &str) -> Value {
    let mut value = dependency(id, child_i, head_i, dep);
    value["properties"]["document"] = json!(document);
    value
}

/// Spacy view whose entities belong to a declared document
pub fn spacy_view(id: &str, document: Option<&str>, annotations: Vec<Value>) -> Value {
    let contain = match document {
        Some(document) => json!({ "document": document }),
        None => json!({}),
    };
    json!({
        "id": id,
        "metadata": {
            "app": SPACY_APP,
            "contains": { NE: contain, DEP: {} }
        },
        "annotations": annotations
    })
}

pub fn container(views: Vec<Value>) -> Mmif {
    let value = json!({
        "metadata": { "mmif": "http://mmif.clams.ai/0.4.0" },
        "documents": [
            { "@type": "http://mmif.clams.ai/0.4.0/vocabulary/TextDocument",
              "properties": { "id": "m1", "text": { "@value": "Merkel met Obama in Paris." } } }
        ],
        "views": views
    });
    serde_json::from_value(value).expect("valid container")
}

pub fn app(kb: Gazetteer) -> NelApp {
    NelApp::new(Arc::new(kb), LinkerConfig::default())
}

pub fn app_with(kb: Gazetteer, config: LinkerConfig) -> NelApp {
    NelApp::new(Arc::new(kb), config)
}

/// Knowledge base that always fails
pub struct Unreachable;

#[async_trait]
impl KnowledgeBase for Unreachable {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<KbMatch>> {
        Err(NelError::KnowledgeBase("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}
