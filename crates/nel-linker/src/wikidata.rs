//! Wikidata search client
//!
//! Queries the `wbsearchentities` action of the MediaWiki API.
//!
//! Author: hephaex@gmail.com

use std::time::Duration;

use async_trait::async_trait;
use nel_core::{KbMatch, KnowledgeBase, KnowledgeBaseConfig, NelError, Result, SearchQuery};
use reqwest::Client;
use serde::Deserialize;

/// Wikidata API client
pub struct WikidataClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<KbMatch>,

    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

impl WikidataClient {
    /// Create a new client with a default HTTP client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create from config
    pub fn from_config(config: &KnowledgeBaseConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NelError::ConfigError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Query string for a search request
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    vec![
        ("action", "wbsearchentities".to_string()),
        ("format", "json".to_string()),
        ("language", query.language.clone()),
        ("type", query.result_type.clone()),
        ("search", query.query.clone()),
        ("limit", query.limit.to_string()),
    ]
}

/// Extract candidates from a `wbsearchentities` response body
fn parse_search_response(body: &str) -> Result<Vec<KbMatch>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| NelError::KnowledgeBase(format!("Failed to parse response: {e}")))?;

    if let Some(error) = response.error {
        return Err(NelError::KnowledgeBase(format!(
            "Wikidata error {}: {}",
            error.code, error.info
        )));
    }

    Ok(response.search)
}

#[async_trait]
impl KnowledgeBase for WikidataClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<KbMatch>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&search_params(query))
            .send()
            .await
            .map_err(|e| NelError::KnowledgeBase(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NelError::KnowledgeBase(format!(
                "Wikidata returned {status}: {error_text}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NelError::KnowledgeBase(format!("Failed to read response: {e}")))?;

        parse_search_response(&body)
    }

    fn name(&self) -> &str {
        "wikidata"
    }
}
