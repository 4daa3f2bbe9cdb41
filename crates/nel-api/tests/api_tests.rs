//! API Integration Tests
//!
//! Drives the router with an offline gazetteer instead of Wikidata.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use nel_api::{create_router, state::AppState};
use nel_core::{AppConfig, KbMatch, KnowledgeBase, NelError, SearchQuery};
use nel_linker::Gazetteer;
use serde_json::{json, Value};
use tower::ServiceExt;

struct Unreachable;

#[async_trait]
impl KnowledgeBase for Unreachable {
    async fn search(&self, _query: &SearchQuery) -> nel_core::Result<Vec<KbMatch>> {
        Err(NelError::KnowledgeBase("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

fn router_with(kb: Arc<dyn KnowledgeBase>) -> Router {
    create_router(Arc::new(AppState::new(AppConfig::default(), kb)))
}

fn router() -> Router {
    let kb = Gazetteer::new().with_entry(
        "Paris",
        KbMatch {
            id: Some("Q90".to_string()),
            label: Some("Paris".to_string()),
            description: Some("capital of France".to_string()),
            url: Some("//www.wikidata.org/wiki/Q90".to_string()),
        },
    );
    router_with(Arc::new(kb))
}

fn sample_mmif() -> Value {
    json!({
        "metadata": {"mmif": "http://mmif.clams.ai/0.4.0"},
        "documents": [],
        "views": [{
            "id": "v1",
            "metadata": {
                "app": "https://apps.clams.ai/spacy_nlp/0.0.8",
                "contains": {"http://vocab.lappsgrid.org/NamedEntity": {"document": "m1"}}
            },
            "annotations": [{
                "@type": "http://vocab.lappsgrid.org/NamedEntity",
                "properties": {"id": "ne_0", "start": 0, "end": 5, "text": "Paris",
                               "category": "GPE", "root_i": 0}
            }]
        }]
    })
}

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Metadata and Health
// =============================================================================

#[tokio::test]
async fn test_metadata() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["identifier"], "https://apps.clams.ai/named_entity_linking");
    assert_eq!(json["input"][0]["@type"], "http://vocab.lappsgrid.org/NamedEntity");
    assert_eq!(json["output"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_health_check() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["total_requests"].is_number());
}

#[tokio::test]
async fn test_openapi_document() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["paths"]["/"].is_object());
    assert!(json["paths"]["/health"].is_object());
}

// =============================================================================
// Annotate
// =============================================================================

#[tokio::test]
async fn test_annotate_post() {
    let request = create_json_request("POST", "/", &sample_mmif().to_string());
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let views = json["views"].as_array().unwrap();
    assert_eq!(views.len(), 2);

    let view = &views[1];
    assert_eq!(view["id"], "v_1");
    assert_eq!(
        view["metadata"]["contains"]["http://vocab.lappsgrid.org/LinkedNamedEntity"]["document"],
        "v1:m1"
    );
    let link = &view["annotations"][0];
    assert_eq!(link["@type"], "http://vocab.lappsgrid.org/LinkedNamedEntity");
    assert_eq!(link["properties"]["id"], "nel1");
    assert_eq!(link["properties"]["wikidata_id"], "Q90");
}

#[tokio::test]
async fn test_annotate_put_pretty() {
    let request = create_json_request("PUT", "/?pretty=true", &sample_mmif().to_string());
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );

    let text = body_text(response).await;
    assert!(text.contains("\n  \"metadata\""));
}

#[tokio::test]
async fn test_annotate_malformed_container() {
    let request = create_json_request("POST", "/", "{\"views\": ");
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_annotate_knowledge_base_down() {
    let request = create_json_request("POST", "/", &sample_mmif().to_string());
    let response = router_with(Arc::new(Unreachable))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["code"], "KNOWLEDGE_BASE_ERROR");
    assert!(json["details"].as_str().unwrap().contains("connection refused"));
}
