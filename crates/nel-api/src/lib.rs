//! NEL API - HTTP server
//!
//! Serves the app metadata and annotates MMIF containers posted to it.

pub mod error;
pub mod handlers;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// OpenAPI document
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::metadata::get_metadata,
        handlers::annotate::annotate,
        handlers::health::health_check,
    ),
    components(schemas(error::ApiError)),
    tags(
        (name = "app", description = "Entity linking"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the router; annotate accepts both POST and PUT
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .route(
            "/",
            get(handlers::metadata::get_metadata)
                .post(handlers::annotate::annotate)
                .put(handlers::annotate::annotate),
        )
        .route("/health", get(handlers::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
