//! NEL API Server
//!
//! HTTP server for the entity-linking app.
//!
//! Author: hephaex@gmail.com

use nel_api::{create_router, state::AppState};
use nel_core::config::AppConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (NEL_CONFIG names an optional TOML file)
    let config = match std::env::var("NEL_CONFIG") {
        Ok(path) => AppConfig::from_file(path)?.with_env_override()?,
        Err(_) => AppConfig::from_env()?,
    };

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{},nel_api=debug,tower_http=debug",
            config.logging.level
        )
        .into()
    });
    if config.logging.json_format {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!(
        kb = ?state.config.knowledge_base.provider,
        marker = %state.config.linker.upstream_app_marker,
        "Knowledge base ready"
    );

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("NEL API Server starting on http://{}", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
