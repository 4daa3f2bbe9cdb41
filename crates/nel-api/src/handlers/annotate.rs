//! Annotate handler
//!
//! Author: hephaex@gmail.com

use crate::error::{ApiError, AppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Query parameters for annotate requests
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnnotateParams {
    /// Indent the returned container
    #[serde(default)]
    #[param(default = false)]
    pub pretty: bool,
}

/// Link the entities in an MMIF container and return the enriched container
#[utoipa::path(
    post,
    path = "/",
    tag = "app",
    params(AnnotateParams),
    request_body(content = String, description = "MMIF container", content_type = "application/json"),
    responses(
        (status = 200, description = "Enriched MMIF container"),
        (status = 400, description = "Malformed container", body = ApiError),
        (status = 502, description = "Knowledge base unavailable", body = ApiError)
    )
)]
pub async fn annotate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnnotateParams>,
    body: String,
) -> Result<Response, AppError> {
    state.increment_requests();

    let output = state.app.annotate_json(&body, params.pretty).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], output).into_response())
}
