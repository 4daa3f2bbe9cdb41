//! API error handling
//!
//! Author: hephaex@gmail.com

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn bad_gateway() -> Self {
        Self::new("KNOWLEDGE_BASE_ERROR", "Knowledge base lookup failed")
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiError::bad_gateway().with_details(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error().with_details(msg),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code = %error.code, details = ?error.details, "Request failed");
        }

        (status, Json(error)).into_response()
    }
}

impl From<nel_core::NelError> for AppError {
    fn from(err: nel_core::NelError) -> Self {
        use nel_core::NelError;

        match err {
            invalid @ (NelError::InvalidContainer(_) | NelError::MalformedAnnotation { .. }) => {
                AppError::BadRequest(invalid.to_string())
            }
            NelError::KnowledgeBase(msg) => AppError::Upstream(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}
