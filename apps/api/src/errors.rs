use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::outreach::email::EmailError;
use crate::projects::generator::ProjectError;
use crate::uploads::UploadError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to generate email: {0}")]
    Email(#[from] EmailError),

    #[error("Failed to generate project idea: {0}")]
    Project(#[from] ProjectError),

    #[error("Failed to process upload: {0}")]
    Upload(#[from] UploadError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Status and wire code for an upstream failure, keyed by error kind.
fn upstream_status(kind: &str) -> (StatusCode, &'static str) {
    match kind {
        "config_missing" => (StatusCode::SERVICE_UNAVAILABLE, "CONFIG_MISSING"),
        "timeout" => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
        "cancelled" => (StatusCode::SERVICE_UNAVAILABLE, "CANCELLED"),
        "no_response" | "invalid_format" | "empty" | "malformed_json" => {
            (StatusCode::BAD_GATEWAY, "INVALID_UPSTREAM_RESPONSE")
        }
        _ => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
    }
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Email(e) => upstream_status(e.kind()),
            AppError::Project(e) => upstream_status(e.kind()),
            AppError::Upload(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            AppError::Email(e) => {
                tracing::error!(kind = e.kind(), "Email generation failed: {e}");
                self.to_string()
            }
            AppError::Project(e) => {
                tracing::error!(kind = e.kind(), "Project generation failed: {e}");
                self.to_string()
            }
            AppError::Upload(e) => {
                tracing::warn!(kind = e.kind(), "Upload rejected: {e}");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
