//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use handlebars::RenderError;
use lead_capture_core::{FieldErrors, SinkError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("lead failed validation: {0}")]
    Invalid(FieldErrors),

    #[error("lead submission failed: {0}")]
    Sink(#[from] SinkError),

    #[error("page rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Sink(_) => StatusCode::BAD_GATEWAY,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Invalid(errors) => (
                status,
                Json(json!({ "status": "invalid", "errors": errors })),
            )
                .into_response(),
            Self::Sink(error) => {
                tracing::warn!(%error, "lead submission failed");
                (
                    status,
                    Json(json!({ "status": "failed", "error": error.to_string() })),
                )
                    .into_response()
            }
            Self::Render(error) => {
                tracing::error!(%error, "failed to render contact page");
                (status, "Internal server error").into_response()
            }
        }
    }
}
