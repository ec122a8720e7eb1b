use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AssistantError, PollError, TranscriptionError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every handler failure funnels through here so each one is logged and
/// answered with a JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Transcription(TranscriptionError::Poll(poll)) => match poll {
                PollError::JobFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                PollError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
                PollError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                PollError::Provider(_) | PollError::UnknownState(_) => StatusCode::BAD_REQUEST,
            },
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
