//! Error taxonomy for the ingestion endpoints.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::metrics;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure kinds raised at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Body is not JSON or does not match the chunk shape
    #[error("Invalid payload: {0}")]
    MalformedPayload(String),

    #[error("Authorization header required")]
    Unauthenticated,

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Processing error: {0}")]
    InternalProcessingError(String),

    /// Body could not be read (for example it exceeded the size limit)
    #[error("Request body rejected: {0}")]
    Body(#[from] BytesRejection),
}

impl IngestError {
    /// Stable label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidCredential => "invalid_credential",
            Self::InternalProcessingError(_) => "internal_processing_error",
            Self::Body(_) => "body_rejected",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::InternalProcessingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Body(rejection) => rejection.status(),
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedPayload(e.to_string())
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();

        if status.is_server_error() {
            error!(kind, error = %self, "Request failed");
        } else {
            warn!(kind, error = %self, "Request rejected");
        }
        metrics::REQUEST_ERRORS.with_label_values(&[kind]).inc();

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
