//! Relay error responses.
//!
//! Every failure is reported to the client as a structured JSON body with a
//! short machine-readable reason. Upstream failures are captured to Sentry
//! before responding; stack traces and internal endpoint URLs never reach
//! the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Request-level error type for the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The `id` query parameter is absent.
    #[error("missing app ID")]
    MissingAppId,

    /// The single upstream call failed: non-success status, transport error,
    /// or timeout.
    #[error("upstream fetch failed: {0}")]
    FetchFailed(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingAppId => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing app ID" })),
            )
                .into_response(),
            Self::FetchFailed(message) => {
                let event_id = sentry::capture_error(&Self::FetchFailed(message.clone()));
                tracing::error!(
                    error = %message,
                    sentry_event_id = %event_id,
                    "Upstream fetch failed"
                );
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Fetch failed", "message": message })),
                )
                    .into_response()
            }
        }
    }
}
