//! HTTP route handlers for the relay.
//!
//! # Route Structure
//!
//! ```text
//! GET /?id=<identifier>  - Forward a catalog detail lookup
//! GET /health            - Liveness check
//! ```
//!
//! Every response - success or error - carries `Access-Control-Allow-Origin:
//! *`, `Access-Control-Allow-Methods: GET`, and `Cache-Control: no-store`.
//! Only GET is routed; anything else gets `405`.

use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::error::RelayError;
use crate::state::AppState;

/// Lookup query parameters.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    id: Option<String>,
}

/// Forward a catalog detail lookup for the given identifier.
///
/// The identifier is treated as opaque and forwarded as-is; validation
/// beyond presence is the upstream's business.
#[instrument(skip(state, params))]
async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Response, RelayError> {
    let app_id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(RelayError::MissingAppId)?;

    let body = state
        .upstream()
        .fetch_detail(state.client(), &app_id)
        .await
        .map_err(|e| RelayError::FetchFailed(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not call the upstream.
async fn health() -> &'static str {
    "ok"
}

/// Build the relay router with all response-header layers applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(lookup))
        .route("/health", get(health))
        // Set unconditionally (not via a CORS middleware) so that error
        // responses carry the headers too, and intermediate caches are
        // disabled on every path.
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
