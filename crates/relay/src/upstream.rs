//! Upstream catalog adapters.
//!
//! The relay supports two upstream shapes behind one interface:
//!
//! - [`CatalogUpstream::PrivateDetail`] - undocumented detail API. Requires a
//!   storefront client user-agent and fresh device-identifier headers on
//!   every request (uniqueness only, no cryptographic requirement). The body
//!   is passed through unmodified.
//! - [`CatalogUpstream::PublicLookup`] - public lookup API. No special
//!   headers; the payload is reshaped into the normalized relay schema
//!   `{ appId, bundleId, appName, productIds }` with missing fields
//!   defaulting to null/empty rather than failing.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::config::{RelayConfig, UpstreamMode};

/// User-agent string impersonating a mobile storefront client.
///
/// Also surfaced to end users by the CLI after a successful lookup, for use
/// with tools that replay storefront requests.
pub const STOREFRONT_USER_AGENT: &str = "AppStore/3.0 iOS/17.0.1 model/iPhone14,2 hw/iPhone";

/// Errors from the single outbound call per relay request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or timeout.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream API error: {0}")]
    Status(u16),

    /// Upstream body was not valid JSON (public shape only).
    #[error("Upstream returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The configured upstream catalog API.
#[derive(Debug, Clone)]
pub enum CatalogUpstream {
    /// Private detail API, pass-through body.
    PrivateDetail { endpoint: String },
    /// Public lookup API, reshaped body.
    PublicLookup { endpoint: String },
}

impl CatalogUpstream {
    /// Select the upstream adapter from configuration.
    #[must_use]
    pub fn from_config(config: &RelayConfig) -> Self {
        match config.upstream_mode {
            UpstreamMode::Private => Self::PrivateDetail {
                endpoint: config.private_api_url.clone(),
            },
            UpstreamMode::Public => Self::PublicLookup {
                endpoint: config.public_api_url.clone(),
            },
        }
    }

    /// Issue exactly one GET to the upstream and return the JSON body to
    /// relay to the client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, timeout, non-success
    /// status, or (public shape) an unparsable body.
    #[instrument(skip(self, client), fields(app_id = %app_id))]
    pub async fn fetch_detail(
        &self,
        client: &reqwest::Client,
        app_id: &str,
    ) -> Result<String, FetchError> {
        match self {
            Self::PrivateDetail { endpoint } => {
                let url = format!("{endpoint}?id={}", urlencoding::encode(app_id));
                let response = client
                    .get(&url)
                    .header(USER_AGENT, STOREFRONT_USER_AGENT)
                    .header(ACCEPT, "application/json")
                    .header(ACCEPT_LANGUAGE, "en-US")
                    // Fresh device identifiers per request; uniqueness is the
                    // only requirement.
                    .header("X-Device-Id", Uuid::new_v4().to_string())
                    .header("X-FaceTime-Device-Id", Uuid::new_v4().to_string())
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }

                Ok(response.text().await?)
            }
            Self::PublicLookup { endpoint } => {
                let url = format!("{endpoint}?id={}", urlencoding::encode(app_id));
                let response = client.get(&url).send().await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }

                let payload: Value = serde_json::from_str(&response.text().await?)?;
                Ok(reshape_lookup(&payload).to_string())
            }
        }
    }
}

/// Reshape a public lookup page into the normalized relay schema.
fn reshape_lookup(payload: &Value) -> Value {
    let first = payload
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first());

    first.map_or_else(
        || json!({ "appId": null, "bundleId": null, "appName": null, "productIds": [] }),
        |entry| {
            json!({
                "appId": entry.get("trackId").cloned().unwrap_or(Value::Null),
                "bundleId": entry.get("bundleId").cloned().unwrap_or(Value::Null),
                "appName": entry.get("trackName").cloned().unwrap_or(Value::Null),
                "productIds": entry
                    .get("inAppPurchases")
                    .cloned()
                    .unwrap_or_else(|| json!([])),
            })
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_selects_shape() {
        let config = RelayConfig::default();
        assert!(matches!(
            CatalogUpstream::from_config(&config),
            CatalogUpstream::PrivateDetail { .. }
        ));

        let config = RelayConfig {
            upstream_mode: UpstreamMode::Public,
            ..RelayConfig::default()
        };
        assert!(matches!(
            CatalogUpstream::from_config(&config),
            CatalogUpstream::PublicLookup { .. }
        ));
    }

    #[test]
    fn test_reshape_full_lookup_page() {
        let payload = json!({
            "resultCount": 1,
            "results": [{
                "trackId": 284_882_215_u64,
                "trackName": "Example",
                "bundleId": "com.example.app",
                "inAppPurchases": ["com.example.app.pro"],
            }],
        });

        let reshaped = reshape_lookup(&payload);
        assert_eq!(
            reshaped,
            json!({
                "appId": 284_882_215_u64,
                "bundleId": "com.example.app",
                "appName": "Example",
                "productIds": ["com.example.app.pro"],
            })
        );
    }

    #[test]
    fn test_reshape_defaults_missing_fields() {
        let payload = json!({
            "resultCount": 1,
            "results": [{ "trackId": 1 }],
        });

        let reshaped = reshape_lookup(&payload);
        assert_eq!(reshaped.get("appId").unwrap(), &json!(1));
        assert_eq!(reshaped.get("bundleId").unwrap(), &Value::Null);
        assert_eq!(reshaped.get("productIds").unwrap(), &json!([]));
    }

    #[test]
    fn test_reshape_empty_page_yields_null_app() {
        let reshaped = reshape_lookup(&json!({ "resultCount": 0, "results": [] }));
        assert_eq!(reshaped.get("appId").unwrap(), &Value::Null);
        assert_eq!(reshaped.get("productIds").unwrap(), &json!([]));
    }

    #[test]
    fn test_status_error_message_does_not_leak_endpoint() {
        let err = FetchError::Status(500);
        assert_eq!(err.to_string(), "Upstream API error: 500");
    }

    #[test]
    fn test_device_ids_are_unique_per_generation() {
        assert_ne!(Uuid::new_v4().to_string(), Uuid::new_v4().to_string());
    }
}
