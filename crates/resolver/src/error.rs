//! Resolution error taxonomy.
//!
//! Outcomes and failures are kept apart: a well-formed query with zero
//! upstream results is [`iap_lookup_core::Resolution::NotFound`], never an
//! error. Errors here are either user-input problems (no network call was
//! made) or failed outbound calls.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors that can occur while resolving a query.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input was empty after trimming. No network call was made; the
    /// caller should prompt for input.
    #[error("query is empty")]
    EmptyQuery,

    /// The input contained a store-URL marker but no extractable
    /// `/id<digits>` segment. Terminal; no network call was made.
    #[error("unable to parse App Store URL")]
    UnparsableUrl,

    /// Transport failure on an outbound call (connection, timeout, or a
    /// malformed response body).
    #[error("network error: {0}")]
    Network(String),

    /// The upstream catalog answered with a non-success HTTP status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },
}

impl From<CatalogError> for ResolveError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Api { status, message } => Self::Upstream { status, message },
            CatalogError::Http(e) => Self::Network(e.to_string()),
            CatalogError::Parse(msg) => Self::Network(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_upstream() {
        let err = ResolveError::from(CatalogError::Api {
            status: 502,
            message: "Fetch failed".to_string(),
        });
        assert!(matches!(err, ResolveError::Upstream { status: 502, .. }));
    }

    #[test]
    fn test_parse_error_maps_to_network() {
        let err = ResolveError::from(CatalogError::Parse("bad json".to_string()));
        assert!(matches!(err, ResolveError::Network(_)));
        assert_eq!(err.to_string(), "network error: bad json");
    }
}
