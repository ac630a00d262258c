//! Upstream catalog access.
//!
//! The resolver is source-agnostic: it talks to a [`CatalogBackend`] and
//! never knows which concrete API shape answered. [`HttpCatalog`] is the
//! production implementation - product detail goes through the relay
//! service, bundle lookup and free-text search go to the public catalog API
//! directly.

mod extract;
mod http;

pub use extract::summary_and_products;
pub use http::HttpCatalog;

use iap_lookup_core::{AppId, AppSummary, ProductId, SearchCandidate};
use thiserror::Error;

/// Errors that can occur when calling the upstream catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The seam between the resolver and the upstream catalog.
///
/// All operations are single-attempt: no internal retry, no caching. `None`
/// results mean the catalog has no matching entry, which the resolver
/// surfaces as a `NotFound` outcome rather than an error.
#[allow(async_fn_in_trait)] // resolver is generic over the backend, never dyn
pub trait CatalogBackend {
    /// Fetch an app's summary and product identifiers by its identifier.
    ///
    /// Returns `Ok(None)` when the catalog has no entry for `id`. An empty
    /// product list on a known app is still `Some` - those are different
    /// user-facing conditions.
    async fn lookup_products(
        &self,
        id: AppId,
    ) -> Result<Option<(AppSummary, Vec<ProductId>)>, CatalogError>;

    /// Resolve a bundle identifier to a numeric app identifier.
    async fn lookup_bundle(&self, bundle_id: &str) -> Result<Option<AppId>, CatalogError>;

    /// Search for software by name, capped at `limit` results.
    ///
    /// Candidates are returned in upstream order.
    async fn search(&self, term: &str, limit: u32)
    -> Result<Vec<SearchCandidate>, CatalogError>;
}
