//! HTTP-backed catalog implementation.
//!
//! Product detail is fetched through the relay service (richer product data,
//! upstream-specific request shaping hidden behind it). Bundle lookup and
//! free-text search call the public catalog API directly - those endpoints
//! need no special headers.

use iap_lookup_core::{AppId, AppSummary, ProductId, SearchCandidate};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{CatalogBackend, CatalogError, summary_and_products};

/// Public catalog API base URL.
const PUBLIC_CATALOG_BASE: &str = "https://itunes.apple.com";

/// `reqwest`-backed [`CatalogBackend`].
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    relay_url: String,
    catalog_base: String,
}

impl HttpCatalog {
    /// Create a catalog client that fetches product detail through the relay
    /// at `relay_url`.
    #[must_use]
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url: relay_url.into(),
            catalog_base: PUBLIC_CATALOG_BASE.to_string(),
        }
    }

    /// Override the public catalog base URL (used by tests and self-hosted
    /// mirrors).
    #[must_use]
    pub fn with_catalog_base(mut self, base: impl Into<String>) -> Self {
        self.catalog_base = base.into();
        self
    }

    /// Issue a GET and return the body on success, or a structured error on
    /// a non-success status.
    async fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

impl CatalogBackend for HttpCatalog {
    #[instrument(skip(self), fields(app_id = %id))]
    async fn lookup_products(
        &self,
        id: AppId,
    ) -> Result<Option<(AppSummary, Vec<ProductId>)>, CatalogError> {
        let url = format!("{}?id={id}", self.relay_url);
        let body = self.get_text(&url).await?;

        // An empty or absent payload body means the catalog has no entry.
        if body.trim().is_empty() {
            return Ok(None);
        }

        let payload: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Parse(format!("invalid relay response: {e}")))?;

        Ok(summary_and_products(&payload))
    }

    #[instrument(skip(self), fields(bundle_id = %bundle_id))]
    async fn lookup_bundle(&self, bundle_id: &str) -> Result<Option<AppId>, CatalogError> {
        let url = format!(
            "{}/lookup?bundleId={}",
            self.catalog_base,
            urlencoding::encode(bundle_id)
        );
        let body = self.get_text(&url).await?;

        let page: LookupPage = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Parse(format!("invalid lookup response: {e}")))?;

        debug!(result_count = page.result_count, "bundle lookup complete");
        Ok(page.results.into_iter().next().and_then(|entry| entry.track_id.map(AppId::new)))
    }

    #[instrument(skip(self), fields(term = %term, limit))]
    async fn search(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<SearchCandidate>, CatalogError> {
        let url = format!(
            "{}/search?term={}&entity=software&limit={limit}",
            self.catalog_base,
            urlencoding::encode(term)
        );
        let body = self.get_text(&url).await?;

        let page: LookupPage = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Parse(format!("invalid search response: {e}")))?;

        debug!(result_count = page.result_count, "search complete");
        Ok(page
            .results
            .into_iter()
            .filter_map(|entry| {
                let id = entry.track_id.map(AppId::new)?;
                Some(SearchCandidate {
                    id,
                    name: entry.track_name.unwrap_or_default(),
                    icon_url: entry.artwork_url60.unwrap_or_default(),
                })
            })
            .collect())
    }
}

/// Public catalog lookup/search page: `{ resultCount, results: [...] }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupPage {
    #[serde(default)]
    result_count: u32,
    #[serde(default)]
    results: Vec<LookupEntry>,
}

/// One result entry. Fields are permissive - the catalog omits them freely.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupEntry {
    track_id: Option<u64>,
    track_name: Option<String>,
    #[serde(rename = "artworkUrl60")]
    artwork_url60: Option<String>,
}
