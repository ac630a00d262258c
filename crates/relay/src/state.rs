//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::upstream::CatalogUpstream;

/// Application state shared across all handlers.
///
/// The relay is stateless beyond this: an HTTP client and the selected
/// upstream adapter. Cheaply cloneable via `Arc`; concurrent requests
/// need no coordination.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    client: reqwest::Client,
    upstream: CatalogUpstream,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        let upstream = CatalogUpstream::from_config(config);

        Ok(Self {
            inner: Arc::new(AppStateInner { client, upstream }),
        })
    }

    /// Get a reference to the outbound HTTP client.
    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Get a reference to the configured upstream adapter.
    #[must_use]
    pub fn upstream(&self) -> &CatalogUpstream {
        &self.inner.upstream
    }
}
