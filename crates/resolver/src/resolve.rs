//! Resolution orchestration.
//!
//! [`Resolver`] drives the sequence of upstream calls for each query kind:
//!
//! ```text
//! NumericId / StoreUrl -> product lookup
//! BundleId             -> bundle lookup -> product lookup
//! FreeText             -> search -> (caller picks) -> product lookup
//! ```
//!
//! Every resolution is a single attempt with no retry and no shared state;
//! each call discards anything from the previous one.

use std::time::Duration;

use iap_lookup_core::{AppId, Resolution, SearchCandidate};
use tracing::{info, instrument, warn};

use crate::catalog::CatalogBackend;
use crate::classify::{QueryKind, classify};
use crate::error::ResolveError;

/// Long-lived catalog entry used as the availability probe target.
const PROBE_APP_ID: AppId = AppId::new(284_882_215);

/// Default timeout for the availability pre-flight.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Resolver behavior knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of free-text search candidates to request.
    pub search_limit: u32,
    /// When a free-text search yields exactly one candidate, resolve it
    /// immediately instead of asking the caller to confirm the selection.
    pub auto_select_single_match: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_limit: 10,
            auto_select_single_match: false,
        }
    }
}

/// Orchestrates classification and upstream calls to produce a
/// [`Resolution`].
#[derive(Clone)]
pub struct Resolver<C> {
    catalog: C,
    config: ResolverConfig,
}

impl<C: CatalogBackend> Resolver<C> {
    /// Create a resolver over the given catalog backend.
    pub const fn new(catalog: C, config: ResolverConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve a raw user query.
    ///
    /// Single attempt, no internal retry. Classification failures surface
    /// before any network call is made.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`]. `NotFound` is not an error - it is a
    /// [`Resolution`] variant.
    #[instrument(skip(self, raw_query), fields(query_len = raw_query.len()))]
    pub async fn resolve(&self, raw_query: &str) -> Result<Resolution, ResolveError> {
        match classify(raw_query)? {
            QueryKind::NumericId(id) | QueryKind::StoreUrl(id) => self.lookup_products(id).await,
            QueryKind::BundleId(bundle) => match self.catalog.lookup_bundle(&bundle).await? {
                Some(id) => self.lookup_products(id).await,
                None => {
                    info!(%bundle, "bundle lookup returned no results");
                    Ok(Resolution::NotFound)
                }
            },
            QueryKind::FreeText(term) => self.search(&term).await,
        }
    }

    /// Complete a resolution that previously returned
    /// [`Resolution::NeedsDisambiguation`] by selecting one candidate.
    ///
    /// # Errors
    ///
    /// Fails with [`ResolveError::Network`] or [`ResolveError::Upstream`] if
    /// the product lookup fails.
    #[instrument(skip(self, candidate), fields(app_id = %candidate.id))]
    pub async fn select_candidate(
        &self,
        candidate: &SearchCandidate,
    ) -> Result<Resolution, ResolveError> {
        self.lookup_products(candidate.id).await
    }

    /// One-shot availability pre-flight through the product lookup path.
    ///
    /// Probes a fixed, known-good identifier and treats any error - or no
    /// response within `timeout` - as unavailable. Intended as a gate before
    /// a full search, not as a monitoring loop.
    pub async fn check_availability(&self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.catalog.lookup_products(PROBE_APP_ID)).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                warn!(error = %err, "availability probe failed");
                false
            }
            Err(_) => {
                warn!(timeout_ms = %timeout.as_millis(), "availability probe timed out");
                false
            }
        }
    }

    async fn lookup_products(&self, id: AppId) -> Result<Resolution, ResolveError> {
        match self.catalog.lookup_products(id).await? {
            Some((app, products)) => {
                info!(app_id = %app.id, product_count = products.len(), "resolved");
                Ok(Resolution::Resolved { app, products })
            }
            None => Ok(Resolution::NotFound),
        }
    }

    async fn search(&self, term: &str) -> Result<Resolution, ResolveError> {
        let candidates = self.catalog.search(term, self.config.search_limit).await?;

        if candidates.is_empty() {
            return Ok(Resolution::NotFound);
        }

        if self.config.auto_select_single_match
            && let [only] = candidates.as_slice()
        {
            let id = only.id;
            info!(app_id = %id, "auto-selecting single search match");
            return self.lookup_products(id).await;
        }

        Ok(Resolution::NeedsDisambiguation(candidates))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use iap_lookup_core::{AppSummary, ProductId};

    use super::*;
    use crate::catalog::CatalogError;

    /// Which endpoint a fake call hit, in call order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Products(AppId),
        Bundle(String),
        Search { term: String, limit: u32 },
    }

    /// In-memory catalog recording every call it receives.
    #[derive(Default)]
    struct FakeCatalog {
        calls: Mutex<Vec<Call>>,
        app: Option<(AppSummary, Vec<ProductId>)>,
        bundle_result: Option<AppId>,
        search_results: Vec<SearchCandidate>,
        fail_with: Option<u16>,
    }

    impl FakeCatalog {
        fn with_app(id: u64, products: &[&str]) -> Self {
            Self {
                app: Some((
                    AppSummary {
                        id: AppId::new(id),
                        name: "Example".to_string(),
                        bundle_id: "com.example.app".to_string(),
                    },
                    products.iter().copied().map(ProductId::new).collect(),
                )),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn maybe_fail(&self) -> Result<(), CatalogError> {
            match self.fail_with {
                Some(status) => Err(CatalogError::Api {
                    status,
                    message: "Fetch failed".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    impl CatalogBackend for &FakeCatalog {
        async fn lookup_products(
            &self,
            id: AppId,
        ) -> Result<Option<(AppSummary, Vec<ProductId>)>, CatalogError> {
            self.record(Call::Products(id));
            self.maybe_fail()?;
            Ok(self.app.clone())
        }

        async fn lookup_bundle(&self, bundle_id: &str) -> Result<Option<AppId>, CatalogError> {
            self.record(Call::Bundle(bundle_id.to_string()));
            self.maybe_fail()?;
            Ok(self.bundle_result)
        }

        async fn search(
            &self,
            term: &str,
            limit: u32,
        ) -> Result<Vec<SearchCandidate>, CatalogError> {
            self.record(Call::Search {
                term: term.to_string(),
                limit,
            });
            self.maybe_fail()?;
            Ok(self.search_results.clone())
        }
    }

    fn candidate(id: u64, name: &str) -> SearchCandidate {
        SearchCandidate {
            id: AppId::new(id),
            name: name.to_string(),
            icon_url: format!("https://icons.example/{id}.png"),
        }
    }

    fn resolver(catalog: &FakeCatalog) -> Resolver<&FakeCatalog> {
        Resolver::new(catalog, ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_numeric_id_goes_straight_to_product_lookup() {
        let catalog = FakeCatalog::with_app(284_882_215, &["com.example.app.monthly"]);

        let resolution = resolver(&catalog).resolve("284882215").await.unwrap();

        assert!(matches!(resolution, Resolution::Resolved { .. }));
        // Neither the search nor the bundle-lookup endpoint is called.
        assert_eq!(catalog.calls(), vec![Call::Products(AppId::new(284_882_215))]);
    }

    #[tokio::test]
    async fn test_store_url_behaves_like_numeric_id() {
        let catalog = FakeCatalog::with_app(284_882_215, &["com.example.app.monthly"]);

        let resolution = resolver(&catalog)
            .resolve("https://apps.apple.com/us/app/x/id284882215")
            .await
            .unwrap();

        assert!(matches!(resolution, Resolution::Resolved { .. }));
        assert_eq!(catalog.calls(), vec![Call::Products(AppId::new(284_882_215))]);
    }

    #[tokio::test]
    async fn test_unparsable_url_makes_no_network_calls() {
        let catalog = FakeCatalog::default();

        let err = resolver(&catalog)
            .resolve("https://apps.apple.com/us/charts")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::UnparsableUrl));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_network_calls() {
        let catalog = FakeCatalog::default();

        let err = resolver(&catalog).resolve("   ").await.unwrap_err();

        assert!(matches!(err, ResolveError::EmptyQuery));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bundle_id_resolves_via_bundle_lookup() {
        let mut catalog = FakeCatalog::with_app(123, &[]);
        catalog.bundle_result = Some(AppId::new(123));

        let resolution = resolver(&catalog).resolve("com.example.app").await.unwrap();

        assert!(matches!(resolution, Resolution::Resolved { .. }));
        // Bundle lookup happens before any product lookup.
        assert_eq!(
            catalog.calls(),
            vec![
                Call::Bundle("com.example.app".to_string()),
                Call::Products(AppId::new(123)),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_bundle_is_not_found_without_product_lookup() {
        let catalog = FakeCatalog::default();

        let resolution = resolver(&catalog).resolve("com.example.app").await.unwrap();

        assert_eq!(resolution, Resolution::NotFound);
        assert_eq!(catalog.calls(), vec![Call::Bundle("com.example.app".to_string())]);
    }

    #[tokio::test]
    async fn test_free_text_searches_with_configured_limit() {
        let mut catalog = FakeCatalog::default();
        catalog.search_results = vec![candidate(1, "One"), candidate(2, "Two"), candidate(3, "Three")];

        let resolution = resolver(&catalog).resolve("Example App").await.unwrap();

        let Resolution::NeedsDisambiguation(candidates) = resolution else {
            panic!("expected disambiguation");
        };
        assert_eq!(candidates.len(), 3);
        // Upstream order is preserved.
        assert_eq!(candidates.first().unwrap().name, "One");
        assert_eq!(
            catalog.calls(),
            vec![Call::Search {
                term: "Example App".to_string(),
                limit: 10,
            }]
        );
    }

    #[tokio::test]
    async fn test_free_text_with_no_results_is_not_found() {
        let catalog = FakeCatalog::default();

        let resolution = resolver(&catalog).resolve("No Such App").await.unwrap();

        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_single_match_still_requires_selection_by_default() {
        let mut catalog = FakeCatalog::with_app(1, &[]);
        catalog.search_results = vec![candidate(1, "One")];

        let resolution = resolver(&catalog).resolve("One").await.unwrap();

        let Resolution::NeedsDisambiguation(candidates) = resolution else {
            panic!("expected disambiguation");
        };
        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_single_match_auto_selects_when_configured() {
        let mut catalog = FakeCatalog::with_app(1, &["com.one.pro"]);
        catalog.search_results = vec![candidate(1, "One")];

        let config = ResolverConfig {
            auto_select_single_match: true,
            ..ResolverConfig::default()
        };
        let resolution = Resolver::new(&catalog, config).resolve("One").await.unwrap();

        assert!(matches!(resolution, Resolution::Resolved { .. }));
        assert_eq!(
            catalog.calls(),
            vec![
                Call::Search {
                    term: "One".to_string(),
                    limit: 10,
                },
                Call::Products(AppId::new(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_select_candidate_looks_up_that_candidate_only() {
        let catalog = FakeCatalog::with_app(2, &["com.two.pro"]);

        let resolution = resolver(&catalog)
            .select_candidate(&candidate(2, "Two"))
            .await
            .unwrap();

        assert!(matches!(resolution, Resolution::Resolved { .. }));
        assert_eq!(catalog.calls(), vec![Call::Products(AppId::new(2))]);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_distinguishable_from_not_found() {
        let mut catalog = FakeCatalog::default();
        catalog.fail_with = Some(502);

        let err = resolver(&catalog).resolve("284882215").await.unwrap_err();

        assert!(matches!(err, ResolveError::Upstream { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_resolved_app_without_products_is_still_resolved() {
        let catalog = FakeCatalog::with_app(5, &[]);

        let resolution = resolver(&catalog).resolve("5").await.unwrap();

        let Resolution::Resolved { products, .. } = resolution else {
            panic!("expected resolved");
        };
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_check_availability_probes_product_lookup() {
        let catalog = FakeCatalog::with_app(284_882_215, &[]);

        let available = resolver(&catalog)
            .check_availability(Duration::from_millis(100))
            .await;

        assert!(available);
        assert_eq!(catalog.calls(), vec![Call::Products(PROBE_APP_ID)]);
    }

    #[tokio::test]
    async fn test_check_availability_reports_failure() {
        let mut catalog = FakeCatalog::default();
        catalog.fail_with = Some(500);

        let available = resolver(&catalog)
            .check_availability(Duration::from_millis(100))
            .await;

        assert!(!available);
    }
}
