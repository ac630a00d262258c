//! Outcome of a single resolution attempt.

use serde::{Deserialize, Serialize};

use super::{AppSummary, ProductId, SearchCandidate};

/// Outcome of resolving a user query against the catalog.
///
/// A resolution is produced exactly once per user-initiated search; no entity
/// persists beyond it. Transport and upstream failures are not outcomes -
/// they are reported separately so callers can always distinguish a failed
/// call from a well-formed query with zero results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The query resolved to a single application.
    ///
    /// `products` may be empty; callers must render that as a distinct
    /// "no purchasable products" state, not as `NotFound`.
    Resolved {
        app: AppSummary,
        products: Vec<ProductId>,
    },
    /// A free-text search produced candidates the caller must pick from
    /// before resolution can complete.
    NeedsDisambiguation(Vec<SearchCandidate>),
    /// The query was well-formed but the catalog has no matching entry.
    NotFound,
}

impl Resolution {
    /// Whether this outcome is terminal for the caller (no further selection
    /// step is required).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::NeedsDisambiguation(_))
    }
}
