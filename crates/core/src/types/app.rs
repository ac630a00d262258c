//! Application metadata and product identifiers.

use serde::{Deserialize, Serialize};

use super::AppId;

/// String key naming a purchasable item (subscription or in-app purchase)
/// offered by an application.
///
/// Product identifiers are surfaced in the order the upstream catalog returns
/// them; no deduplication is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from its string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Application metadata resolved from the catalog.
///
/// Immutable once fetched; not cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSummary {
    /// Numeric catalog identifier.
    pub id: AppId,
    /// Display name of the application.
    pub name: String,
    /// Reverse-domain bundle identifier of the application.
    pub bundle_id: String,
}

/// One of possibly many results when a free-text search requires
/// disambiguation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Numeric catalog identifier of the candidate.
    pub id: AppId,
    /// Display name of the candidate.
    pub name: String,
    /// URL of the candidate's icon artwork.
    pub icon_url: String,
}
