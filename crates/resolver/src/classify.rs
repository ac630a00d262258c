//! Query classification.
//!
//! Classification is pure string inspection - it never touches the network.
//! The precedence is fixed and first-match-wins: all-digits, store URL,
//! bundle identifier, free text.

use iap_lookup_core::AppId;

use crate::error::ResolveError;

/// Host markers that identify an App Store URL.
const STORE_URL_MARKERS: &[&str] = &["apps.apple.com", "itunes.apple.com"];

/// Reverse-domain prefix convention for bundle identifiers.
const BUNDLE_PREFIX: &str = "com.";

/// A classified user query.
///
/// `NumericId` and `StoreUrl` carry the identifier directly; `BundleId` and
/// `FreeText` still need an upstream resolution call before the identifier
/// is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// All-digit input, parsed as the app identifier.
    NumericId(AppId),
    /// App Store URL with an `/id<digits>` path segment.
    StoreUrl(AppId),
    /// Reverse-domain bundle identifier.
    BundleId(String),
    /// Anything else: a name to search for.
    FreeText(String),
}

/// Classify a raw user query.
///
/// The input is trimmed first; surrounding whitespace never affects the
/// outcome.
///
/// # Errors
///
/// - [`ResolveError::EmptyQuery`] if the trimmed input is empty.
/// - [`ResolveError::UnparsableUrl`] if a store-URL marker is present but no
///   `/id<digits>` segment can be extracted. This is terminal: the input is
///   recognizably a store URL, so falling through to free-text search would
///   only produce nonsense results.
pub fn classify(raw: &str) -> Result<QueryKind, ResolveError> {
    let query = raw.trim();

    if query.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }

    if query.chars().all(|c| c.is_ascii_digit()) {
        // u64 overflow on absurdly long digit strings is still a malformed
        // identifier, not a searchable name.
        let id = query.parse::<AppId>().map_err(|_| ResolveError::UnparsableUrl)?;
        return Ok(QueryKind::NumericId(id));
    }

    if STORE_URL_MARKERS.iter().any(|marker| query.contains(marker)) {
        return extract_url_id(query)
            .map(QueryKind::StoreUrl)
            .ok_or(ResolveError::UnparsableUrl);
    }

    if query.starts_with(BUNDLE_PREFIX) {
        return Ok(QueryKind::BundleId(query.to_string()));
    }

    Ok(QueryKind::FreeText(query.to_string()))
}

/// Extract the identifier from the first `/id<digits>` path segment.
///
/// Surrounding path components and query parameters are ignored; only the
/// digits immediately following `/id` are captured.
fn extract_url_id(url: &str) -> Option<AppId> {
    let mut rest = url;
    while let Some(pos) = rest.find("/id") {
        let after = rest.get(pos + 3..).unwrap_or_default();
        let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            return digits.parse::<AppId>().ok();
        }
        rest = after;
    }
    None
}
