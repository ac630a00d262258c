//! Payload extraction.
//!
//! The relay may answer with one of three shapes depending on which upstream
//! it is configured for:
//!
//! - the normalized relay schema `{ appId, bundleId, appName, productIds }`
//! - a pass-through of the private detail API
//!   (`data.subscriptionGroup[*].products[*].productId`)
//! - a public lookup page (`results[0].inAppPurchases[*]`)
//!
//! Extraction tries them in that order, tolerates missing nested fields by
//! defaulting to null/empty, and preserves upstream product order without
//! deduplication. It is a pure function of the payload, so calling it twice
//! yields the same sequence.

use iap_lookup_core::{AppId, AppSummary, ProductId};
use serde_json::Value;

/// Extract an app summary and its ordered product identifiers.
///
/// Returns `None` when the payload matches none of the known shapes - the
/// catalog equivalent of an absent body, which callers treat as not-found.
#[must_use]
pub fn summary_and_products(payload: &Value) -> Option<(AppSummary, Vec<ProductId>)> {
    from_normalized(payload)
        .or_else(|| from_private_detail(payload))
        .or_else(|| from_lookup_page(payload))
}

/// Normalized relay schema: `{ appId, bundleId, appName, productIds }`.
fn from_normalized(payload: &Value) -> Option<(AppSummary, Vec<ProductId>)> {
    let id = value_as_app_id(payload.get("appId")?)?;
    let summary = AppSummary {
        id,
        name: string_or_empty(payload.get("appName")),
        bundle_id: string_or_empty(payload.get("bundleId")),
    };
    let products = payload
        .get("productIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(ProductId::new)
                .collect()
        })
        .unwrap_or_default();
    Some((summary, products))
}

/// Private detail API pass-through: product identifiers live under
/// `data.subscriptionGroup[*].products[*].productId`.
fn from_private_detail(payload: &Value) -> Option<(AppSummary, Vec<ProductId>)> {
    let data = payload.get("data")?;
    let id = value_as_app_id(data.get("id")?)?;
    let summary = AppSummary {
        id,
        name: string_or_empty(data.get("name")),
        bundle_id: string_or_empty(data.get("bundleId")),
    };

    let products = data
        .get("subscriptionGroup")
        .and_then(Value::as_array)
        .map(|groups| {
            groups
                .iter()
                .filter_map(|group| group.get("products").and_then(Value::as_array))
                .flatten()
                .filter_map(|product| product.get("productId").and_then(Value::as_str))
                .map(ProductId::new)
                .collect()
        })
        .unwrap_or_default();

    Some((summary, products))
}

/// Public lookup page: `{ resultCount, results: [...] }` with the app's
/// purchases under `results[0].inAppPurchases`.
fn from_lookup_page(payload: &Value) -> Option<(AppSummary, Vec<ProductId>)> {
    let first = payload
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())?;
    let id = value_as_app_id(first.get("trackId")?)?;
    let summary = AppSummary {
        id,
        name: string_or_empty(first.get("trackName")),
        bundle_id: string_or_empty(first.get("bundleId")),
    };
    let products = first
        .get("inAppPurchases")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(ProductId::new)
                .collect()
        })
        .unwrap_or_default();
    Some((summary, products))
}

/// Identifiers arrive as JSON numbers from some upstreams and strings from
/// others.
fn value_as_app_id(value: &Value) -> Option<AppId> {
    if let Some(n) = value.as_u64() {
        return Some(AppId::new(n));
    }
    value.as_str()?.parse().ok()
}

fn string_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}
