//! Rendering contract for front ends.
//!
//! The resolver never reaches into a UI; front ends implement [`RenderSink`]
//! and are handed every outcome through it. The invariant callers must hold:
//! every `loading(true)` is balanced by exactly one terminal render call
//! (`result`, `candidates`, or `error`) followed by `loading(false)` - a
//! front end is never left in an indefinite loading state.

use iap_lookup_core::{AppSummary, ProductId, Resolution, SearchCandidate};

use crate::error::ResolveError;

/// Rendering collaborator a front end implements.
pub trait RenderSink {
    /// Enter or leave the loading state. Front ends should also use this to
    /// guard against re-entrant searches while a resolution is in flight.
    fn loading(&mut self, active: bool);

    /// Render a terminal error or empty-outcome message.
    fn error(&mut self, message: &str);

    /// Render a resolved application and its ordered product identifiers.
    fn result(&mut self, app: &AppSummary, products: &[ProductId]);

    /// Render search candidates awaiting the user's selection.
    fn candidates(&mut self, candidates: &[SearchCandidate]);
}

/// Render a resolution outcome.
///
/// `NotFound` and a resolved app with zero products are distinct user-facing
/// conditions and get distinct messages.
pub fn render_resolution(sink: &mut impl RenderSink, resolution: &Resolution) {
    match resolution {
        Resolution::Resolved { app, products } => {
            if products.is_empty() {
                sink.error("App has no purchasable products.");
            } else {
                sink.result(app, products);
            }
        }
        Resolution::NeedsDisambiguation(candidates) => sink.candidates(candidates),
        Resolution::NotFound => sink.error("No matching app found."),
    }
}

/// Render a resolution failure.
pub fn render_error(sink: &mut impl RenderSink, error: &ResolveError) {
    let message = match error {
        ResolveError::EmptyQuery => "Enter an app ID, store URL, bundle ID, or name.",
        ResolveError::UnparsableUrl => "Unable to parse App Store URL.",
        ResolveError::Network(_) | ResolveError::Upstream { .. } => {
            "Lookup failed, please try again later."
        }
    };
    sink.error(message);
}
