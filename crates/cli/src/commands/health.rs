//! Health command.
//!
//! One-shot availability probe: a single product lookup for a fixed
//! known-good identifier through the relay, bounded by a timeout. Not a
//! monitoring loop.

use std::time::Duration;

use iap_lookup_resolver::{HttpCatalog, Resolver, ResolverConfig};
use thiserror::Error;

/// Errors that can occur while running the health command.
#[derive(Debug, Error)]
pub enum HealthError {
    /// The probe failed or timed out.
    #[error("Relay at {0} is unavailable")]
    Unavailable(String),
}

/// Probe the relay once.
///
/// # Errors
///
/// Returns [`HealthError::Unavailable`] when the probe fails or does not
/// answer within `timeout_ms`, so scripted callers get a non-zero exit.
#[allow(clippy::print_stdout)]
pub async fn run(relay_url: &str, timeout_ms: u64) -> Result<(), HealthError> {
    let resolver = Resolver::new(HttpCatalog::new(relay_url), ResolverConfig::default());

    if resolver
        .check_availability(Duration::from_millis(timeout_ms))
        .await
    {
        println!("relay at {relay_url}: available");
        Ok(())
    } else {
        Err(HealthError::Unavailable(relay_url.to_string()))
    }
}
