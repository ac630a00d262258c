//! Lookup command.
//!
//! Drives a full resolution: classify the query, call the resolver, and if
//! the search needs disambiguation, let the user pick a candidate (via
//! `--pick` or an interactive prompt) and complete the resolution with it.
//!
//! The command runs one resolution start to finish before returning, so the
//! busy-guard the resolver's rendering contract asks for holds trivially:
//! there is never a second search in flight.

use std::io::{BufRead, Write};

use iap_lookup_core::{AppSummary, ProductId, Resolution, SearchCandidate};
use iap_lookup_resolver::{
    DEFAULT_HEALTH_TIMEOUT, HttpCatalog, RenderSink, Resolver, ResolverConfig, render_error,
    render_resolution,
};
use thiserror::Error;

/// User-agent the private detail upstream is called with; shown after a
/// successful lookup for tools that replay storefront requests.
const DEFAULT_USER_AGENT: &str = "AppStore/3.0 iOS/17.0.1 model/iPhone14,2 hw/iPhone";

/// Errors that can occur while running the lookup command.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Pre-flight check failed; no search was attempted.
    #[error("Lookup service is unavailable")]
    ServiceUnavailable,

    /// `--pick` named a candidate outside the returned list.
    #[error("Invalid selection: {given} (have {count} candidates)")]
    InvalidSelection { given: usize, count: usize },

    /// Reading the interactive selection failed.
    #[error("Failed to read selection: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Run a lookup end to end.
///
/// # Errors
///
/// Returns [`LookupError`] for pre-flight failure or a bad candidate
/// selection. Resolution errors are rendered, not returned - the process
/// still exits cleanly so the message is the last thing the user sees.
pub async fn run(
    query: &str,
    relay_url: &str,
    limit: u32,
    auto_select: bool,
    pick: Option<usize>,
    check: bool,
) -> Result<(), LookupError> {
    let catalog = HttpCatalog::new(relay_url);
    let resolver = Resolver::new(
        catalog,
        ResolverConfig {
            search_limit: limit,
            auto_select_single_match: auto_select,
        },
    );
    let mut renderer = TerminalRenderer;

    if check && !resolver.check_availability(DEFAULT_HEALTH_TIMEOUT).await {
        renderer.error("Lookup service is unavailable, try again later.");
        return Err(LookupError::ServiceUnavailable);
    }

    renderer.loading(true);
    let outcome = resolver.resolve(query).await;
    renderer.loading(false);

    let resolution = match outcome {
        Ok(resolution) => resolution,
        Err(err) => {
            render_error(&mut renderer, &err);
            return Ok(());
        }
    };

    let Resolution::NeedsDisambiguation(candidates) = resolution else {
        render_resolution(&mut renderer, &resolution);
        return Ok(());
    };

    renderer.candidates(&candidates);
    let selected = select(&candidates, pick)?;

    renderer.loading(true);
    let outcome = resolver.select_candidate(selected).await;
    renderer.loading(false);

    match outcome {
        Ok(resolution) => render_resolution(&mut renderer, &resolution),
        Err(err) => render_error(&mut renderer, &err),
    }
    Ok(())
}

/// Pick a candidate by `--pick` index, or prompt on the terminal.
fn select(
    candidates: &[SearchCandidate],
    pick: Option<usize>,
) -> Result<&SearchCandidate, LookupError> {
    let index = match pick {
        Some(given) => given,
        None => prompt_selection(candidates.len())?,
    };

    // 1-based, matching the rendered list.
    index
        .checked_sub(1)
        .and_then(|i| candidates.get(i))
        .ok_or(LookupError::InvalidSelection {
            given: index,
            count: candidates.len(),
        })
}

#[allow(clippy::print_stderr)]
fn prompt_selection(count: usize) -> Result<usize, LookupError> {
    eprint!("Select an app [1-{count}]: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    line.trim()
        .parse::<usize>()
        .map_err(|_| LookupError::InvalidSelection { given: 0, count })
}

/// Renders outcomes on the terminal: results on stdout, status on stderr.
struct TerminalRenderer;

impl RenderSink for TerminalRenderer {
    #[allow(clippy::print_stderr)]
    fn loading(&mut self, active: bool) {
        if active {
            eprintln!("Looking up...");
        }
    }

    #[allow(clippy::print_stderr)]
    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    #[allow(clippy::print_stdout)]
    fn result(&mut self, app: &AppSummary, products: &[ProductId]) {
        println!("{}", app.name);
        println!("App ID:    {}", app.id);
        println!("Bundle ID: {}", app.bundle_id);
        println!();
        println!("Product IDs:");
        for (index, product) in products.iter().enumerate() {
            println!("  {}. {product}", index + 1);
        }
        println!();
        println!("Storefront User-Agent:");
        println!("  {DEFAULT_USER_AGENT}");
    }

    #[allow(clippy::print_stdout)]
    fn candidates(&mut self, candidates: &[SearchCandidate]) {
        println!("Multiple apps match:");
        for (index, candidate) in candidates.iter().enumerate() {
            println!("  {}. {} (App ID: {})", index + 1, candidate.name, candidate.id);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use iap_lookup_core::AppId;

    use super::*;

    fn candidates(count: usize) -> Vec<SearchCandidate> {
        (1..=count)
            .map(|i| SearchCandidate {
                id: AppId::new(u64::try_from(i).unwrap()),
                name: format!("App {i}"),
                icon_url: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_pick_is_one_based() {
        let list = candidates(3);
        let selected = select(&list, Some(2)).unwrap();
        assert_eq!(selected.id, AppId::new(2));
    }

    #[test]
    fn test_pick_zero_is_invalid() {
        let list = candidates(3);
        assert!(matches!(
            select(&list, Some(0)),
            Err(LookupError::InvalidSelection { given: 0, count: 3 })
        ));
    }

    #[test]
    fn test_pick_out_of_range_is_invalid() {
        let list = candidates(3);
        assert!(matches!(
            select(&list, Some(4)),
            Err(LookupError::InvalidSelection { given: 4, count: 3 })
        ));
    }
}
