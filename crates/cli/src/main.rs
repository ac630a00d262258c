//! IAP Lookup CLI - terminal front end for the resolver.
//!
//! # Usage
//!
//! ```bash
//! # Look up by numeric app ID
//! iap-lookup lookup 284882215
//!
//! # Look up by store URL, bundle ID, or name
//! iap-lookup lookup "https://apps.apple.com/us/app/x/id284882215"
//! iap-lookup lookup com.example.app
//! iap-lookup lookup "Example App" --pick 2
//!
//! # Pre-flight check the relay before searching
//! iap-lookup lookup "Example App" --check
//!
//! # Probe relay availability
//! iap-lookup health
//! ```
//!
//! # Commands
//!
//! - `lookup` - Resolve a query to an app and its product identifiers
//! - `health` - One-shot availability probe through the relay

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

/// Default relay endpoint, overridable per invocation or via `RELAY_URL`.
const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8787";

#[derive(Parser)]
#[command(name = "iap-lookup")]
#[command(author, version, about = "App Store in-app-purchase product ID lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a query to an app and its product identifiers
    Lookup {
        /// App ID, App Store URL, bundle ID, or app name
        query: String,

        /// Relay endpoint to fetch product detail through
        #[arg(long, env = "RELAY_URL", default_value = DEFAULT_RELAY_URL)]
        relay_url: String,

        /// Maximum number of search candidates to request
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Resolve a single search match without asking for confirmation
        #[arg(long)]
        auto_select: bool,

        /// Select candidate N (1-based) instead of prompting
        #[arg(long)]
        pick: Option<usize>,

        /// Pre-flight the relay before searching
        #[arg(long)]
        check: bool,
    },
    /// One-shot availability probe through the relay
    Health {
        /// Relay endpoint to probe
        #[arg(long, env = "RELAY_URL", default_value = DEFAULT_RELAY_URL)]
        relay_url: String,

        /// Probe timeout in milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Lookup {
            query,
            relay_url,
            limit,
            auto_select,
            pick,
            check,
        } => {
            commands::lookup::run(&query, &relay_url, limit, auto_select, pick, check).await?;
        }
        Commands::Health {
            relay_url,
            timeout_ms,
        } => {
            commands::health::run(&relay_url, timeout_ms).await?;
        }
    }
    Ok(())
}
