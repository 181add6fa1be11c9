//! CLI administration tool for vehicle-lookup-proxy.
//!
//! Runs single lookups through the same upstream client and processing
//! pipeline as the server, and validates configuration, without starting
//! the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Fetch and print the processed response for a vehicle number
//! cargo run --bin admin -- lookup ch01ac9090
//!
//! # Same, without the rebranding fields
//! cargo run --bin admin -- lookup ch01ac9090 --no-brand
//!
//! # Validate configuration and print the summary
//! cargo run --bin admin -- config check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see the `config` module.

use vehicle_lookup_proxy::application::services::LookupService;
use vehicle_lookup_proxy::config::{self, Config};
use vehicle_lookup_proxy::domain::LookupQuery;
use vehicle_lookup_proxy::infrastructure::cache::MemoryCache;
use vehicle_lookup_proxy::infrastructure::upstream::HttpUpstream;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing vehicle-lookup-proxy.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Look up a vehicle number against the upstream
    Lookup {
        /// Vehicle number (normalized before use)
        query: String,

        /// Sanitize only; skip the rebranding fields
        #[arg(long)]
        no_brand: bool,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup { query, no_brand } => run_lookup(&query, no_brand).await?,
        Commands::Config { action } => match action {
            ConfigAction::Check => check_config()?,
        },
    }

    Ok(())
}

/// Performs one upstream lookup and prints the processed body.
///
/// # Flow
///
/// 1. Load configuration
/// 2. Normalize the query (same rules as the HTTP endpoint)
/// 3. Call the upstream once
/// 4. Sanitize (and rebrand unless `--no-brand`)
/// 5. Print the result
async fn run_lookup(raw_query: &str, no_brand: bool) -> Result<()> {
    let config = config::load_from_env()?;

    let query = LookupQuery::parse(raw_query)
        .with_context(|| format!("Cannot look up '{}'", raw_query))?;

    let upstream = HttpUpstream::new(&config.upstream_url, config.upstream_timeout())
        .context("Failed to create upstream client")?;
    let service = LookupService::new(
        Arc::new(MemoryCache::new(config.cache_ttl_seconds)),
        Arc::new(upstream),
        config.sanitizer()?,
        config.branding.clone(),
    );

    println!(
        "{} {} via {}",
        "→".cyan(),
        query.as_str().bold(),
        config.upstream_url.dimmed()
    );

    let raw = service
        .fetch_upstream(query.as_str())
        .await
        .context("Upstream lookup failed")?;

    let body = if no_brand {
        service.sanitize_only(&raw)?
    } else {
        service.process_body(&raw)?
    };

    println!("{} {}", "✓".green().bold(), "Upstream responded".green());
    println!();
    println!("{}", body);

    Ok(())
}

/// Validates configuration and prints a summary.
fn check_config() -> Result<()> {
    let config = Config::from_env()?;

    match config.validate() {
        Ok(()) => {
            println!("{}", "✓ Configuration is valid".green().bold());
            println!();
            println!("  Listen:          {}", config.listen_addr);
            println!("  Upstream:        {}", config.upstream_url);
            println!("  Timeout:         {}s", config.upstream_timeout_seconds);
            println!("  Cache TTL:       {}s", config.cache_ttl_seconds);
            println!("  API keys:        {}", config.api_keys.len());
            println!("  Text marker:     {}", config.forbidden_marker);
            println!("  Key marker:      {}", config.forbidden_key_marker);
            println!(
                "  Branding:        {} / {} / {}",
                config.branding.developer, config.branding.credit_by, config.branding.powered_by
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗ Invalid configuration:".red().bold(), e);
            Err(e)
        }
    }
}
