//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Example
//!
//! ```bash
//! export UPSTREAM_URL="https://lookup.example.com/rc"
//! export API_KEYS="SPLEXXO,PARTNER-KEY"
//! export CACHE_TTL_SECONDS="3600"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `UPSTREAM_URL` - Upstream base URL (default: `https://ishanxstudio.space/rc`)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: 10)
//! - `API_KEYS` - Comma-separated access keys (default: `SPLEXXO`)
//! - `CACHE_TTL_SECONDS` - Response cache TTL (default: 3600)
//! - `FORBIDDEN_MARKER` - Text stripped from upstream strings (default: `@oxmzoo`)
//! - `FORBIDDEN_KEY_MARKER` - Substring that drops object keys
//!   (default: `FORBIDDEN_MARKER` without leading `@`)
//! - `BRAND_DEVELOPER`, `BRAND_CREDIT_BY`, `BRAND_POWERED_BY` - Rebranding values

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::domain::{Branding, Sanitizer};

pub const DEFAULT_UPSTREAM_URL: &str = "https://ishanxstudio.space/rc";
pub const DEFAULT_FORBIDDEN_MARKER: &str = "@oxmzoo";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub upstream_url: String,
    /// Bound on each upstream request. The upstream protocol itself has no
    /// timeout, so without this a stalled upstream would hold the request open.
    pub upstream_timeout_seconds: u64,
    /// Static allow-list checked against the `key` query parameter.
    pub api_keys: Vec<String>,
    pub cache_ttl_seconds: u64,
    pub forbidden_marker: String,
    pub forbidden_key_marker: String,
    pub branding: Branding,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let upstream_url =
            env::var("UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let upstream_timeout_seconds = parse_var("UPSTREAM_TIMEOUT_SECONDS", 10)?;
        let cache_ttl_seconds = parse_var("CACHE_TTL_SECONDS", 3600)?;

        let api_keys = env::var("API_KEYS")
            .map(|v| parse_key_list(&v))
            .unwrap_or_else(|_| vec!["SPLEXXO".to_string()]);

        let forbidden_marker =
            env::var("FORBIDDEN_MARKER").unwrap_or_else(|_| DEFAULT_FORBIDDEN_MARKER.to_string());
        let forbidden_key_marker = env::var("FORBIDDEN_KEY_MARKER")
            .unwrap_or_else(|_| forbidden_marker.trim_start_matches('@').to_string());

        let defaults = Branding::default();
        let branding = Branding::new(
            env::var("BRAND_DEVELOPER").unwrap_or(defaults.developer),
            env::var("BRAND_CREDIT_BY").unwrap_or(defaults.credit_by),
            env::var("BRAND_POWERED_BY").unwrap_or(defaults.powered_by),
        );

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            upstream_url,
            upstream_timeout_seconds,
            api_keys,
            cache_ttl_seconds,
            forbidden_marker,
            forbidden_key_marker,
            branding,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `upstream_url` is not an absolute HTTP(S) URL
    /// - a timeout or TTL is zero
    /// - the key allow-list is empty
    /// - a forbidden marker is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let upstream = Url::parse(&self.upstream_url)
            .with_context(|| format!("UPSTREAM_URL is not a valid URL: '{}'", self.upstream_url))?;
        if upstream.scheme() != "http" && upstream.scheme() != "https" {
            anyhow::bail!(
                "UPSTREAM_URL must start with 'http://' or 'https://', got '{}'",
                self.upstream_url
            );
        }

        if self.upstream_timeout_seconds == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.api_keys.is_empty() {
            anyhow::bail!("API_KEYS must contain at least one non-empty key");
        }

        if self.forbidden_marker.is_empty() || self.forbidden_key_marker.is_empty() {
            anyhow::bail!("FORBIDDEN_MARKER and FORBIDDEN_KEY_MARKER must not be empty");
        }

        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Builds the response sanitizer from the configured markers.
    ///
    /// # Errors
    ///
    /// Returns an error if a marker is empty.
    pub fn sanitizer(&self) -> Result<Sanitizer> {
        Sanitizer::new(&self.forbidden_marker, &self.forbidden_key_marker)
            .context("Failed to build response sanitizer")
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.upstream_url);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_seconds);
        tracing::info!("  Cache TTL: {}s", self.cache_ttl_seconds);
        tracing::info!(
            "  API keys: {}",
            self.api_keys
                .iter()
                .map(|k| mask_key(k))
                .collect::<Vec<_>>()
                .join(", ")
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a numeric variable, falling back to `default` when unset.
fn parse_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got '{}'", name, v)),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated key list, dropping blanks.
fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Masks an access key for logging, keeping the first two characters.
///
/// - `SPLEXXO` → `SP***`
/// - `AB` → `***`
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(2).collect();
    if key.chars().count() <= 2 {
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
