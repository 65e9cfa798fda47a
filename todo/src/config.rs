//! Configuration management for the todo binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::seed::DEFAULT_SEED_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "venus_todo=info,venus_runtime=warn";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seed fetch configuration
    pub seed: SeedConfig,
    /// Log filter directive (`tracing_subscriber::EnvFilter` syntax)
    pub log_filter: String,
    /// Seconds to wait for an in-flight fetch when quitting
    pub shutdown_timeout: u64,
}

/// Seed fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Endpoint returning a JSON array of `{ id, name, .. }` records
    pub url: String,
    /// Whether to fetch at startup at all
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: SeedConfig {
                url: DEFAULT_SEED_URL.to_string(),
                enabled: true,
            },
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            shutdown_timeout: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            seed: SeedConfig {
                url: lookup("VENUS_SEED_URL")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.seed.url),
                enabled: lookup("VENUS_SEED_ENABLED")
                    .and_then(|s| parse_bool(&s))
                    .unwrap_or(defaults.seed.enabled),
            },
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            shutdown_timeout: lookup("VENUS_SHUTDOWN_TIMEOUT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.shutdown_timeout),
        }
    }

    /// Shutdown timeout as a `Duration`
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
