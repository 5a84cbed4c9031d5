//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default PokeAPI endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Age in seconds after which a cached response is swept
    pub cache_ttl_secs: u64,
    /// Sweep period in milliseconds; `None` sweeps once per TTL
    pub sweep_interval_ms: Option<u64>,
    /// Base URL of the upstream API, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL_SECS` - Cache TTL in seconds (default: 50)
    /// - `POKEDEX_SWEEP_INTERVAL_MS` - Sweep period in milliseconds (default: the TTL)
    /// - `POKEDEX_API_BASE_URL` - Upstream base URL (default: PokeAPI v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_ttl_secs: parse_var("POKEDEX_CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            sweep_interval_ms: parse_var("POKEDEX_SWEEP_INTERVAL_MS"),
            api_base_url: env::var("POKEDEX_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            http_timeout_secs: parse_var("POKEDEX_HTTP_TIMEOUT_SECS")
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Sweep period, falling back to the TTL when unset.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.cache_ttl())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 50,
            sweep_interval_ms: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 10,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
