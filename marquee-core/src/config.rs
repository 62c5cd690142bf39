//! Centralized configuration for Marquee.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Marquee components.
///
/// Groups related settings into logical sections and supports environment
/// variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub omdb: OmdbConfig,
    pub search: SearchConfig,
}

/// OMDb catalog endpoint configuration.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// Base URL of the OMDb API
    pub base_url: String,
    /// Access key passed as the `apikey` query parameter
    pub api_key: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.omdbapi.com/".to_string(),
            // Published free-tier key; override via MARQUEE_OMDB_API_KEY.
            api_key: "d13216df".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: "marquee/0.1.0",
        }
    }
}

/// Interactive search behavior configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet interval after the last keystroke before a suggestion lookup
    pub debounce: Duration,
    /// Query committed automatically on startup
    pub seed_query: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            seed_query: "mission impossible".to_string(),
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("MARQUEE_OMDB_API_KEY") {
            if !api_key.is_empty() {
                config.omdb.api_key = api_key;
            }
        }

        if let Ok(base_url) = std::env::var("MARQUEE_OMDB_BASE_URL") {
            if !base_url.is_empty() {
                config.omdb.base_url = base_url;
            }
        }

        if let Ok(timeout) = std::env::var("MARQUEE_HTTP_TIMEOUT_SECS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.omdb.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(debounce) = std::env::var("MARQUEE_DEBOUNCE_MS") {
            if let Ok(millis) = debounce.parse::<u64>() {
                config.search.debounce = Duration::from_millis(millis);
            }
        }

        config
    }

    /// Creates a configuration optimized for testing, with a short HTTP
    /// timeout so misdirected requests fail fast.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.omdb.request_timeout = Duration::from_secs(1);
        config
    }
}
