//! Configuration module for the video request client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the video request API, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout for API calls
    pub request_timeout: Duration,
    /// Quiet period after the last search keystroke before fetching
    pub search_debounce: Duration,
    /// Drop list responses superseded by a newer fetch
    pub discard_stale_responses: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:7777".to_string(),
            request_timeout: Duration::from_secs(10),
            search_debounce: Duration::from_millis(550),
            discard_stale_responses: false,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_base_url = env::var("VRB_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout = env::var("VRB_REQUEST_TIMEOUT_SECS")
            .map(|v| {
                Duration::from_secs(v.parse().expect("Invalid VRB_REQUEST_TIMEOUT_SECS value"))
            })
            .unwrap_or(defaults.request_timeout);

        let search_debounce = env::var("VRB_SEARCH_DEBOUNCE_MS")
            .map(|v| {
                Duration::from_millis(v.parse().expect("Invalid VRB_SEARCH_DEBOUNCE_MS value"))
            })
            .unwrap_or(defaults.search_debounce);

        let discard_stale_responses = env::var("VRB_DISCARD_STALE_RESPONSES")
            .map(|v| {
                v.parse()
                    .expect("Invalid VRB_DISCARD_STALE_RESPONSES value (expected true/false)")
            })
            .unwrap_or(defaults.discard_stale_responses);

        let log_level = env::var("VRB_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_json = env::var("VRB_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(defaults.log_json);

        Self {
            api_base_url,
            request_timeout,
            search_debounce,
            discard_stale_responses,
            log_level,
            log_json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("VRB_API_BASE_URL");
        env::remove_var("VRB_REQUEST_TIMEOUT_SECS");
        env::remove_var("VRB_SEARCH_DEBOUNCE_MS");
        env::remove_var("VRB_DISCARD_STALE_RESPONSES");
        env::remove_var("VRB_LOG_LEVEL");
        env::remove_var("VRB_LOG_FORMAT");

        let config = Config::from_env();

        assert_eq!(config.api_base_url, "http://localhost:7777");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.search_debounce, Duration::from_millis(550));
        assert!(!config.discard_stale_responses);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }
}
