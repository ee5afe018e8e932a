pub mod aggregation;
pub mod api;
pub mod error;
pub mod weather;

use chrono::NaiveDateTime;
use std::time::Duration;

pub use aggregation::{aggregate, day_buckets, AggregationResult, DayBucket};
pub use error::{MeteoError, MeteoResult};

/// One hourly observation: a naive local timestamp and a temperature in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, temperature: f64) -> Self {
        Self {
            timestamp,
            temperature,
        }
    }
}

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct MeteoConfig {
    pub bind_address: String,
    pub weather_api_url: String,
    /// Bearer token required on `/weather`. `None` disables the guard.
    pub api_token: Option<String>,
    pub upstream_timeout_seconds: u64,
}

impl Default for MeteoConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3030".to_string(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            api_token: None,
            upstream_timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        }
    }
}

impl MeteoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset or invalid values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(bind_addr) = lookup("BIND_ADDRESS") {
            config.bind_address = bind_addr;
        }

        if let Some(url) = lookup("WEATHER_API_URL") {
            config.weather_api_url = url;
        }

        if let Some(token) = lookup("API_TOKEN") {
            let token = token.trim().to_string();
            config.api_token = if token.is_empty() { None } else { Some(token) };
        }

        if let Some(timeout_str) = lookup("UPSTREAM_TIMEOUT_SECONDS") {
            // A zero timeout would fail every upstream call
            config.upstream_timeout_seconds = timeout_str
                .trim()
                .parse()
                .ok()
                .filter(|&seconds: &u64| seconds > 0)
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECONDS);
        }

        config
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> MeteoConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MeteoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.bind_address, "0.0.0.0:3030");
        assert_eq!(config.weather_api_url, DEFAULT_WEATHER_API_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_values_are_read() {
        let config = config_from(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("WEATHER_API_URL", "http://localhost:9000/v1/forecast"),
            ("API_TOKEN", " supersecret "),
            ("UPSTREAM_TIMEOUT_SECONDS", "5"),
        ]);

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.weather_api_url, "http://localhost:9000/v1/forecast");
        assert_eq!(config.api_token.as_deref(), Some("supersecret"));
        assert_eq!(config.upstream_timeout_seconds, 5);
    }

    #[test]
    fn test_blank_token_disables_auth() {
        let config = config_from(&[("API_TOKEN", "   ")]);
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn test_zero_or_invalid_timeout_falls_back() {
        assert_eq!(
            config_from(&[("UPSTREAM_TIMEOUT_SECONDS", "0")]).upstream_timeout_seconds,
            30
        );
        assert_eq!(
            config_from(&[("UPSTREAM_TIMEOUT_SECONDS", "soon")]).upstream_timeout_seconds,
            30
        );
        assert_eq!(
            config_from(&[("UPSTREAM_TIMEOUT_SECONDS", "-3")]).upstream_timeout_seconds,
            30
        );
    }
}
