//! Application configuration loaded from environment variables.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

use crate::clock::Clock;
use crate::utils::mask_secret;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Punting Form API ===
    /// API key passed as the `apiKey` query parameter.
    #[serde(default = "default_api_key")]
    pub punting_form_api_key: String,

    /// Base URL of the Punting Form API (without the endpoint path).
    #[serde(default = "default_api_base")]
    pub punting_form_api_base: String,

    // === Probe ===
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// User-Agent header sent with the probe.
    #[serde(default = "default_user_agent")]
    pub probe_user_agent: String,

    // === Presentation ===
    /// Location label reported in the JSON payload and on the page.
    #[serde(default = "default_test_location")]
    pub test_location: String,

    /// Hosting region shown on the page.
    #[serde(default = "default_test_region")]
    pub test_region: String,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_api_key() -> String {
    "test-key".to_string()
}

fn default_api_base() -> String {
    "https://api.puntingform.com.au/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Algorate-Test/1.0".to_string()
}

fn default_test_location() -> String {
    "Railway Singapore".to_string()
}

fn default_test_region() -> String {
    "Singapore (asia-southeast1)".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            punting_form_api_key: default_api_key(),
            punting_form_api_base: default_api_base(),
            probe_timeout_secs: default_timeout_secs(),
            probe_user_agent: default_user_agent(),
            test_location: default_test_location(),
            test_region: default_test_region(),
            port: default_port(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.punting_form_api_key.is_empty() {
            return Err("PUNTING_FORM_API_KEY must not be empty".to_string());
        }

        if self.probe_timeout_secs == 0 {
            return Err("PROBE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        match Url::parse(&self.punting_form_api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(format!(
                "PUNTING_FORM_API_BASE must be http or https, got {}",
                url.scheme()
            )),
            Err(e) => Err(format!("PUNTING_FORM_API_BASE is not a valid URL: {e}")),
        }
    }

    /// Outbound request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// API key shortened for logs: first 8 characters followed by `...`.
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.punting_form_api_key)
    }

    /// Build the per-process probe settings, fixing the test date from `clock`.
    pub fn probe_settings(&self, clock: &dyn Clock) -> ProbeSettings {
        ProbeSettings {
            api_base: self.punting_form_api_base.clone(),
            api_key: self.punting_form_api_key.clone(),
            test_date: clock.tomorrow(),
            timeout: self.timeout(),
            user_agent: self.probe_user_agent.clone(),
        }
    }
}

/// Fixed parameters of every probe issued by this process.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Base URL of the API.
    pub api_base: String,
    /// API key query parameter.
    pub api_key: String,
    /// Meeting date queried, computed once at startup.
    pub test_date: NaiveDate,
    /// Outbound request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ProbeSettings {
    /// Test date as sent to the API, `DD/MM/YYYY`.
    pub fn formatted_test_date(&self) -> String {
        format_test_date(self.test_date)
    }
}

/// Format a date the way the meetings endpoint expects it.
pub fn format_test_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.punting_form_api_key, "test-key");
        assert_eq!(config.punting_form_api_base, "https://api.puntingform.com.au/v2");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_from_env_pairs() {
        let vars = vec![
            ("PUNTING_FORM_API_KEY".to_string(), "abcdef123456".to_string()),
            ("PORT".to_string(), "9090".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.punting_form_api_key, "abcdef123456");
        assert_eq!(config.port, 9090);
        assert_eq!(config.probe_timeout_secs, 10);
        assert_eq!(config.test_location, "Railway Singapore");
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            probe_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let config = Config {
            punting_form_api_key: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let config = Config {
            punting_form_api_base: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            punting_form_api_base: "ftp://example.com/v2".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn masks_api_key_after_eight_chars() {
        let config = Config {
            punting_form_api_key: "0123456789abcdef".to_string(),
            ..Config::default()
        };
        assert_eq!(config.masked_api_key(), "01234567...");
    }

    #[test]
    fn probe_settings_use_tomorrow() {
        let clock = FixedClock::ymd_hms(2024, 12, 31, 23, 0, 0);
        let settings = Config::default().probe_settings(&clock);
        assert_eq!(settings.formatted_test_date(), "01/01/2025");
    }
}
