//! Harness configuration.
//!
//! All configuration is loaded from environment variables (and an optional
//! `.env` file) and validated before the first request is sent.

use rust_common::{HttpConfig, TlsVerification, TracingConfig};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Variable name
        field: String,
        /// Why the URL was rejected
        reason: String,
    },

    /// Zero timeout
    #[error("Invalid timeout {name}: must be greater than 0")]
    InvalidTimeout {
        /// Variable name
        name: String,
    },

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// In-place progress line with failure details
    #[default]
    Console,
    /// One JSON object per case
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(format!("expected console or json, got {other}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Console => "console",
            Self::Json => "json",
        })
    }
}

/// Exit status policy for runs with failed cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Non-zero exit when any case failed
    #[default]
    Strict,
    /// Always exit zero once the run completes
    Lenient,
}

impl ExitPolicy {
    /// Whether a run with the given outcome should exit non-zero.
    #[must_use]
    pub const fn fails_run(self, all_passed: bool) -> bool {
        matches!(self, Self::Strict) && !all_passed
    }
}

impl FromStr for ExitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("expected strict or lenient, got {other}")),
        }
    }
}

/// Harness configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API under test
    pub base_url: Url,
    /// Certificate verification policy
    pub tls: TlsVerification,
    /// Per-request timeout in seconds (must be > 0)
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds (must be > 0)
    pub connect_timeout_secs: u64,
    /// Report format
    pub report_format: ReportFormat,
    /// Exit policy
    pub exit_policy: ExitPolicy,
    /// Log filter directive
    pub log_level: String,
    /// JSON log lines
    pub log_json: bool,
}

const DEFAULT_BASE_URL: &str = "https://127.0.0.1:443";

impl Config {
    /// Loads configuration from environment variables with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            base_url: parse_url_var(&lookup, "API_BASE_URL", DEFAULT_BASE_URL)?,
            tls: TlsVerification::from_accept_invalid(parse_var(
                &lookup,
                "ACCEPT_INVALID_CERTS",
                false,
            )?),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT", 30)?,
            connect_timeout_secs: parse_var(&lookup, "CONNECT_TIMEOUT", 10)?,
            report_format: parse_var(&lookup, "REPORT_FORMAT", ReportFormat::Console)?,
            exit_policy: parse_var(&lookup, "EXIT_POLICY", ExitPolicy::Strict)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            log_json: parse_var(&lookup, "LOG_JSON", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-HTTP base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                field: "API_BASE_URL".to_string(),
                reason: format!("unsupported scheme {}", self.base_url.scheme()),
            });
        }
        if self.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                field: "API_BASE_URL".to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                name: "REQUEST_TIMEOUT".to_string(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                name: "CONNECT_TIMEOUT".to_string(),
            });
        }
        Ok(())
    }

    /// HTTP client settings derived from this config.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default()
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_tls(self.tls)
    }

    /// Tracing settings derived from this config.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let config = TracingConfig::default()
            .with_service_name("api-harness")
            .with_log_level(self.log_level.clone());
        if self.log_json {
            config.with_json_output()
        } else {
            config
        }
    }
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(val) => val.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parse a URL variable with a default value.
fn parse_url_var<F>(lookup: &F, name: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url_str = lookup(name).unwrap_or_else(|| default.to_string());
    Url::parse(url_str.trim()).map_err(|e| ConfigError::InvalidUrl {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.base_url.as_str(), "https://127.0.0.1/");
        assert_eq!(config.tls, TlsVerification::Verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.report_format, ReportFormat::Console);
        assert_eq!(config.exit_policy, ExitPolicy::Strict);
        assert_eq!(config.log_level, "warn");
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://localhost:8080"),
            ("ACCEPT_INVALID_CERTS", "true"),
            ("REQUEST_TIMEOUT", "5"),
            ("REPORT_FORMAT", "JSON"),
            ("EXIT_POLICY", "lenient"),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.port(), Some(8080));
        assert!(config.tls.accepts_invalid_certs());
        assert_eq!(config.http_config().timeout, Duration::from_secs(5));
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.exit_policy, ExitPolicy::Lenient);
        assert!(config.tracing_config().json_output);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("API_BASE_URL", "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("API_BASE_URL", "ftp://example.com")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT", "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("CONNECT_TIMEOUT", "soon")])),
            Err(ConfigError::ParseError { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("REPORT_FORMAT", "xml")])),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_exit_policy() {
        assert!(ExitPolicy::Strict.fails_run(false));
        assert!(!ExitPolicy::Strict.fails_run(true));
        assert!(!ExitPolicy::Lenient.fails_run(false));
    }
}
