//! Centralized HTTP client configuration and building.
//!
//! The client never keeps its own cookie store: every request carries
//! exactly the cookie jar the caller attaches, so session state stays
//! explicit and corrupted jars reach the wire untouched.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Server certificate verification policy.
///
/// Test deployments commonly sit behind a self-signed certificate. Accepting
/// such certificates must be an explicit choice, never the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVerification {
    /// Verify the certificate chain against the system roots
    #[default]
    Verify,
    /// Accept any certificate, including self-signed and expired ones
    AcceptInvalidCerts,
}

impl TlsVerification {
    /// Build the policy from an "accept invalid certificates" flag.
    #[must_use]
    pub const fn from_accept_invalid(accept_invalid: bool) -> Self {
        if accept_invalid {
            Self::AcceptInvalidCerts
        } else {
            Self::Verify
        }
    }

    /// Whether certificate errors are ignored.
    #[must_use]
    pub const fn accepts_invalid_certs(self) -> bool {
        matches!(self, Self::AcceptInvalidCerts)
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Certificate verification policy (default: verify)
    pub tls: TlsVerification,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("api-contract-harness/", env!("CARGO_PKG_VERSION")).to_string(),
            tls: TlsVerification::Verify,
        }
    }
}

impl HttpConfig {
    /// Set the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the certificate verification policy.
    #[must_use]
    pub const fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }
}

/// Build a configured HTTP client.
///
/// Creates a reqwest client with rustls TLS and the given verification policy.
/// The built-in cookie store stays disabled.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use rust_common::{HttpConfig, TlsVerification, build_http_client};
/// use std::time::Duration;
///
/// let config = HttpConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_tls(TlsVerification::AcceptInvalidCerts);
/// let client = build_http_client(&config).expect("Failed to build client");
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .use_rustls_tls()
        .danger_accept_invalid_certs(config.tls.accepts_invalid_certs())
        .build()
}
