//! Harness error types.
//!
//! Failed assertions are never errors: they are recorded and the run goes
//! on. These errors cover the things that stop a run or that the scenario
//! has to work around.

use crate::config::ConfigError;
use rust_common::PlatformError;
use thiserror::Error;

/// Harness errors.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API could not be reached
    #[error("Transport failure: {0}")]
    Transport(#[from] PlatformError),

    /// The reporter could not write its output
    #[error("Report output failed: {0}")]
    Report(#[from] std::io::Error),

    /// A response the scenario reads data from had an unexpected shape
    #[error("Unexpected payload from {endpoint}: {reason}")]
    UnexpectedPayload {
        /// Endpoint path
        endpoint: String,
        /// What was missing or malformed
        reason: String,
    },
}

impl HarnessError {
    /// Create an unexpected payload error.
    pub fn unexpected_payload(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnexpectedPayload {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Whether the run must stop.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnexpectedPayload { .. })
    }

    /// Whether the API could not be reached at all.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_connectivity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        assert!(HarnessError::Transport(PlatformError::unavailable("refused")).is_fatal());
        assert!(HarnessError::Report(std::io::Error::other("closed")).is_fatal());
        assert!(!HarnessError::unexpected_payload("/get_intezmenys", "empty list").is_fatal());
    }

    #[test]
    fn test_connectivity() {
        assert!(HarnessError::Transport(PlatformError::unavailable("refused")).is_connectivity());
        assert!(HarnessError::Transport(PlatformError::timeout("30s")).is_connectivity());
        assert!(!HarnessError::Transport(PlatformError::invalid_input("bad path")).is_connectivity());
        assert!(!HarnessError::Report(std::io::Error::other("closed")).is_connectivity());
    }

    #[test]
    fn test_display() {
        let err = HarnessError::unexpected_payload("/user/profile", "no uid");
        assert_eq!(err.to_string(), "Unexpected payload from /user/profile: no uid");

        let err = HarnessError::from(ConfigError::InvalidTimeout {
            name: "REQUEST_TIMEOUT".to_string(),
        });
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
