//! Centralized error types for the harness libraries.
//!
//! A `PlatformError` is always fatal for a harness run: once the target API
//! cannot be reached no further assertion is meaningful. The classification
//! helpers only decide how the failure is reported.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Target is unreachable (connection refused, TLS handshake, DNS)
    #[error("Target unavailable: {0}")]
    Unavailable(String),

    /// Operation timed out
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Check if this error means the target could not be talked to at all.
    ///
    /// Connectivity failures are reported differently from harness bugs:
    /// the former point at the environment, the latter at the harness.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_common::PlatformError;
    ///
    /// let err = PlatformError::unavailable("connection refused");
    /// assert!(err.is_connectivity());
    ///
    /// let err = PlatformError::invalid_input("relative path");
    /// assert!(!err.is_connectivity());
    /// ```
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            Self::Unavailable(_) | Self::Timeout(_) => true,
            Self::Serialization(_) | Self::InvalidInput(_) | Self::Internal(_) => false,
        }
    }

    /// Create an unavailable error with the given message.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a timeout error with the given message.
    #[must_use]
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error with the given message.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
