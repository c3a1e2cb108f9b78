//! Shared library for cross-cutting concerns in the API contract harness.
//!
//! This crate provides centralized implementations for:
//! - Error types with connectivity classification
//! - HTTP client configuration and building, including the TLS verification policy
//! - Tracing subscriber initialization

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod tracing_config;

pub use error::PlatformError;
pub use http::{HttpConfig, TlsVerification, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
