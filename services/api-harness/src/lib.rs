//! API contract harness library.
//!
//! Drives a fixed end-to-end scenario against a session-authenticated HTTP
//! API: boundary batteries per request field, refresh/access token
//! lifecycle checks, and exact status and body assertions with a running
//! pass tally.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertion;
pub mod boundary;
pub mod config;
pub mod error;
pub mod report;
pub mod scenario;
pub mod token;
pub mod transport;

// Re-exports for convenience
pub use assertion::AssertionEngine;
pub use config::Config;
pub use error::HarnessError;
pub use transport::HttpTransport;
