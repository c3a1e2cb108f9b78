//! Wire-level contract types.
//!
//! Describes what the harness sends to the API under test and what it
//! expects back:
//! - requests, responses and the cookies they carry
//! - endpoint descriptors with their authentication requirement
//! - the two session token kinds and the cookie jar that holds them
//! - expectations, per-case records and the run tally
//! - the `Transport` seam between the harness and the network

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cookie;
pub mod endpoint;
pub mod expectation;
pub mod http;
pub mod outcome;
pub mod transport;

pub use cookie::{CookieJar, TokenCookie, TokenKind};
pub use endpoint::{AuthRequirement, Endpoint};
pub use expectation::Expectation;
pub use http::{ApiRequest, ApiResponse, Method, ResponseCookie};
pub use outcome::{CaseRecord, Outcome, RunSummary, Tally, Violation};
pub use transport::Transport;
