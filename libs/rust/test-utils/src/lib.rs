//! Shared test utilities for the contract harness.
//!
//! This crate provides:
//! - Proptest generators for contract types
//! - A recording mock transport
//! - Test fixtures with sample data
//! - `FakeApi`, an in-memory server enforcing the same validation and token contract

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fake_api;
pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use fake_api::{FakeApi, FieldKind, FieldRule, FakeRoute};
pub use generators::*;
pub use mocks::MockTransport;
