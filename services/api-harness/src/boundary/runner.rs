//! Executes boundary batteries through the assertion engine.

use super::cases::{BoundaryCase, generate};
use super::field::FieldSpec;
use super::payload::Payload;
use crate::assertion::AssertionEngine;
use crate::error::HarnessError;
use auth_contract::{CookieJar, Endpoint};

/// Run cases against an endpoint, all with the same cookies.
///
/// Returns how many cases passed.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn run_cases(
    engine: &mut AssertionEngine,
    endpoint: &Endpoint,
    cookies: &CookieJar,
    cases: &[BoundaryCase],
) -> Result<usize, HarnessError> {
    let mut passed = 0;
    for case in cases {
        let request = endpoint
            .request()
            .with_cookies(cookies.clone())
            .with_body(case.payload.to_value());
        let response = engine.send(&request).await?;
        if engine.check(&case.description, &response, &case.expectation)? {
            passed += 1;
        }
    }
    Ok(passed)
}

/// Generate and run the battery for one field.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn run_field(
    engine: &mut AssertionEngine,
    base_message: &str,
    endpoint: &Endpoint,
    cookies: &CookieJar,
    base: &Payload,
    field: &FieldSpec,
) -> Result<usize, HarnessError> {
    let cases = generate(base_message, base, field);
    run_cases(engine, endpoint, cookies, &cases).await
}
