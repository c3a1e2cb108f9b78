//! Token rejection pattern shared by every protected endpoint.
//!
//! With an otherwise valid payload, a present but invalid token is
//! unauthorised while a missing token is a malformed request.

use crate::assertion::AssertionEngine;
use crate::boundary::Payload;
use crate::error::HarnessError;
use auth_contract::{CookieJar, Endpoint, Expectation};

/// One request of the rejection pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionCase {
    /// Case description as reported
    pub description: String,
    /// Cookies sent
    pub cookies: CookieJar,
    /// Expected outcome
    pub expectation: Expectation,
}

/// Cases for a protected endpoint: reused token (when given), wrong-kind
/// token, no token.
#[must_use]
pub fn rejection_cases(
    base_message: &str,
    wrong: &CookieJar,
    reused: Option<&CookieJar>,
) -> Vec<RejectionCase> {
    let mut cases = Vec::with_capacity(3);
    if let Some(reused) = reused {
        cases.push(RejectionCase {
            description: format!("{base_message}, reused token"),
            cookies: reused.clone(),
            expectation: Expectation::unauthorised(),
        });
    }
    cases.push(RejectionCase {
        description: format!("{base_message}, wrong token"),
        cookies: wrong.clone(),
        expectation: Expectation::unauthorised(),
    });
    cases.push(RejectionCase {
        description: format!("{base_message}, no token"),
        cookies: CookieJar::new(),
        expectation: Expectation::bad_request(),
    });
    cases
}

/// Run the rejection pattern against an endpoint.
///
/// Returns how many cases passed.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn run_rejection(
    engine: &mut AssertionEngine,
    base_message: &str,
    endpoint: &Endpoint,
    payload: &Payload,
    wrong: &CookieJar,
    reused: Option<&CookieJar>,
) -> Result<usize, HarnessError> {
    let mut passed = 0;
    for case in rejection_cases(base_message, wrong, reused) {
        let request = endpoint
            .request()
            .with_cookies(case.cookies)
            .with_body(payload.to_value());
        let response = engine.send(&request).await?;
        if engine.check(&case.description, &response, &case.expectation)? {
            passed += 1;
        }
    }
    Ok(passed)
}
