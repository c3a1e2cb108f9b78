//! Pure verdict rules.

use auth_contract::{ApiResponse, Expectation, Violation};

/// Compare a response against its expectation.
///
/// Status and body are compared exactly. Independently of both, a response
/// with an error status must not set any cookie.
#[must_use]
pub fn evaluate(expectation: &Expectation, response: &ApiResponse) -> Vec<Violation> {
    let mut violations = Vec::new();

    if response.status != expectation.status {
        violations.push(Violation::StatusMismatch {
            expected: expectation.status,
            actual: response.status,
        });
    }
    if response.body != expectation.body {
        violations.push(Violation::BodyMismatch);
    }
    if response.is_error() && response.carries_cookies() {
        violations.push(Violation::cookie_leak(&response.cookies));
    }

    violations
}
