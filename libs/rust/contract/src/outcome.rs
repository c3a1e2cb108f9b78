//! Per-case verdicts and the run tally.

use crate::http::ResponseCookie;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One way a response can break its expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Status code differs
    StatusMismatch {
        /// Expected status
        expected: u16,
        /// Received status
        actual: u16,
    },
    /// Body differs byte for byte
    BodyMismatch,
    /// An error response tried to set cookies
    CookieLeak {
        /// Names of the cookies the response set
        cookies: Vec<String>,
    },
}

impl Violation {
    /// Build a cookie-leak violation from the offending cookies.
    #[must_use]
    pub fn cookie_leak(cookies: &[ResponseCookie]) -> Self {
        Self::CookieLeak {
            cookies: cookies.iter().map(|c| c.name.clone()).collect(),
        }
    }

    /// Whether this is a status or body mismatch.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::StatusMismatch { .. } | Self::BodyMismatch)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusMismatch { expected, actual } => {
                write!(f, "expected status {expected}, received {actual}")
            }
            Self::BodyMismatch => f.write_str("body differs"),
            Self::CookieLeak { cookies } => {
                write!(f, "error response set cookies: {}", cookies.join(", "))
            }
        }
    }
}

/// Verdict of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// All checks held
    Pass,
    /// At least one violation
    Fail,
}

impl Outcome {
    /// Derive the verdict from a violation list.
    #[must_use]
    pub fn from_violations(violations: &[Violation]) -> Self {
        if violations.is_empty() {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// Whether the case passed.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Everything a reporter needs to know about one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// 1-based case number within the run
    pub case_id: usize,
    /// Human-readable description
    pub description: String,
    /// Verdict
    pub outcome: Outcome,
    /// Reasons for a failure, empty on pass
    pub violations: Vec<Violation>,
    /// Expected status
    pub expected_status: u16,
    /// Received status
    pub actual_status: u16,
    /// Expected body
    pub expected_body: String,
    /// Received body
    pub actual_body: String,
}

impl CaseRecord {
    /// Whether the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_pass()
    }

    /// Whether the cookie-leak rule was broken.
    #[must_use]
    pub fn leaked_cookies(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::CookieLeak { .. }))
    }

    /// Whether status or body differed from the expectation.
    #[must_use]
    pub fn mismatched(&self) -> bool {
        self.violations.iter().any(Violation::is_mismatch)
    }
}

/// Monotonic executed/passed counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Cases executed
    pub executed: usize,
    /// Cases passed
    pub passed: usize,
}

impl Tally {
    /// Count one case and return its 1-based number.
    pub const fn record(&mut self, outcome: Outcome) -> usize {
        self.executed += 1;
        if outcome.is_pass() {
            self.passed += 1;
        }
        self.executed
    }

    /// Number of the next case to run.
    #[must_use]
    pub const fn next_case(&self) -> usize {
        self.executed + 1
    }

    /// Cases failed so far.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.executed - self.passed
    }
}

/// End-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Cases passed
    pub passed: usize,
    /// Cases executed
    pub total: usize,
    /// Numbers of the failed cases, in run order
    pub failed_cases: Vec<usize>,
}

impl RunSummary {
    /// Create from case records.
    #[must_use]
    pub fn from_records(records: &[CaseRecord]) -> Self {
        let failed_cases: Vec<usize> = records
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.case_id)
            .collect();

        Self {
            passed: records.len() - failed_cases.len(),
            total: records.len(),
            failed_cases,
        }
    }

    /// Create from a tally and the failed case numbers.
    #[must_use]
    pub const fn new(tally: Tally, failed_cases: Vec<usize>) -> Self {
        Self {
            passed: tally.passed,
            total: tally.executed,
            failed_cases,
        }
    }

    /// Whether every executed case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Final report line.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("Tests passed: {}/{}", self.passed, self.total)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(case_id: usize, violations: Vec<Violation>) -> CaseRecord {
        CaseRecord {
            case_id,
            description: format!("case {case_id}"),
            outcome: Outcome::from_violations(&violations),
            violations,
            expected_status: 400,
            actual_status: 400,
            expected_body: "Bad request".to_string(),
            actual_body: "Bad request".to_string(),
        }
    }

    #[test]
    fn test_tally_counts() {
        let mut tally = Tally::default();
        assert_eq!(tally.next_case(), 1);
        assert_eq!(tally.record(Outcome::Pass), 1);
        assert_eq!(tally.record(Outcome::Fail), 2);
        assert_eq!(tally.passed, 1);
        assert_eq!(tally.failed(), 1);
        assert_eq!(tally.next_case(), 3);
    }

    #[test]
    fn test_summary_line() {
        let summary = RunSummary::from_records(&[
            record(1, vec![]),
            record(2, vec![Violation::BodyMismatch]),
            record(3, vec![]),
        ]);

        assert_eq!(summary.summary_line(), "Tests passed: 2/3");
        assert_eq!(summary.failed_cases, vec![2]);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_run_passes() {
        let summary = RunSummary::new(Tally::default(), Vec::new());
        assert!(summary.all_passed());
        assert_eq!(summary.to_string(), "Tests passed: 0/0");
    }

    #[test]
    fn test_record_classification() {
        let leak = record(
            1,
            vec![Violation::cookie_leak(&[ResponseCookie::new("AccessToken", "x")])],
        );
        assert!(!leak.passed());
        assert!(leak.leaked_cookies());
        assert!(!leak.mismatched());

        let mismatch = record(2, vec![Violation::StatusMismatch { expected: 400, actual: 200 }]);
        assert!(mismatch.mismatched());
        assert!(!mismatch.leaked_cookies());
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let json = serde_json::to_value(Violation::StatusMismatch { expected: 403, actual: 200 }).unwrap();
        assert_eq!(json["kind"], "status_mismatch");
        assert_eq!(json["expected"], 403);
    }
}
