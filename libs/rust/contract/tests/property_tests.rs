//! Property-based tests for the contract types.
//!
//! Tests validate:
//! - cookie jars hold at most one token per kind
//! - the `Cookie` header carries every token in the jar
//! - run summaries agree with the records they were built from

use auth_contract::{
    ApiResponse, CaseRecord, CookieJar, Outcome, ResponseCookie, RunSummary, Tally, TokenCookie,
    TokenKind, Violation,
};
use proptest::prelude::*;

// Strategy for generating token kinds
fn token_kind_strategy() -> impl Strategy<Value = TokenKind> {
    prop_oneof![Just(TokenKind::Refresh), Just(TokenKind::Access)]
}

// Strategy for generating opaque token values
fn token_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._-]{8,64}"
}

// Strategy for generating cookie names, token and non-token
fn cookie_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("RefreshToken".to_string()),
        Just("AccessToken".to_string()),
        Just("PHPSESSID".to_string()),
        "[A-Z][a-zA-Z]{2,12}",
    ]
}

// Strategy for generating response cookies
fn response_cookie_strategy() -> impl Strategy<Value = ResponseCookie> {
    (
        cookie_name_strategy(),
        token_value_strategy(),
        proptest::option::of(Just("/".to_string())),
    )
        .prop_map(|(name, value, path)| ResponseCookie { name, value, path })
}

// Strategy for generating violation lists
fn violations_strategy() -> impl Strategy<Value = Vec<Violation>> {
    proptest::collection::vec(
        prop_oneof![
            (100u16..600, 100u16..600)
                .prop_map(|(expected, actual)| Violation::StatusMismatch { expected, actual }),
            Just(Violation::BodyMismatch),
            Just(Violation::CookieLeak {
                cookies: vec!["AccessToken".to_string()]
            }),
        ],
        0..3,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_jar_from_response_keeps_only_token_cookies(
        cookies in proptest::collection::vec(response_cookie_strategy(), 0..8)
    ) {
        let jar = CookieJar::from_response_cookies(&cookies);

        prop_assert!(jar.len() <= 2);
        for cookie in jar.iter() {
            let last = cookies
                .iter()
                .rev()
                .find(|c| c.name == cookie.kind.cookie_name());
            prop_assert_eq!(last.map(|c| &c.value), Some(&cookie.value));
        }
    }

    #[test]
    fn prop_header_carries_every_token(
        kinds in proptest::collection::vec(token_kind_strategy(), 0..4),
        value in token_value_strategy(),
    ) {
        let mut jar = CookieJar::new();
        for kind in &kinds {
            jar.insert(TokenCookie::new(*kind, value.clone()));
        }

        match jar.header_value() {
            None => prop_assert!(kinds.is_empty()),
            Some(header) => {
                for kind in &kinds {
                    let pair = format!("{}={}", kind.cookie_name(), value);
                    prop_assert!(header.contains(&pair));
                }
                prop_assert_eq!(header.split("; ").count(), jar.len());
            }
        }
    }

    #[test]
    fn prop_renamed_cookie_keeps_value(
        kind in token_kind_strategy(),
        value in token_value_strategy(),
    ) {
        let cookie = TokenCookie::new(kind, value.clone()).with_path("/");
        let renamed = cookie.renamed(kind.other());

        prop_assert_ne!(renamed.kind, cookie.kind);
        prop_assert_eq!(renamed.value, value);
        prop_assert_eq!(renamed.path, cookie.path);
    }

    #[test]
    fn prop_summary_matches_records(
        runs in proptest::collection::vec(violations_strategy(), 0..40)
    ) {
        let mut tally = Tally::default();
        let records: Vec<CaseRecord> = runs
            .into_iter()
            .map(|violations| {
                let outcome = Outcome::from_violations(&violations);
                let case_id = tally.record(outcome);
                CaseRecord {
                    case_id,
                    description: format!("case {case_id}"),
                    outcome,
                    violations,
                    expected_status: 200,
                    actual_status: 200,
                    expected_body: String::new(),
                    actual_body: String::new(),
                }
            })
            .collect();

        let summary = RunSummary::from_records(&records);
        prop_assert_eq!(summary.total, tally.executed);
        prop_assert_eq!(summary.passed, tally.passed);
        prop_assert_eq!(summary.failed_cases.len(), tally.failed());
        prop_assert_eq!(summary.all_passed(), tally.failed() == 0);
        prop_assert_eq!(
            summary.summary_line(),
            format!("Tests passed: {}/{}", tally.passed, tally.executed)
        );
    }

    #[test]
    fn prop_empty_body_displays_placeholder(status in 100u16..600, body in "[ -~]{0,40}") {
        let response = ApiResponse::new(status, body.clone());
        if body.is_empty() {
            prop_assert_eq!(response.display_body(), "[No Content]");
        } else {
            prop_assert_eq!(response.display_body(), body.as_str());
        }
        prop_assert_eq!(response.is_error(), status >= 400);
    }
}
