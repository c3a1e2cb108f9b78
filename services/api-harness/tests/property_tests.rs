//! Property-based tests for the harness.
//!
//! Tests validate:
//! - boundary cases change exactly one field of the base payload
//! - absent-field expectations follow the field's presence
//! - error responses that set cookies never pass
//! - the engine tally agrees with the responses it was fed

use api_harness::AssertionEngine;
use api_harness::assertion::evaluate;
use api_harness::boundary::{
    DateTimeShape, FieldSpec, FieldType, PasswordRole, Payload, Presence, generate,
};
use api_harness::report::JsonLinesReporter;
use api_harness::token::{as_reused, as_wrong_kind};
use auth_contract::{ApiRequest, ApiResponse, Expectation, Method, Violation};
use proptest::prelude::*;
use std::io;
use test_utils::{
    MockTransport, api_response_strategy, base_message_strategy, body_strategy, cookie_jar_strategy,
    error_status_strategy, payload_strategy, response_cookie_strategy, token_kind_strategy,
};

// Strategy for generating field descriptions of every type
fn field_spec_strategy() -> impl Strategy<Value = FieldSpec> {
    let name = "[a-z][a-z_]{2,12}";
    (name, 0usize..9, any::<bool>()).prop_map(|(name, kind, optional)| {
        let spec = match kind {
            0 => FieldSpec::sensitive_id(name),
            1 => FieldSpec::string(name),
            2 => FieldSpec::new(name, FieldType::Email),
            3 => FieldSpec::password(name, PasswordRole::New),
            4 => FieldSpec::password(name, PasswordRole::Current),
            5 => FieldSpec::number(name),
            6 => FieldSpec::phone(name),
            7 => FieldSpec::datetime(name, DateTimeShape::Date),
            _ => FieldSpec::datetime(name, DateTimeShape::DateTime),
        };
        if optional { spec.optional(201) } else { spec }
    })
}

// Strategy for generating expectations
fn expectation_strategy() -> impl Strategy<Value = Expectation> {
    prop_oneof![
        Just(Expectation::success(200)),
        Just(Expectation::success(201)),
        Just(Expectation::success(204)),
        Just(Expectation::bad_request()),
        Just(Expectation::unauthorised()),
        Just(Expectation::method_not_allowed()),
        Just(Expectation::already_exists()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_boundary_cases_touch_one_field(
        base_message in base_message_strategy(),
        fields in payload_strategy(),
        field in field_spec_strategy(),
    ) {
        let base = Payload::from(fields);
        let cases = generate(&base_message, &base, &field);
        prop_assert!(!cases.is_empty());

        let prefix = format!("{base_message}, ");
        for case in &cases {
            prop_assert!(case.description.starts_with(&prefix));
            prop_assert_eq!(case.payload.without(&field.name), base.without(&field.name));
        }
        prop_assert!(!cases[0].payload.contains(&field.name));
        for case in &cases[1..] {
            prop_assert!(case.payload.contains(&field.name));
        }
    }

    #[test]
    fn prop_absent_case_follows_presence(
        fields in payload_strategy(),
        field in field_spec_strategy(),
    ) {
        let cases = generate("Case", &Payload::from(fields), &field);
        let expected = match field.presence {
            Presence::Required => Expectation::bad_request(),
            Presence::Optional { success } => Expectation::success(success),
        };
        prop_assert_eq!(&cases[0].expectation, &expected);

        // Only a missing entity or a wrong password is not a malformed request.
        for case in &cases[1..] {
            let malformed = case.expectation == Expectation::bad_request();
            let semantic = case.description.ends_with("does not exist")
                || case.description.contains(", incorrect ");
            prop_assert!(malformed != semantic, "{}", case.description);
        }
    }

    #[test]
    fn prop_generation_is_deterministic(
        fields in payload_strategy(),
        field in field_spec_strategy(),
    ) {
        let base = Payload::from(fields);
        prop_assert_eq!(generate("Case", &base, &field), generate("Case", &base, &field));
    }

    #[test]
    fn prop_leaking_error_never_passes(
        status in error_status_strategy(),
        body in body_strategy(),
        cookie in response_cookie_strategy(),
    ) {
        let response = ApiResponse::new(status, body.clone()).with_cookie(cookie);
        let violations = evaluate(&Expectation::new(status, body), &response);

        prop_assert_eq!(violations.len(), 1);
        let is_leak = matches!(violations[0], Violation::CookieLeak { .. });
        prop_assert!(is_leak);
    }

    #[test]
    fn prop_verdict_matches_comparison(
        expectation in expectation_strategy(),
        response in api_response_strategy(),
    ) {
        let violations = evaluate(&expectation, &response);
        let matches = response.status == expectation.status && response.body == expectation.body;
        let leaks = response.is_error() && response.carries_cookies();
        prop_assert_eq!(violations.is_empty(), matches && !leaks);
    }

    #[test]
    fn prop_wrong_kind_keeps_values(
        jar in cookie_jar_strategy(),
        kind in token_kind_strategy(),
    ) {
        let wrong = as_wrong_kind(&jar, kind);
        match jar.get(kind) {
            Some(original) => {
                prop_assert!(!wrong.contains(kind));
                let moved = wrong.get(kind.other());
                prop_assert_eq!(moved.map(|c| c.value.as_str()), Some(original.value.as_str()));
            }
            None => prop_assert_eq!(&wrong, &jar),
        }
        prop_assert_eq!(as_reused(&jar), jar);
    }

    #[test]
    fn prop_engine_tally_counts_matches(
        responses in proptest::collection::vec(api_response_strategy(), 1..12),
        expectation in expectation_strategy(),
    ) {
        let expected_passes = responses
            .iter()
            .filter(|r| evaluate(&expectation, r).is_empty())
            .count();

        let summary = tokio_test::block_on(async {
            let transport = MockTransport::scripted(responses.clone());
            let mut engine = AssertionEngine::new(transport, JsonLinesReporter::new(io::sink()));
            engine.start().unwrap();
            let request = ApiRequest::new(Method::Post, "/user/create");
            for _ in &responses {
                engine.probe("Create user", &request, &expectation).await.unwrap();
            }
            engine.finish().unwrap()
        });

        prop_assert_eq!(summary.total, responses.len());
        prop_assert_eq!(summary.passed, expected_passes);
        prop_assert_eq!(summary.failed_cases.len(), responses.len() - expected_passes);
    }
}
