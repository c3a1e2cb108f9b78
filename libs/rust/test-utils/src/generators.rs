//! Shared proptest generators for the harness crates.
//!
//! This module provides reusable generators for the contract types and for
//! the field values the API validates.

use auth_contract::{ApiResponse, CookieJar, Method, ResponseCookie, TokenCookie, TokenKind};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Generate payload field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("email".to_string()),
        Just("pass".to_string()),
        Just("disp_name".to_string()),
        Just("intezmeny_id".to_string()),
        "[a-z][a-z_]{2,15}",
    ]
}

/// Generate description prefixes.
pub fn base_message_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}( [a-z]{2,10}){0,3}"
}

/// Generate HTTP methods.
pub fn method_strategy() -> impl Strategy<Value = Method> {
    prop_oneof![
        Just(Method::Get),
        Just(Method::Post),
        Just(Method::Patch),
        Just(Method::Delete),
    ]
}

/// Generate token kinds.
pub fn token_kind_strategy() -> impl Strategy<Value = TokenKind> {
    prop_oneof![Just(TokenKind::Refresh), Just(TokenKind::Access)]
}

/// Generate opaque token values.
pub fn token_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._-]{16,64}"
}

/// Generate token cookies with or without a path.
pub fn token_cookie_strategy() -> impl Strategy<Value = TokenCookie> {
    (
        token_kind_strategy(),
        token_value_strategy(),
        proptest::option::of(prop_oneof![Just("/".to_string()), Just("/token/".to_string())]),
    )
        .prop_map(|(kind, value, path)| TokenCookie { kind, value, path })
}

/// Generate cookie jars holding zero, one or both token kinds.
pub fn cookie_jar_strategy() -> impl Strategy<Value = CookieJar> {
    proptest::collection::vec(token_cookie_strategy(), 0..3).prop_map(|cookies| {
        let mut jar = CookieJar::new();
        for cookie in cookies {
            jar.insert(cookie);
        }
        jar
    })
}

/// Generate any status code.
pub fn status_strategy() -> impl Strategy<Value = u16> {
    100u16..600
}

/// Generate error status codes.
pub fn error_status_strategy() -> impl Strategy<Value = u16> {
    400u16..600
}

/// Generate response bodies, including empty and multi-line ones.
pub fn body_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Bad request".to_string()),
        Just("Unauthorised".to_string()),
        Just("Already exists".to_string()),
        "[ -~]{1,40}",
        "[a-z]{1,10}\n[a-z]{1,10}",
    ]
}

/// Generate `Set-Cookie` cookies.
pub fn response_cookie_strategy() -> impl Strategy<Value = ResponseCookie> {
    (
        prop_oneof![
            Just("RefreshToken".to_string()),
            Just("AccessToken".to_string()),
            "[A-Z][a-zA-Z]{2,10}",
        ],
        token_value_strategy(),
    )
        .prop_map(|(name, value)| ResponseCookie::new(name, value))
}

/// Generate responses with up to two cookies.
pub fn api_response_strategy() -> impl Strategy<Value = ApiResponse> {
    (
        status_strategy(),
        body_strategy(),
        proptest::collection::vec(response_cookie_strategy(), 0..3),
    )
        .prop_map(|(status, body, cookies)| ApiResponse {
            status,
            body,
            cookies,
        })
}

/// Generate flat JSON payloads with string values.
pub fn payload_strategy() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map(field_name_strategy(), "[a-z0-9@._+]{1,20}", 0..6).prop_map(
        |fields| {
            fields
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect()
        },
    )
}

/// Generate calendar-valid `YYYY-MM-DD` dates.
pub fn valid_date_strategy() -> impl Strategy<Value = String> {
    (1970i32..2100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// Generate valid `HH:MM:SS` times.
pub fn valid_time_strategy() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60, 0u32..60).prop_map(|(h, m, s)| format!("{h:02}:{m:02}:{s:02}"))
}

/// Generate valid `YYYY-MM-DD HH:MM:SS` timestamps.
pub fn valid_datetime_strategy() -> impl Strategy<Value = String> {
    (valid_date_strategy(), valid_time_strategy()).prop_map(|(d, t)| format!("{d} {t}"))
}

/// Generate phone numbers of acceptable length.
pub fn valid_phone_strategy() -> impl Strategy<Value = String> {
    "[1-9][0-9]{4,14}"
}

/// Generate valid display names and other free text.
pub fn valid_text_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_ ]{0,40}"
}

/// Generate valid passwords.
pub fn valid_password_strategy() -> impl Strategy<Value = String> {
    "[a-z_+]{12,40}"
}
