//! Test fixtures with sample data.
//!
//! This module provides pre-built accounts, payloads and responses for use
//! in tests.

use auth_contract::{ApiResponse, CookieJar, ResponseCookie, TokenCookie, TokenKind};
use serde_json::{Value, json};

/// Email of the primary sample account.
pub const TESTER_EMAIL: &str = "tester@test.com";

/// Password of the sample accounts.
pub const TESTER_PASSWORD: &str = "tester_pass+";

/// Display name of the sample accounts.
pub const TESTER_NAME: &str = "tester";

/// Fifteen-digit phone number, the longest accepted.
pub const TESTER_PHONE: &str = "123456789012345";

/// Sample account credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAccount {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

impl SampleAccount {
    /// The primary sample account.
    #[must_use]
    pub fn tester() -> Self {
        Self::with_email(TESTER_EMAIL)
    }

    /// A sample account with another email and the shared password.
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: TESTER_PASSWORD.to_string(),
        }
    }

    /// Body of a credential exchange.
    #[must_use]
    pub fn credentials(&self) -> Value {
        json!({"email": self.email, "pass": self.password})
    }

    /// Body of an account creation.
    #[must_use]
    pub fn create_payload(&self) -> Value {
        json!({
            "disp_name": TESTER_NAME,
            "email": self.email,
            "phone_number": TESTER_PHONE,
            "pass": self.password,
        })
    }
}

/// Jar holding one refresh token.
#[must_use]
pub fn refresh_jar(value: &str) -> CookieJar {
    CookieJar::with(TokenCookie::new(TokenKind::Refresh, value).with_path("/token/"))
}

/// Jar holding one access token.
#[must_use]
pub fn access_jar(value: &str) -> CookieJar {
    CookieJar::with(TokenCookie::new(TokenKind::Access, value).with_path("/"))
}

/// Successful token issuance setting the given cookie.
#[must_use]
pub fn token_issued(kind: TokenKind, value: &str) -> ApiResponse {
    ApiResponse::new(200, "").with_cookie(ResponseCookie::new(kind.cookie_name(), value))
}

/// A rejection that wrongly sets a cookie.
#[must_use]
pub fn leaking_rejection() -> ApiResponse {
    ApiResponse::new(400, "Bad request").with_cookie(ResponseCookie::new("AccessToken", "leaked"))
}
