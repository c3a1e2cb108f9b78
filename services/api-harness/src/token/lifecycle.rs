//! Two-cookie session protocol.
//!
//! Credentials buy a refresh token; a refresh token buys an access token or
//! is rotated into a new refresh token, which invalidates the old one. Every
//! step is itself an asserted case.

use super::variants::{as_reused, as_wrong_kind};
use crate::assertion::AssertionEngine;
use crate::boundary::Payload;
use crate::error::HarnessError;
use auth_contract::{CookieJar, Endpoint, Expectation, TokenKind};
use tracing::{info, warn};

/// Credential exchange endpoint path.
pub const GET_REFRESH_TOKEN_PATH: &str = "/token/get_refresh_token";

/// Refresh token rotation endpoint path.
pub const REFRESH_REFRESH_TOKEN_PATH: &str = "/token/refresh_refresh_token";

/// Access token issuance endpoint path.
pub const GET_ACCESS_TOKEN_PATH: &str = "/token/get_access_token";

/// `POST /token/get_refresh_token`
#[must_use]
pub fn get_refresh_token_endpoint() -> Endpoint {
    Endpoint::post(GET_REFRESH_TOKEN_PATH)
}

/// `GET /token/refresh_refresh_token`
#[must_use]
pub fn refresh_refresh_token_endpoint() -> Endpoint {
    Endpoint::get(REFRESH_REFRESH_TOKEN_PATH).with_refresh()
}

/// `GET /token/get_access_token`
#[must_use]
pub fn get_access_token_endpoint() -> Endpoint {
    Endpoint::get(GET_ACCESS_TOKEN_PATH).with_refresh()
}

/// Email and password of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Same account with another password.
    #[must_use]
    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self::new(self.email.clone(), password)
    }

    /// Body of the credential exchange.
    #[must_use]
    pub fn payload(&self) -> Payload {
        Payload::new()
            .set("email", self.email.as_str())
            .set("pass", self.password.as_str())
    }
}

fn issued(endpoint: &Endpoint, jar: CookieJar, kind: TokenKind) -> CookieJar {
    if !jar.contains(kind) {
        warn!(endpoint = %endpoint, cookie = kind.cookie_name(), "No token cookie issued");
    }
    jar
}

/// Exchange credentials for a refresh token.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn get_refresh_token(
    engine: &mut AssertionEngine,
    description: &str,
    credentials: &Credentials,
) -> Result<CookieJar, HarnessError> {
    let endpoint = get_refresh_token_endpoint();
    let request = endpoint.request().with_body(credentials.payload().to_value());
    let response = engine
        .probe(description, &request, &Expectation::success(200))
        .await?;
    Ok(issued(&endpoint, response.token_jar(), TokenKind::Refresh))
}

/// Rotate a refresh token.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn rotate_refresh_token(
    engine: &mut AssertionEngine,
    description: &str,
    refresh: &CookieJar,
) -> Result<CookieJar, HarnessError> {
    let endpoint = refresh_refresh_token_endpoint();
    let request = endpoint.request().with_cookies(refresh.clone());
    let response = engine
        .probe(description, &request, &Expectation::success(200))
        .await?;
    Ok(issued(&endpoint, response.token_jar(), TokenKind::Refresh))
}

/// Exchange a refresh token for an access token.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn get_access_token(
    engine: &mut AssertionEngine,
    description: &str,
    refresh: &CookieJar,
) -> Result<CookieJar, HarnessError> {
    let endpoint = get_access_token_endpoint();
    let request = endpoint.request().with_cookies(refresh.clone());
    let response = engine
        .probe(description, &request, &Expectation::success(200))
        .await?;
    Ok(issued(&endpoint, response.token_jar(), TokenKind::Access))
}

/// Cookie jars of one signed-in account, with their corrupted variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Current refresh token
    pub refresh: CookieJar,
    /// Current access token
    pub access: CookieJar,
    /// A refresh token superseded by rotation, when one was kept
    pub reused_refresh: Option<CookieJar>,
    /// Refresh token presented as an access token
    pub wrong_access: CookieJar,
    /// Access token presented as a refresh token
    pub wrong_refresh: CookieJar,
}

impl Session {
    /// Build a session from issued jars.
    #[must_use]
    pub fn from_jars(refresh: CookieJar, access: CookieJar, reused_refresh: Option<CookieJar>) -> Self {
        Self {
            wrong_access: as_wrong_kind(&refresh, TokenKind::Refresh),
            wrong_refresh: as_wrong_kind(&access, TokenKind::Access),
            refresh,
            access,
            reused_refresh,
        }
    }

    /// Full handshake: refresh token, rotation, access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn establish(
        engine: &mut AssertionEngine,
        credentials: &Credentials,
    ) -> Result<Self, HarnessError> {
        let refresh = get_refresh_token(engine, "Get refresh token", credentials).await?;
        let session = Self::resume(engine, &refresh).await?;
        info!(email = %credentials.email, "Session established");
        Ok(session)
    }

    /// Continue a handshake from an issued refresh token.
    ///
    /// The given token is kept as the reused variant and rotated; the
    /// access token is bought with the rotated one.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn resume(
        engine: &mut AssertionEngine,
        refresh: &CookieJar,
    ) -> Result<Self, HarnessError> {
        let reused = as_reused(refresh);
        let rotated = rotate_refresh_token(engine, "Refresh refresh token", refresh).await?;
        let access = get_access_token(engine, "Get access token", &rotated).await?;
        Ok(Self::from_jars(rotated, access, Some(reused)))
    }

    /// Short sign-in without rotation, for secondary accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn sign_in(
        engine: &mut AssertionEngine,
        credentials: &Credentials,
        subject: &str,
    ) -> Result<Self, HarnessError> {
        let refresh = get_refresh_token(engine, &format!("Get refresh token for {subject}"), credentials)
            .await?;
        let access = get_access_token(engine, &format!("Get access token for {subject}"), &refresh)
            .await?;
        info!(email = %credentials.email, subject, "Signed in");
        Ok(Self::from_jars(refresh, access, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth_contract::TokenCookie;
    use serde_json::json;

    #[test]
    fn test_credentials_payload() {
        let credentials = Credentials::new("tester@test.com", "tester_pass+");
        assert_eq!(
            credentials.payload().to_value(),
            json!({"email": "tester@test.com", "pass": "tester_pass+"})
        );
        assert_eq!(credentials.with_password("tmp_tester_pass").password, "tmp_tester_pass");
    }

    #[test]
    fn test_session_variants() {
        let refresh = CookieJar::with(TokenCookie::new(TokenKind::Refresh, "rt.2").with_path("/token/"));
        let access = CookieJar::with(TokenCookie::new(TokenKind::Access, "at.1").with_path("/"));
        let session = Session::from_jars(refresh, access, None);

        assert_eq!(session.wrong_access.get(TokenKind::Access).unwrap().value, "rt.2");
        assert_eq!(session.wrong_refresh.get(TokenKind::Refresh).unwrap().value, "at.1");
        assert!(session.reused_refresh.is_none());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(get_refresh_token_endpoint().to_string(), "POST /token/get_refresh_token");
        assert_eq!(
            refresh_refresh_token_endpoint().auth.token_kind(),
            Some(TokenKind::Refresh)
        );
        assert_eq!(get_access_token_endpoint().to_string(), "GET /token/get_access_token");
    }
}
