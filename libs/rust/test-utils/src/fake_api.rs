//! In-memory stand-in for the API under test.
//!
//! `FakeApi` enforces the same contract the harness probes for: per-field
//! validation, the two-cookie session protocol with single-use refresh
//! tokens, `405` on a wrong method and no cookies on error responses. Routes
//! are declared with the fields they accept; token and account routes are
//! built in.

use async_trait::async_trait;
use auth_contract::expectation::{ALREADY_EXISTS, BAD_REQUEST, UNAUTHORISED};
use auth_contract::{ApiRequest, ApiResponse, Endpoint, ResponseCookie, TokenKind, Transport};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_common::PlatformError;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use tokio::sync::Mutex;
use uuid::Uuid;

const MAX_TEXT_CHARS: usize = 255;
const MIN_PASSWORD_CHARS: usize = 12;
const MAX_PHONE_DIGITS: usize = 15;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date pattern"));
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("Invalid time pattern"));
static DATETIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("Invalid datetime pattern")
});

/// Validation applied to one body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric entity id; unknown ids are rejected with 403 when sensitive, 400 otherwise
    Id {
        /// Whether an unknown id is an authorisation failure
        sensitive: bool,
    },
    /// Non-empty string of at most 255 characters
    Text,
    /// Text containing `@`
    Email,
    /// Text of at least 12 characters
    NewPassword,
    /// New-password rules, then compared with the caller's stored password
    CurrentPassword,
    /// Digits representable as a signed 64-bit integer
    Number,
    /// Number of at most 15 digits
    Phone,
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM:SS`
    Time,
    /// `YYYY-MM-DD HH:MM:SS`
    DateTime,
}

/// A named field with its validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name in the JSON body
    pub name: String,
    /// Validation
    pub kind: FieldKind,
    /// Whether the field may be absent
    pub optional: bool,
}

impl FieldRule {
    /// A field that must be present.
    #[must_use]
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    /// A field that may be absent.
    #[must_use]
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Accept,
    CreateUser,
    IssueRefresh,
    RotateRefresh,
    IssueAccess,
    ChangePassword,
    DeleteUser,
}

/// One route served by the fake.
#[derive(Debug, Clone)]
pub struct FakeRoute {
    endpoint: Endpoint,
    fields: Vec<FieldRule>,
    success: u16,
    action: Action,
}

impl FakeRoute {
    /// A route that validates its fields and answers `success` with an empty body.
    #[must_use]
    pub fn new(endpoint: Endpoint, success: u16) -> Self {
        Self::with_action(endpoint, success, Action::Accept)
    }

    fn with_action(endpoint: Endpoint, success: u16, action: Action) -> Self {
        Self {
            endpoint,
            fields: Vec::new(),
            success,
            action,
        }
    }

    /// Add a field rule. Fields are validated in declaration order.
    #[must_use]
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    BadRequest,
    Unauthorised,
    AlreadyExists,
    MethodNotAllowed,
    NotFound,
}

impl Rejection {
    fn response(self) -> ApiResponse {
        match self {
            Self::BadRequest => ApiResponse::new(400, BAD_REQUEST),
            Self::Unauthorised => ApiResponse::new(403, UNAUTHORISED),
            Self::AlreadyExists => ApiResponse::new(400, ALREADY_EXISTS),
            Self::MethodNotAllowed => ApiResponse::new(405, ""),
            Self::NotFound => ApiResponse::new(404, ""),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    // email -> password
    users: HashMap<String, String>,
    // token value -> email
    refresh_tokens: HashMap<String, String>,
    access_tokens: HashMap<String, String>,
}

impl State {
    fn tokens(&self, kind: TokenKind) -> &HashMap<String, String> {
        match kind {
            TokenKind::Refresh => &self.refresh_tokens,
            TokenKind::Access => &self.access_tokens,
        }
    }

    fn authenticate(&self, request: &ApiRequest, kind: TokenKind) -> Result<String, Rejection> {
        let cookie = request.cookies.get(kind).ok_or(Rejection::BadRequest)?;
        let email = self
            .tokens(kind)
            .get(&cookie.value)
            .ok_or(Rejection::Unauthorised)?;
        if self.users.contains_key(email) {
            Ok(email.clone())
        } else {
            Err(Rejection::Unauthorised)
        }
    }

    fn issue(&mut self, kind: TokenKind, email: &str) -> ResponseCookie {
        let (prefix, path) = match kind {
            TokenKind::Refresh => ("rt", "/token/"),
            TokenKind::Access => ("at", "/"),
        };
        let value = format!("{prefix}.{}", Uuid::new_v4().simple());
        match kind {
            TokenKind::Refresh => self.refresh_tokens.insert(value.clone(), email.to_string()),
            TokenKind::Access => self.access_tokens.insert(value.clone(), email.to_string()),
        };
        ResponseCookie::new(kind.cookie_name(), value).with_path(path)
    }

    fn forget(&mut self, email: &str) {
        self.users.remove(email);
        self.refresh_tokens.retain(|_, owner| owner != email);
        self.access_tokens.retain(|_, owner| owner != email);
    }
}

/// In-memory fake of the API under test.
#[derive(Debug)]
pub struct FakeApi {
    routes: Vec<FakeRoute>,
    known_ids: BTreeSet<i64>,
    state: Mutex<State>,
    leak_cookies: bool,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeApi {
    /// Create a fake with the account and token routes and known id `1`.
    #[must_use]
    pub fn new() -> Self {
        let routes = vec![
            FakeRoute::with_action(Endpoint::post("/user/create"), 201, Action::CreateUser)
                .field(FieldRule::required("disp_name", FieldKind::Text))
                .field(FieldRule::required("email", FieldKind::Email))
                .field(FieldRule::required("pass", FieldKind::NewPassword))
                .field(FieldRule::optional("phone_number", FieldKind::Phone)),
            FakeRoute::with_action(
                Endpoint::post("/token/get_refresh_token"),
                200,
                Action::IssueRefresh,
            )
            .field(FieldRule::required("email", FieldKind::Email))
            .field(FieldRule::required("pass", FieldKind::CurrentPassword)),
            FakeRoute::with_action(
                Endpoint::get("/token/refresh_refresh_token").with_refresh(),
                200,
                Action::RotateRefresh,
            ),
            FakeRoute::with_action(
                Endpoint::get("/token/get_access_token").with_refresh(),
                200,
                Action::IssueAccess,
            ),
            FakeRoute::with_action(
                Endpoint::post("/user/change/password").with_access(),
                204,
                Action::ChangePassword,
            )
            .field(FieldRule::required("pass", FieldKind::CurrentPassword))
            .field(FieldRule::required("new_pass", FieldKind::NewPassword)),
            FakeRoute::with_action(
                Endpoint::delete("/user/delete").with_access(),
                204,
                Action::DeleteUser,
            )
            .field(FieldRule::required("pass", FieldKind::CurrentPassword)),
        ];

        Self {
            routes,
            known_ids: BTreeSet::from([1]),
            state: Mutex::new(State::default()),
            leak_cookies: false,
        }
    }

    /// Serve an additional route.
    #[must_use]
    pub fn with_route(mut self, route: FakeRoute) -> Self {
        self.routes.push(route);
        self
    }

    /// Treat another id as existing.
    #[must_use]
    pub fn with_known_id(mut self, id: i64) -> Self {
        self.known_ids.insert(id);
        self
    }

    /// Register an account.
    #[must_use]
    pub fn with_user(mut self, email: &str, password: &str) -> Self {
        self.state
            .get_mut()
            .users
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Misbehave by setting a cookie on every error response.
    #[must_use]
    pub const fn leaking_cookies(mut self) -> Self {
        self.leak_cookies = true;
        self
    }

    /// Number of registered accounts.
    pub async fn user_count(&self) -> usize {
        self.state.lock().await.users.len()
    }

    /// Number of refresh tokens that are still accepted.
    pub async fn live_refresh_tokens(&self) -> usize {
        self.state.lock().await.refresh_tokens.len()
    }

    fn route_for(&self, request: &ApiRequest) -> Result<&FakeRoute, Rejection> {
        let mut path_known = false;
        for route in &self.routes {
            if route.endpoint.path == request.path {
                if route.endpoint.method == request.method {
                    return Ok(route);
                }
                path_known = true;
            }
        }
        Err(if path_known {
            Rejection::MethodNotAllowed
        } else {
            Rejection::NotFound
        })
    }

    fn handle(&self, state: &mut State, request: &ApiRequest) -> Result<ApiResponse, Rejection> {
        let route = self.route_for(request)?;

        let session = match route.endpoint.auth.token_kind() {
            Some(kind) => Some(state.authenticate(request, kind)?),
            None => None,
        };

        let empty = Map::new();
        let body = match &request.body {
            None => &empty,
            Some(Value::Object(fields)) => fields,
            Some(_) => return Err(Rejection::BadRequest),
        };

        for rule in &route.fields {
            self.validate(rule, body, state, session.as_deref())?;
        }

        let mut response = ApiResponse::new(route.success, "");
        match route.action {
            Action::Accept => {}
            Action::CreateUser => {
                let email = text(body, "email").ok_or(Rejection::BadRequest)?;
                let pass = text(body, "pass").ok_or(Rejection::BadRequest)?;
                if state.users.contains_key(email) {
                    return Err(Rejection::AlreadyExists);
                }
                state.users.insert(email.to_string(), pass.to_string());
            }
            Action::IssueRefresh => {
                let email = text(body, "email").ok_or(Rejection::BadRequest)?;
                response = response.with_cookie(state.issue(TokenKind::Refresh, email));
            }
            Action::RotateRefresh => {
                let email = session.ok_or(Rejection::Unauthorised)?;
                if let Some(old) = request.cookies.get(TokenKind::Refresh) {
                    state.refresh_tokens.remove(&old.value);
                }
                response = response.with_cookie(state.issue(TokenKind::Refresh, &email));
            }
            Action::IssueAccess => {
                let email = session.ok_or(Rejection::Unauthorised)?;
                response = response.with_cookie(state.issue(TokenKind::Access, &email));
            }
            Action::ChangePassword => {
                let email = session.ok_or(Rejection::Unauthorised)?;
                let new_pass = text(body, "new_pass").ok_or(Rejection::BadRequest)?;
                state.users.insert(email, new_pass.to_string());
            }
            Action::DeleteUser => {
                let email = session.ok_or(Rejection::Unauthorised)?;
                state.forget(&email);
            }
        }
        Ok(response)
    }

    fn validate(
        &self,
        rule: &FieldRule,
        body: &Map<String, Value>,
        state: &State,
        session: Option<&str>,
    ) -> Result<(), Rejection> {
        let Some(value) = body.get(&rule.name) else {
            return if rule.optional {
                Ok(())
            } else {
                Err(Rejection::BadRequest)
            };
        };
        let value = value.as_str().ok_or(Rejection::BadRequest)?;

        match rule.kind {
            FieldKind::Id { sensitive } => {
                let id = parse_number(value)?;
                if self.known_ids.contains(&id) {
                    Ok(())
                } else if sensitive {
                    Err(Rejection::Unauthorised)
                } else {
                    Err(Rejection::BadRequest)
                }
            }
            FieldKind::Text => check_text(value),
            FieldKind::Email => {
                check_text(value)?;
                ensure(value.contains('@'))
            }
            FieldKind::NewPassword => check_password(value),
            FieldKind::CurrentPassword => {
                check_password(value)?;
                let owner = session.or_else(|| text(body, "email"));
                let stored = owner.and_then(|email| state.users.get(email));
                if stored.is_some_and(|pass| pass == value) {
                    Ok(())
                } else {
                    Err(Rejection::Unauthorised)
                }
            }
            FieldKind::Number => parse_number(value).map(|_| ()),
            FieldKind::Phone => {
                parse_number(value)?;
                ensure(value.len() <= MAX_PHONE_DIGITS)
            }
            FieldKind::Date => ensure(
                DATE_SHAPE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            ),
            FieldKind::Time => ensure(
                TIME_SHAPE.is_match(value) && NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok(),
            ),
            FieldKind::DateTime => ensure(
                DATETIME_SHAPE.is_match(value)
                    && NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok(),
            ),
        }
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError> {
        let mut state = self.state.lock().await;
        let response = match self.handle(&mut state, request) {
            Ok(response) => response,
            Err(rejection) => {
                let response = rejection.response();
                if self.leak_cookies {
                    response.with_cookie(ResponseCookie::new("AccessToken", "leaked"))
                } else {
                    response
                }
            }
        };
        Ok(response)
    }
}

fn text<'a>(body: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    body.get(name).and_then(Value::as_str)
}

const fn ensure(condition: bool) -> Result<(), Rejection> {
    if condition {
        Ok(())
    } else {
        Err(Rejection::BadRequest)
    }
}

fn check_text(value: &str) -> Result<(), Rejection> {
    ensure(!value.is_empty() && value.chars().count() <= MAX_TEXT_CHARS && !value.contains('\0'))
}

fn check_password(value: &str) -> Result<(), Rejection> {
    check_text(value)?;
    ensure(value.chars().count() >= MIN_PASSWORD_CHARS)
}

fn parse_number(value: &str) -> Result<i64, Rejection> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::BadRequest);
    }
    value.parse().map_err(|_| Rejection::BadRequest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{SampleAccount, TESTER_EMAIL, TESTER_PASSWORD};
    use auth_contract::{CookieJar, Method};
    use serde_json::json;

    async fn send(api: &FakeApi, request: ApiRequest) -> ApiResponse {
        api.execute(&request).await.unwrap()
    }

    fn credentials() -> ApiRequest {
        ApiRequest::new(Method::Post, "/token/get_refresh_token")
            .with_body(SampleAccount::tester().credentials())
    }

    #[tokio::test]
    async fn test_create_user_then_duplicate() {
        let api = FakeApi::new();
        let create = ApiRequest::new(Method::Post, "/user/create")
            .with_body(SampleAccount::tester().create_payload());

        assert_eq!(send(&api, create.clone()).await, ApiResponse::new(201, ""));
        assert_eq!(send(&api, create).await, ApiResponse::new(400, "Already exists"));
        assert_eq!(api.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let api = FakeApi::new();
        let request = ApiRequest::new(Method::Post, "/user/create")
            .with_body(json!({"email": TESTER_EMAIL, "pass": TESTER_PASSWORD}));

        assert_eq!(send(&api, request).await, ApiResponse::new(400, "Bad request"));
    }

    #[tokio::test]
    async fn test_wrong_method_and_unknown_path() {
        let api = FakeApi::new();

        let wrong = ApiRequest::new(Method::Patch, "/user/create");
        assert_eq!(send(&api, wrong).await.status, 405);

        let unknown = ApiRequest::new(Method::Get, "/nowhere");
        assert_eq!(send(&api, unknown).await.status, 404);
    }

    #[tokio::test]
    async fn test_rotation_invalidates_previous_refresh_token() {
        let api = FakeApi::new().with_user(TESTER_EMAIL, TESTER_PASSWORD);

        let issued = send(&api, credentials()).await;
        assert_eq!(issued.status, 200);
        let first = issued.token_jar();

        let rotate = ApiRequest::new(Method::Get, "/token/refresh_refresh_token");
        let rotated = send(&api, rotate.clone().with_cookies(first.clone())).await;
        assert_eq!(rotated.status, 200);
        assert_ne!(rotated.token_jar(), first);

        let replay = send(&api, rotate.with_cookies(first)).await;
        assert_eq!(replay, ApiResponse::new(403, "Unauthorised"));
        assert_eq!(api.live_refresh_tokens().await, 1);
    }

    #[tokio::test]
    async fn test_token_absence_and_wrong_kind() {
        let api = FakeApi::new().with_user(TESTER_EMAIL, TESTER_PASSWORD);
        let refresh = send(&api, credentials()).await.token_jar();

        let access = ApiRequest::new(Method::Get, "/token/get_access_token");
        let none = send(&api, access.clone()).await;
        assert_eq!(none, ApiResponse::new(400, "Bad request"));

        let issued = send(&api, access.clone().with_cookies(refresh)).await;
        let access_cookie = issued.token_jar().get(TokenKind::Access).cloned().unwrap();
        let wrong = CookieJar::with(access_cookie.renamed(TokenKind::Refresh));
        assert_eq!(
            send(&api, access.with_cookies(wrong)).await,
            ApiResponse::new(403, "Unauthorised")
        );
    }

    #[tokio::test]
    async fn test_incorrect_password_is_unauthorised() {
        let api = FakeApi::new().with_user(TESTER_EMAIL, TESTER_PASSWORD);
        let request = ApiRequest::new(Method::Post, "/token/get_refresh_token")
            .with_body(json!({"email": TESTER_EMAIL, "pass": "incorrect_tester_pass"}));
        assert_eq!(send(&api, request).await.status, 403);

        let short = ApiRequest::new(Method::Post, "/token/get_refresh_token")
            .with_body(json!({"email": TESTER_EMAIL, "pass": "tester_pass"}));
        assert_eq!(send(&api, short).await.status, 400);
    }

    #[tokio::test]
    async fn test_field_kinds() {
        let api = FakeApi::new().with_route(
            FakeRoute::new(Endpoint::post("/fields"), 201)
                .field(FieldRule::required("owner_id", FieldKind::Id { sensitive: true }))
                .field(FieldRule::optional("ref_id", FieldKind::Id { sensitive: false }))
                .field(FieldRule::optional("phone", FieldKind::Phone))
                .field(FieldRule::optional("day", FieldKind::Date))
                .field(FieldRule::optional("at", FieldKind::Time))
                .field(FieldRule::optional("due", FieldKind::DateTime)),
        );
        let status = |body: Value| {
            let api = &api;
            async move {
                send(api, ApiRequest::new(Method::Post, "/fields").with_body(body))
                    .await
                    .status
            }
        };

        assert_eq!(status(json!({"owner_id": "1"})).await, 201);
        assert_eq!(status(json!({"owner_id": "347653267853"})).await, 403);
        assert_eq!(status(json!({"owner_id": "1", "ref_id": "2"})).await, 400);
        assert_eq!(status(json!({"owner_id": "1a"})).await, 400);
        assert_eq!(status(json!({"owner_id": ["1"]})).await, 400);
        assert_eq!(status(json!({"owner_id": "347653267853".repeat(25)})).await, 400);
        assert_eq!(status(json!({"owner_id": "1", "phone": "123456789012345"})).await, 201);
        assert_eq!(status(json!({"owner_id": "1", "phone": "1234567890123456"})).await, 400);
        assert_eq!(status(json!({"owner_id": "1", "day": "2025-12-24"})).await, 201);
        assert_eq!(status(json!({"owner_id": "1", "day": "2025-13-24"})).await, 400);
        assert_eq!(status(json!({"owner_id": "1", "day": "2025-12-24\u{0}"})).await, 400);
        assert_eq!(status(json!({"owner_id": "1", "at": "02:99:02"})).await, 400);
        assert_eq!(status(json!({"owner_id": "1", "at": "02:02:2"})).await, 400);
        assert_eq!(status(json!({"owner_id": "1", "due": "2025-12-24 02:02:02"})).await, 201);
        assert_eq!(status(json!({"owner_id": "1", "due": "2025-12-24 25:02:02"})).await, 400);
    }

    #[tokio::test]
    async fn test_leaking_mode_sets_cookie_on_errors_only() {
        let api = FakeApi::new().leaking_cookies();

        let rejected = send(&api, ApiRequest::new(Method::Post, "/user/create")).await;
        assert!(rejected.is_error());
        assert!(rejected.carries_cookies());

        let created = send(
            &api,
            ApiRequest::new(Method::Post, "/user/create")
                .with_body(SampleAccount::tester().create_payload()),
        )
        .await;
        assert!(!created.carries_cookies());
    }

    #[tokio::test]
    async fn test_deleted_user_tokens_are_rejected() {
        let api = FakeApi::new().with_user(TESTER_EMAIL, TESTER_PASSWORD);
        let refresh = send(&api, credentials()).await.token_jar();
        let access = send(
            &api,
            ApiRequest::new(Method::Get, "/token/get_access_token").with_cookies(refresh),
        )
        .await
        .token_jar();

        let delete = ApiRequest::new(Method::Delete, "/user/delete")
            .with_cookies(access)
            .with_body(json!({"pass": TESTER_PASSWORD}));
        assert_eq!(send(&api, delete.clone()).await.status, 204);
        assert_eq!(send(&api, delete).await, ApiResponse::new(403, "Unauthorised"));
        assert_eq!(api.user_count().await, 0);
    }
}
