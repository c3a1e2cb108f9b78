//! Request and response types exchanged with the API under test.

use crate::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request issued against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path: String,
    /// Cookies attached to the request, exactly as given
    pub cookies: CookieJar,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request without cookies or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            cookies: CookieJar::new(),
            body: None,
        }
    }

    /// Attach a cookie jar.
    #[must_use]
    pub fn with_cookies(mut self, cookies: CookieJar) -> Self {
        self.cookies = cookies;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a top-level string field of the JSON body.
    #[must_use]
    pub fn body_field(&self, name: &str) -> Option<&serde_json::Value> {
        self.body.as_ref().and_then(|body| body.get(name))
    }
}

/// A cookie set by the server through `Set-Cookie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// `Path` attribute, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ResponseCookie {
    /// Create a cookie without a path attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
        }
    }

    /// Set the `Path` attribute.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A fully consumed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Status code
    pub status: u16,
    /// Raw body text, compared byte for byte
    pub body: String,
    /// Cookies the response tried to set
    pub cookies: Vec<ResponseCookie>,
}

impl ApiResponse {
    /// Placeholder shown in reports instead of an empty body.
    pub const NO_CONTENT: &'static str = "[No Content]";

    /// Create a response without cookies.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    /// Add a `Set-Cookie` cookie.
    #[must_use]
    pub fn with_cookie(mut self, cookie: ResponseCookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Whether the response tried to set any cookie.
    #[must_use]
    pub fn carries_cookies(&self) -> bool {
        !self.cookies.is_empty()
    }

    /// Whether the status is a client or server error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Body as shown in reports.
    #[must_use]
    pub fn display_body(&self) -> &str {
        if self.body.is_empty() {
            Self::NO_CONTENT
        } else {
            &self.body
        }
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Session token cookies set by this response.
    #[must_use]
    pub fn token_jar(&self) -> CookieJar {
        CookieJar::from_response_cookies(&self.cookies)
    }
}
