//! Endpoint descriptors.

use crate::cookie::TokenKind;
use crate::http::{ApiRequest, Method};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session token an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRequirement {
    /// Public endpoint
    #[default]
    None,
    /// Requires a refresh token
    Refresh,
    /// Requires an access token
    Access,
}

impl AuthRequirement {
    /// Token kind the endpoint expects, if any.
    #[must_use]
    pub const fn token_kind(self) -> Option<TokenKind> {
        match self {
            Self::None => None,
            Self::Refresh => Some(TokenKind::Refresh),
            Self::Access => Some(TokenKind::Access),
        }
    }
}

/// Method, path and authentication requirement of one API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTP method the endpoint accepts
    pub method: Method,
    /// Path relative to the base URL
    pub path: String,
    /// Token required to call it
    pub auth: AuthRequirement,
}

impl Endpoint {
    /// Create a public endpoint.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            auth: AuthRequirement::None,
        }
    }

    /// Public GET endpoint.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Public POST endpoint.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Public DELETE endpoint.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Require a refresh token.
    #[must_use]
    pub const fn with_refresh(mut self) -> Self {
        self.auth = AuthRequirement::Refresh;
        self
    }

    /// Require an access token.
    #[must_use]
    pub const fn with_access(mut self) -> Self {
        self.auth = AuthRequirement::Access;
        self
    }

    /// Request for this endpoint with its own method.
    #[must_use]
    pub fn request(&self) -> ApiRequest {
        ApiRequest::new(self.method, self.path.clone())
    }

    /// Request for this endpoint's path with another method.
    #[must_use]
    pub fn request_with_method(&self, method: Method) -> ApiRequest {
        ApiRequest::new(method, self.path.clone())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
