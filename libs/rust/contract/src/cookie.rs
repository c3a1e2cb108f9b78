//! Session token cookies.
//!
//! The API authenticates with two cookies, `RefreshToken` and `AccessToken`.
//! Token values are opaque: they are captured from `Set-Cookie`, replayed
//! verbatim and never parsed. Only the kind (the cookie name) is ever changed.

use crate::http::ResponseCookie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The two session token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Long-lived token exchanged for access tokens, single-use across rotation
    Refresh,
    /// Short-lived token authorising protected calls
    Access,
}

impl TokenKind {
    /// Cookie name carrying this kind.
    #[must_use]
    pub const fn cookie_name(self) -> &'static str {
        match self {
            Self::Refresh => "RefreshToken",
            Self::Access => "AccessToken",
        }
    }

    /// The opposite kind.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Refresh => Self::Access,
            Self::Access => Self::Refresh,
        }
    }

    /// Resolve a cookie name to a token kind.
    #[must_use]
    pub fn from_cookie_name(name: &str) -> Option<Self> {
        match name {
            "RefreshToken" => Some(Self::Refresh),
            "AccessToken" => Some(Self::Access),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cookie_name())
    }
}

/// One token cookie: kind, opaque value and the path the server scoped it to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCookie {
    /// Token kind, i.e. the cookie name on the wire
    pub kind: TokenKind,
    /// Opaque token value
    pub value: String,
    /// `Path` attribute the server set
    pub path: Option<String>,
}

impl TokenCookie {
    /// Create a token cookie without a path.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            path: None,
        }
    }

    /// Set the path attribute.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The same value and path under another kind.
    #[must_use]
    pub fn renamed(&self, kind: TokenKind) -> Self {
        Self {
            kind,
            value: self.value.clone(),
            path: self.path.clone(),
        }
    }
}

/// A cookie jar holding at most one token per kind.
///
/// Every cookie in the jar is sent with the request it is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: BTreeMap<TokenKind, TokenCookie>,
}

impl CookieJar {
    /// Create an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a jar holding one cookie.
    #[must_use]
    pub fn with(cookie: TokenCookie) -> Self {
        let mut jar = Self::new();
        jar.insert(cookie);
        jar
    }

    /// Capture the token cookies among a response's `Set-Cookie` list.
    ///
    /// Cookies with other names are ignored; a later cookie of the same kind
    /// replaces an earlier one, as a browser would.
    #[must_use]
    pub fn from_response_cookies(cookies: &[ResponseCookie]) -> Self {
        let mut jar = Self::new();
        for cookie in cookies {
            if let Some(kind) = TokenKind::from_cookie_name(&cookie.name) {
                jar.insert(TokenCookie {
                    kind,
                    value: cookie.value.clone(),
                    path: cookie.path.clone(),
                });
            }
        }
        jar
    }

    /// Insert a cookie, replacing any cookie of the same kind.
    pub fn insert(&mut self, cookie: TokenCookie) -> Option<TokenCookie> {
        self.cookies.insert(cookie.kind, cookie)
    }

    /// Remove the cookie of the given kind.
    pub fn remove(&mut self, kind: TokenKind) -> Option<TokenCookie> {
        self.cookies.remove(&kind)
    }

    /// Cookie of the given kind.
    #[must_use]
    pub fn get(&self, kind: TokenKind) -> Option<&TokenCookie> {
        self.cookies.get(&kind)
    }

    /// Whether the jar holds a cookie of the given kind.
    #[must_use]
    pub fn contains(&self, kind: TokenKind) -> bool {
        self.cookies.contains_key(&kind)
    }

    /// Number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterate over the cookies in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &TokenCookie> {
        self.cookies.values()
    }

    /// `Cookie` request header value, `None` for an empty jar.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .iter()
            .map(|cookie| format!("{}={}", cookie.kind.cookie_name(), cookie.value))
            .collect();
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_names() {
        assert_eq!(TokenKind::Refresh.cookie_name(), "RefreshToken");
        assert_eq!(TokenKind::Access.cookie_name(), "AccessToken");
        assert_eq!(TokenKind::from_cookie_name("AccessToken"), Some(TokenKind::Access));
        assert_eq!(TokenKind::from_cookie_name("accesstoken"), None);
        assert_eq!(TokenKind::Refresh.other(), TokenKind::Access);
        assert_eq!(TokenKind::Access.other().other(), TokenKind::Access);
    }

    #[test]
    fn test_renamed_keeps_value_and_path() {
        let cookie = TokenCookie::new(TokenKind::Refresh, "abc").with_path("/token/");
        let renamed = cookie.renamed(TokenKind::Access);

        assert_eq!(renamed.kind, TokenKind::Access);
        assert_eq!(renamed.value, "abc");
        assert_eq!(renamed.path.as_deref(), Some("/token/"));
    }

    #[test]
    fn test_header_value() {
        assert_eq!(CookieJar::new().header_value(), None);

        let mut jar = CookieJar::with(TokenCookie::new(TokenKind::Access, "a1"));
        assert_eq!(jar.header_value().as_deref(), Some("AccessToken=a1"));

        jar.insert(TokenCookie::new(TokenKind::Refresh, "r1"));
        assert_eq!(jar.header_value().as_deref(), Some("RefreshToken=r1; AccessToken=a1"));
    }

    #[test]
    fn test_insert_replaces_same_kind() {
        let mut jar = CookieJar::with(TokenCookie::new(TokenKind::Refresh, "old"));
        let previous = jar.insert(TokenCookie::new(TokenKind::Refresh, "new"));

        assert_eq!(previous.map(|c| c.value), Some("old".to_string()));
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.get(TokenKind::Refresh).map(|c| c.value.as_str()), Some("new"));
    }

    #[test]
    fn test_from_response_cookies_last_wins() {
        let cookies = vec![
            ResponseCookie::new("AccessToken", "first"),
            ResponseCookie::new("AccessToken", "second").with_path("/"),
        ];
        let jar = CookieJar::from_response_cookies(&cookies);

        assert_eq!(jar.len(), 1);
        let cookie = jar.get(TokenKind::Access).unwrap();
        assert_eq!(cookie.value, "second");
        assert_eq!(cookie.path.as_deref(), Some("/"));
    }
}
