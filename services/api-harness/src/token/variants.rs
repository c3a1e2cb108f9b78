//! Corrupted cookie jars.

use auth_contract::{CookieJar, TokenKind};

/// Copy of `jar` with its `kind` cookie presented as the other kind.
///
/// Value and path are kept. A jar without a `kind` cookie is returned
/// unchanged.
#[must_use]
pub fn as_wrong_kind(jar: &CookieJar, kind: TokenKind) -> CookieJar {
    let mut copy = jar.clone();
    if let Some(cookie) = copy.remove(kind) {
        copy.insert(cookie.renamed(kind.other()));
    }
    copy
}

/// Independent copy kept to be replayed after the original is rotated.
#[must_use]
pub fn as_reused(jar: &CookieJar) -> CookieJar {
    jar.clone()
}
