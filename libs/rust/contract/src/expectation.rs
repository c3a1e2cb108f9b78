//! Expected outcome of a single case.

use serde::{Deserialize, Serialize};

/// Body of a malformed-request rejection.
pub const BAD_REQUEST: &str = "Bad request";

/// Body of an authorisation rejection.
pub const UNAUTHORISED: &str = "Unauthorised";

/// Body of a uniqueness-conflict rejection.
pub const ALREADY_EXISTS: &str = "Already exists";

/// Page the upstream nginx gateway serves for oversized bodies.
///
/// Compared byte for byte, CRLF line endings included.
pub const PAYLOAD_TOO_LARGE_PAGE: &str = "<html>\r\n<head><title>413 Request Entity Too Large</title></head>\r\n<body>\r\n<center><h1>413 Request Entity Too Large</h1></center>\r\n<hr><center>nginx</center>\r\n</body>\r\n</html>\r\n";

/// Expected status code and exact body.
///
/// Bodies are compared as raw strings, never as JSON values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expectation {
    /// Expected status code
    pub status: u16,
    /// Expected body, byte for byte
    pub body: String,
}

impl Expectation {
    /// Create an expectation.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Success with an empty body.
    #[must_use]
    pub fn success(status: u16) -> Self {
        Self::new(status, "")
    }

    /// 200 with the given body.
    #[must_use]
    pub fn ok_with_body(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// 400 "Bad request".
    #[must_use]
    pub fn bad_request() -> Self {
        Self::new(400, BAD_REQUEST)
    }

    /// 403 "Unauthorised".
    #[must_use]
    pub fn unauthorised() -> Self {
        Self::new(403, UNAUTHORISED)
    }

    /// 405 with an empty body.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(405, "")
    }

    /// 400 "Already exists".
    #[must_use]
    pub fn already_exists() -> Self {
        Self::new(400, ALREADY_EXISTS)
    }

    /// 413 with the gateway's HTML page.
    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::new(413, PAYLOAD_TOO_LARGE_PAGE)
    }

    /// Whether an error status is expected.
    #[must_use]
    pub const fn expects_error(&self) -> bool {
        self.status >= 400
    }
}
