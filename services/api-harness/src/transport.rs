//! HTTP transport backed by reqwest.

use async_trait::async_trait;
use auth_contract::{ApiRequest, ApiResponse, Method, ResponseCookie, Transport};
use reqwest::Client;
use reqwest::header::COOKIE;
use rust_common::{HttpConfig, PlatformError, build_http_client};
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

/// Sends requests to the API under test over HTTP(S).
///
/// Every request carries a JSON body (`{}` when the request has none) and a
/// `Cookie` header built from exactly the attached jar. The response body is
/// read in full before the next request is built.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, http: &HttpConfig) -> Result<Self, PlatformError> {
        let client = build_http_client(http)?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a request path.
    ///
    /// The path is appended to the base URL, so a base with a path prefix
    /// keeps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url, PlatformError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| PlatformError::invalid_input(format!("invalid request URL {joined}: {e}")))
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError> {
        let url = self.url_for(&request.path)?;
        let body = request.body.clone().unwrap_or_else(|| json!({}));

        let mut builder = self
            .client
            .request(reqwest_method(request.method), url)
            .json(&body);
        if let Some(cookie_header) = request.cookies.header_value() {
            builder = builder.header(COOKIE, cookie_header);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let cookies: Vec<ResponseCookie> = response
            .cookies()
            .map(|cookie| ResponseCookie {
                name: cookie.name().to_string(),
                value: cookie.value().to_string(),
                path: cookie.path().map(str::to_string),
            })
            .collect();
        let bytes = response.bytes().await?;

        debug!(
            method = %request.method,
            path = %request.path,
            status,
            cookies = cookies.len(),
            "Request completed"
        );

        Ok(ApiResponse {
            status,
            body: decode_body(request, &bytes),
            cookies,
        })
    }
}

/// Response body as text. Invalid UTF-8 is replaced with U+FFFD and logged.
fn decode_body(request: &ApiRequest, bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(
                method = %request.method,
                path = %request.path,
                valid_up_to = e.valid_up_to(),
                "Response body is not valid UTF-8"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
