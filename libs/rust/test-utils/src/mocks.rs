//! Mock implementations for testing.
//!
//! `MockTransport` records every request and answers from a script, falling
//! back to a fixed default response once the script is exhausted.

use async_trait::async_trait;
use auth_contract::{ApiRequest, ApiResponse, Transport};
use rust_common::PlatformError;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One scripted answer.
#[derive(Debug)]
enum Scripted {
    Respond(ApiResponse),
    Unavailable(String),
}

/// Recording transport with scripted responses.
#[derive(Debug, Clone)]
pub struct MockTransport {
    requests: Arc<RwLock<Vec<ApiRequest>>>,
    script: Arc<RwLock<VecDeque<Scripted>>>,
    fallback: ApiResponse,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            requests: Arc::default(),
            script: Arc::default(),
            fallback: ApiResponse::new(200, ""),
        }
    }
}

impl MockTransport {
    /// Create a mock answering `200` with an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock answering every request with the given response.
    #[must_use]
    pub fn always(response: ApiResponse) -> Self {
        Self {
            fallback: response,
            ..Self::default()
        }
    }

    /// Create a mock answering with the given responses in order.
    #[must_use]
    pub fn scripted(responses: impl IntoIterator<Item = ApiResponse>) -> Self {
        let script = responses.into_iter().map(Scripted::Respond).collect();
        Self {
            script: Arc::new(RwLock::new(script)),
            ..Self::default()
        }
    }

    /// Queue a response.
    pub async fn push_response(&self, response: ApiResponse) {
        self.script.write().await.push_back(Scripted::Respond(response));
    }

    /// Queue a connectivity failure.
    pub async fn push_unavailable(&self, message: &str) {
        self.script
            .write()
            .await
            .push_back(Scripted::Unavailable(message.to_string()));
    }

    /// Get all recorded requests.
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.read().await.clone()
    }

    /// Get the most recent request.
    pub async fn last_request(&self) -> Option<ApiRequest> {
        self.requests.read().await.last().cloned()
    }

    /// Get request count.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError> {
        self.requests.write().await.push(request.clone());

        match self.script.write().await.pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Unavailable(message)) => Err(PlatformError::unavailable(message)),
            None => Ok(self.fallback.clone()),
        }
    }
}
