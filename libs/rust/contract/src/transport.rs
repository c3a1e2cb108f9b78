//! Transport seam between the harness and the API under test.

use crate::http::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use rust_common::PlatformError;
use std::sync::Arc;

/// Executes one request and returns the fully consumed response.
///
/// Implementations must send exactly the cookies attached to the request
/// and must not keep cookies of their own between calls. A returned error
/// means the API could not be reached; HTTP error statuses are responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and wait for the whole response.
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, PlatformError> {
        (**self).execute(request).await
    }
}
