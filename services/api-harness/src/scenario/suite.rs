//! Per-endpoint test helper.

use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, Payload, run_field};
use crate::error::HarnessError;
use crate::token::run_rejection;
use auth_contract::{ApiResponse, CookieJar, Endpoint, Expectation, Method};

/// Binds the engine to one endpoint, a description base and the cookies
/// valid cases are sent with.
pub struct Suite<'e> {
    engine: &'e mut AssertionEngine,
    name: String,
    endpoint: Endpoint,
    cookies: CookieJar,
}

impl<'e> Suite<'e> {
    /// Create a suite.
    pub fn new(
        engine: &'e mut AssertionEngine,
        name: impl Into<String>,
        endpoint: Endpoint,
        cookies: &CookieJar,
    ) -> Self {
        Self {
            engine,
            name: name.into(),
            endpoint,
            cookies: cookies.clone(),
        }
    }

    /// Description base.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint under test.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send a valid-cookie request without checking it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached.
    pub async fn send(&mut self, payload: &Payload) -> Result<ApiResponse, HarnessError> {
        let request = self
            .endpoint
            .request()
            .with_cookies(self.cookies.clone())
            .with_body(payload.to_value());
        self.engine.send(&request).await
    }

    /// Record a verdict for a response received through [`Suite::send`].
    ///
    /// # Errors
    ///
    /// Returns an error if the reporter fails.
    pub fn check(&mut self, response: &ApiResponse, expectation: &Expectation) -> Result<bool, HarnessError> {
        self.engine.check(&self.name, response, expectation)
    }

    /// Checked call described by the base name alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn call(&mut self, payload: &Payload, expectation: Expectation) -> Result<ApiResponse, HarnessError> {
        let description = self.name.clone();
        self.call_described(&description, payload, &expectation).await
    }

    /// Checked call described as `<name>, <detail>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn call_as(
        &mut self,
        detail: &str,
        payload: &Payload,
        expectation: Expectation,
    ) -> Result<ApiResponse, HarnessError> {
        let description = format!("{}, {detail}", self.name);
        self.call_described(&description, payload, &expectation).await
    }

    async fn call_described(
        &mut self,
        description: &str,
        payload: &Payload,
        expectation: &Expectation,
    ) -> Result<ApiResponse, HarnessError> {
        let request = self
            .endpoint
            .request()
            .with_cookies(self.cookies.clone())
            .with_body(payload.to_value());
        self.engine.probe(description, &request, expectation).await
    }

    /// Boundary battery for one field.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn field(&mut self, base: &Payload, field: FieldSpec) -> Result<(), HarnessError> {
        run_field(self.engine, &self.name, &self.endpoint, &self.cookies, base, &field).await?;
        Ok(())
    }

    /// Token rejection pattern without a reused token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn rejection(&mut self, payload: &Payload, wrong: &CookieJar) -> Result<(), HarnessError> {
        run_rejection(self.engine, &self.name, &self.endpoint, payload, wrong, None).await?;
        Ok(())
    }

    /// Token rejection pattern including a superseded refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn rejection_with_reused(
        &mut self,
        payload: &Payload,
        wrong: &CookieJar,
        reused: Option<&CookieJar>,
    ) -> Result<(), HarnessError> {
        run_rejection(self.engine, &self.name, &self.endpoint, payload, wrong, reused).await?;
        Ok(())
    }

    /// The endpoint called with `PATCH` must answer 405 with no body.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter fails.
    pub async fn wrong_method(&mut self, payload: &Payload) -> Result<(), HarnessError> {
        let description = format!("{}, method is not {}", self.name, self.endpoint.method);
        let request = self
            .endpoint
            .request_with_method(Method::Patch)
            .with_cookies(self.cookies.clone())
            .with_body(payload.to_value());
        self.engine
            .probe(&description, &request, &Expectation::method_not_allowed())
            .await?;
        Ok(())
    }
}
