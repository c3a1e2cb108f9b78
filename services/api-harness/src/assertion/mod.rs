//! Assertion engine.
//!
//! Executes requests through a [`Transport`], checks each response against
//! its [`Expectation`] and keeps the run tally. Presentation is delegated to
//! a [`Reporter`].

mod verdict;

pub use verdict::evaluate;

use crate::error::HarnessError;
use crate::report::Reporter;
use auth_contract::{
    ApiRequest, ApiResponse, CaseRecord, Expectation, Outcome, RunSummary, Tally, Transport,
};
use tracing::{error, warn};

/// Runs cases one at a time and records their verdicts.
pub struct AssertionEngine {
    transport: Box<dyn Transport>,
    reporter: Box<dyn Reporter>,
    tally: Tally,
    records: Vec<CaseRecord>,
}

impl AssertionEngine {
    /// Create an engine over a transport and a reporter.
    pub fn new(transport: impl Transport + 'static, reporter: impl Reporter + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            reporter: Box::new(reporter),
            tally: Tally::default(),
            records: Vec::new(),
        }
    }

    /// Announce the start of the run to the reporter.
    ///
    /// # Errors
    ///
    /// Returns an error if the reporter cannot write.
    pub fn start(&mut self) -> Result<(), HarnessError> {
        self.reporter.run_started()?;
        Ok(())
    }

    /// Execute a request without checking it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HarnessError> {
        self.transport.execute(request).await.map_err(|e| {
            error!(
                method = %request.method,
                path = %request.path,
                connectivity = e.is_connectivity(),
                error = %e,
                "Transport failure"
            );
            HarnessError::from(e)
        })
    }

    /// Record the verdict for a received response.
    ///
    /// Returns whether the case passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the reporter cannot write.
    pub fn check(
        &mut self,
        description: &str,
        response: &ApiResponse,
        expectation: &Expectation,
    ) -> Result<bool, HarnessError> {
        let violations = evaluate(expectation, response);
        let outcome = Outcome::from_violations(&violations);
        let case_id = self.tally.record(outcome);

        if !outcome.is_pass() {
            warn!(
                case_id,
                description,
                expected_status = expectation.status,
                actual_status = response.status,
                violations = ?violations,
                "Case failed"
            );
        }

        let record = CaseRecord {
            case_id,
            description: description.to_string(),
            outcome,
            violations,
            expected_status: expectation.status,
            actual_status: response.status,
            expected_body: expectation.body.clone(),
            actual_body: response.body.clone(),
        };
        self.reporter.case_finished(&record)?;
        self.records.push(record);

        Ok(outcome.is_pass())
    }

    /// Execute a request, check it, and hand the response back.
    ///
    /// # Errors
    ///
    /// Returns an error if the API cannot be reached or the reporter cannot
    /// write.
    pub async fn probe(
        &mut self,
        description: &str,
        request: &ApiRequest,
        expectation: &Expectation,
    ) -> Result<ApiResponse, HarnessError> {
        let response = self.send(request).await?;
        self.check(description, &response, expectation)?;
        Ok(response)
    }

    /// Counters so far.
    #[must_use]
    pub const fn tally(&self) -> Tally {
        self.tally
    }

    /// Every case recorded so far, in run order.
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Summary of the cases recorded so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_records(&self.records)
    }

    /// Close the run and return its summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the reporter cannot write.
    pub fn finish(&mut self) -> Result<RunSummary, HarnessError> {
        let summary = self.summary();
        self.reporter.run_finished(&summary)?;
        Ok(summary)
    }
}
