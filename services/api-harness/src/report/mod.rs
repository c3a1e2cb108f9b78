//! Run reporting.
//!
//! The assertion engine hands every finished case to a [`Reporter`]; how it
//! is shown is up to the implementation.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::JsonLinesReporter;

use crate::config::ReportFormat;
use auth_contract::{CaseRecord, RunSummary};
use std::io;

/// Receives run events in order.
pub trait Reporter: Send {
    /// Called once before the first case.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn run_started(&mut self) -> io::Result<()>;

    /// Called after every case, passed or failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn case_finished(&mut self, record: &CaseRecord) -> io::Result<()>;

    /// Called once after the last case.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn run_started(&mut self) -> io::Result<()> {
        (**self).run_started()
    }

    fn case_finished(&mut self, record: &CaseRecord) -> io::Result<()> {
        (**self).case_finished(record)
    }

    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        (**self).run_finished(summary)
    }
}

/// Reporter writing the given format to stdout.
#[must_use]
pub fn stdout_reporter(format: ReportFormat) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Console => Box::new(ConsoleReporter::new(io::stdout())),
        ReportFormat::Json => Box::new(JsonLinesReporter::new(io::stdout())),
    }
}
