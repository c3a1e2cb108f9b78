//! Terminal reporter.

use super::Reporter;
use auth_contract::{ApiResponse, CaseRecord, RunSummary};
use std::io::{self, Write};

/// Erase the current line and return to column 0.
const CLEAR_LINE: &str = "\x1b[2K\x1b[G";

/// Indentation of failure detail lines.
const DETAIL_INDENT: &str = "        ";

/// Keeps a single `Next test: N` progress line and prints details only for
/// failed cases.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Create a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn progress(&mut self, next_case: usize) -> io::Result<()> {
        write!(self.out, "Next test: {next_case}")?;
        self.out.flush()
    }
}

/// Indent continuation lines so multi-line bodies stay under their label.
fn indent_body(body: &str) -> String {
    body.split('\n').collect::<Vec<_>>().join(&format!("\n{DETAIL_INDENT}"))
}

fn received_body(body: &str) -> String {
    if body.is_empty() {
        ApiResponse::NO_CONTENT.to_string()
    } else {
        indent_body(body)
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self) -> io::Result<()> {
        self.progress(1)
    }

    fn case_finished(&mut self, record: &CaseRecord) -> io::Result<()> {
        write!(self.out, "{CLEAR_LINE}")?;

        if !record.passed() {
            writeln!(self.out, "{:>4} {}: ❌", record.case_id, record.description)?;
            if record.mismatched() {
                writeln!(
                    self.out,
                    "{DETAIL_INDENT}Test failed with status code: {}",
                    record.actual_status
                )?;
                writeln!(
                    self.out,
                    "{DETAIL_INDENT}Received body: {}",
                    received_body(&record.actual_body)
                )?;
                writeln!(
                    self.out,
                    "{DETAIL_INDENT}Expected body: {}",
                    indent_body(&record.expected_body)
                )?;
            }
            if record.leaked_cookies() {
                writeln!(self.out, "{DETAIL_INDENT}Endpoint returned cookies!!!")?;
            }
        }

        self.progress(record.case_id + 1)
    }

    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        write!(self.out, "{CLEAR_LINE}")?;
        writeln!(self.out, "{summary}")?;
        self.out.flush()
    }
}
