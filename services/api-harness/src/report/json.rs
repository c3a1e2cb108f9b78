//! JSON-lines reporter.

use super::Reporter;
use auth_contract::{CaseRecord, RunSummary};
use serde::Serialize;
use std::io::{self, Write};
use uuid::Uuid;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    RunStarted {
        run_id: Uuid,
    },
    Case {
        run_id: Uuid,
        #[serde(flatten)]
        record: &'a CaseRecord,
    },
    Summary {
        run_id: Uuid,
        #[serde(flatten)]
        summary: &'a RunSummary,
        line: String,
    },
}

/// Writes one JSON object per event, tagged with a per-run id.
#[derive(Debug)]
pub struct JsonLinesReporter<W> {
    out: W,
    run_id: Uuid,
}

impl<W: Write> JsonLinesReporter<W> {
    /// Create a reporter writing to `out` with a fresh run id.
    pub fn new(out: W) -> Self {
        Self {
            out,
            run_id: Uuid::new_v4(),
        }
    }

    /// Id stamped on every line.
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Consume the reporter and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &Event<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write + Send> Reporter for JsonLinesReporter<W> {
    fn run_started(&mut self) -> io::Result<()> {
        let run_id = self.run_id;
        self.emit(&Event::RunStarted { run_id })
    }

    fn case_finished(&mut self, record: &CaseRecord) -> io::Result<()> {
        let run_id = self.run_id;
        self.emit(&Event::Case { run_id, record })
    }

    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        let run_id = self.run_id;
        self.emit(&Event::Summary {
            run_id,
            summary,
            line: summary.summary_line(),
        })
    }
}
