use std::process::ExitCode;

use anyhow::Context;
use api_harness::report::stdout_reporter;
use api_harness::{AssertionEngine, Config, HarnessError, HttpTransport, scenario};
use rust_common::init_tracing;
use tracing::{error, info};

/// Some cases failed under the strict exit policy.
const EXIT_FAILED_CASES: u8 = 1;

/// The run could not start or was aborted.
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            let unreachable = err
                .chain()
                .filter_map(|cause| cause.downcast_ref::<HarnessError>())
                .any(HarnessError::is_connectivity);
            error!(error = %format!("{err:#}"), unreachable, "Run aborted");
            eprintln!("api-harness: {err:#}");
            if unreachable {
                eprintln!("api-harness: the API under test could not be reached");
            }
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let config = Config::from_env().context("loading configuration")?;
    init_tracing(&config.tracing_config());

    info!(
        base_url = %config.base_url,
        report = %config.report_format,
        "Starting API contract harness"
    );

    let transport = HttpTransport::new(config.base_url.clone(), &config.http_config())
        .map_err(HarnessError::from)
        .context("building HTTP client")?;
    let mut engine = AssertionEngine::new(transport, stdout_reporter(config.report_format));

    let summary = scenario::run(&mut engine).await.context("scenario aborted")?;

    if config.exit_policy.fails_run(summary.all_passed()) {
        Ok(ExitCode::from(EXIT_FAILED_CASES))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
