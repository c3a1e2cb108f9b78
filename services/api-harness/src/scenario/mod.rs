//! The ordered end-to-end scenario.
//!
//! Groups run in a fixed order over one [`SessionContext`]. Each group
//! leaves the backend in the state the next one builds on, so the run is
//! only meaningful against a fresh backend and end to end.

mod account;
mod cleanup;
mod context;
mod create;
mod delete;
mod extract;
mod institution;
mod read;
mod suite;
mod tokens;
mod update;
mod user;

pub use account::{change_user_data, delete_user};
pub use context::SessionContext;
pub use extract::{PLACEHOLDER_ID, json_scalar, last_row_scalar, or_placeholder, scalar_text};
pub use suite::Suite;
pub use tokens::token_lifecycle;
pub use user::create_user;

use crate::assertion::AssertionEngine;
use crate::error::HarnessError;
use auth_contract::{Endpoint, RunSummary};
use tracing::info;

/// Email of the account that owns the institution.
pub const OWNER_EMAIL: &str = "tester@test.com";

/// Email of the account created without a phone number.
pub const NO_PHONE_EMAIL: &str = "tester_no_phone@test.com";

/// Email of the account invited as a teacher.
pub const TEACHER_EMAIL: &str = "tester_teacher@test.com";

/// Password of every account.
pub const PASSWORD: &str = "tester_pass+";

/// Password the owner switches to and back from.
pub const TEMPORARY_PASSWORD: &str = "tmp_tester_pass";

/// Display name of every account.
pub const DISPLAY_NAME: &str = "tester";

/// Phone number of the accounts that have one.
pub const PHONE_NUMBER: &str = "123456789012345";

/// Name of the institution the run creates.
pub const INSTITUTION_NAME: &str = "tester_intezmeny";

/// POST endpoint requiring an access token.
fn protected_post(path: &str) -> Endpoint {
    Endpoint::post(path).with_access()
}

/// GET endpoint requiring an access token.
fn protected_get(path: &str) -> Endpoint {
    Endpoint::get(path).with_access()
}

/// DELETE endpoint requiring an access token.
fn protected_delete(path: &str) -> Endpoint {
    Endpoint::delete(path).with_access()
}

/// Run every group in order and close the run.
///
/// # Errors
///
/// Returns the first fatal error; failed cases are not errors.
pub async fn run(engine: &mut AssertionEngine) -> Result<RunSummary, HarnessError> {
    let mut ctx = SessionContext::new();
    engine.start()?;

    info!("Running user creation");
    user::create_user(engine, &ctx).await?;
    info!("Running token lifecycle");
    tokens::token_lifecycle(engine, &mut ctx).await?;
    info!("Running account changes");
    account::change_user_data(engine, &mut ctx).await?;
    info!("Running institution creation");
    institution::create_institution(engine, &mut ctx).await?;
    info!("Running invites");
    institution::invites(engine, &mut ctx).await?;
    info!("Running create endpoints");
    create::create_endpoints(engine, &ctx).await?;
    info!("Running update endpoints");
    update::update_endpoints(engine, &ctx).await?;
    info!("Running read endpoints");
    read::read_endpoints(engine, &ctx).await?;
    info!("Running delete endpoints");
    delete::delete_endpoints(engine, &ctx).await?;
    info!("Running institution deletion");
    institution::delete_institution(engine, &ctx).await?;
    info!("Running user deletion");
    account::delete_user(engine, &ctx).await?;
    info!("Running cleanup");
    cleanup::cleanup(engine, &ctx).await?;

    let summary = engine.finish()?;
    info!(passed = summary.passed, total = summary.total, "Run finished");
    Ok(summary)
}
