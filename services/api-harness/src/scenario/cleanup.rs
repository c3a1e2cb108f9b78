//! Removal of the secondary accounts.

use super::{PASSWORD, SessionContext, Suite, protected_delete};
use crate::assertion::AssertionEngine;
use crate::error::HarnessError;
use crate::payload;
use crate::token::Session;
use auth_contract::Expectation;

pub(super) async fn cleanup(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let valid = payload! { "pass" => PASSWORD };

    let no_phone = Session::sign_in(engine, &ctx.no_phone, "no phone user").await?;
    Suite::new(
        engine,
        "Delete no phone number user",
        protected_delete("/user/delete"),
        &no_phone.access,
    )
    .call(&valid, Expectation::success(204))
    .await?;

    Suite::new(
        engine,
        "Delete teacher user",
        protected_delete("/user/delete"),
        &ctx.teacher_session.access,
    )
    .call(&valid, Expectation::success(204))
    .await?;
    Ok(())
}
