//! Account changes and account deletion.

use super::{PASSWORD, SessionContext, Suite, TEMPORARY_PASSWORD, protected_delete, protected_post};
use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, PasswordRole};
use crate::error::HarnessError;
use crate::payload;
use crate::token::{Session, get_access_token, get_refresh_token};
use auth_contract::Expectation;

/// Display name, phone number and password changes for the owner.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn change_user_data(
    engine: &mut AssertionEngine,
    ctx: &mut SessionContext,
) -> Result<(), HarnessError> {
    let access = ctx.owner_session.access.clone();
    let wrong = ctx.owner_session.wrong_access.clone();

    let valid = payload! { "new_disp_name" => "testerer" };
    let mut display_name = Suite::new(
        engine,
        "Change display name",
        protected_post("/user/change/display_name"),
        &access,
    );
    display_name.call(&valid, Expectation::success(204)).await?;
    display_name.field(&valid, FieldSpec::string("new_disp_name")).await?;
    display_name.rejection(&valid, &wrong).await?;
    display_name.wrong_method(&valid).await?;

    let valid = payload! { "new_phone_number" => "12345" };
    let mut phone = Suite::new(
        engine,
        "Change phone number",
        protected_post("/user/change/phone_number"),
        &access,
    );
    phone.call(&valid, Expectation::success(204)).await?;
    phone.field(&valid, FieldSpec::phone("new_phone_number")).await?;
    phone.rejection(&valid, &wrong).await?;
    phone.wrong_method(&valid).await?;

    // Switch to a temporary password and back, signing in with each.
    Suite::new(
        engine,
        "Change password",
        protected_post("/user/change/password"),
        &access,
    )
    .call(
        &payload! { "pass" => PASSWORD, "new_pass" => TEMPORARY_PASSWORD },
        Expectation::success(204),
    )
    .await?;

    let temporary = ctx.owner.with_password(TEMPORARY_PASSWORD);
    let refresh = get_refresh_token(engine, "Get refresh token", &temporary).await?;
    let temporary_access = get_access_token(engine, "Get access token", &refresh).await?;

    Suite::new(
        engine,
        "Change password back",
        protected_post("/user/change/password"),
        &temporary_access,
    )
    .call(
        &payload! { "pass" => TEMPORARY_PASSWORD, "new_pass" => PASSWORD },
        Expectation::success(204),
    )
    .await?;

    let session = Session::establish(engine, &ctx.owner).await?;

    let valid = payload! { "pass" => PASSWORD, "new_pass" => PASSWORD };
    let mut password = Suite::new(
        engine,
        "Change password",
        protected_post("/user/change/password"),
        &session.access,
    );
    password
        .field(&valid, FieldSpec::password("pass", PasswordRole::Current))
        .await?;
    password
        .field(&valid, FieldSpec::password("new_pass", PasswordRole::New))
        .await?;
    password.rejection(&valid, &session.wrong_access).await?;
    password.wrong_method(&valid).await?;

    ctx.owner_session = session;
    Ok(())
}

/// Owner account deletion.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn delete_user(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let session = &ctx.owner_session;
    let valid = payload! { "pass" => PASSWORD };

    let mut suite = Suite::new(engine, "Delete user", protected_delete("/user/delete"), &session.access);
    suite.rejection(&valid, &session.wrong_access).await?;
    suite.wrong_method(&valid).await?;
    suite.call(&valid, Expectation::success(204)).await?;
    suite
        .call_as("user does not exist", &valid, Expectation::unauthorised())
        .await?;
    Ok(())
}
