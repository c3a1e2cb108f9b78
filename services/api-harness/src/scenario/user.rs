//! Account creation.

use super::{DISPLAY_NAME, PHONE_NUMBER, SessionContext, Suite};
use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, PasswordRole, Payload};
use crate::error::HarnessError;
use crate::token::Credentials;
use auth_contract::{CookieJar, Endpoint, Expectation};

pub(super) fn create_user_endpoint() -> Endpoint {
    Endpoint::post("/user/create")
}

/// Full sign-up body for an account.
pub(super) fn sign_up_payload(account: &Credentials) -> Payload {
    crate::payload! {
        "disp_name" => DISPLAY_NAME,
        "email" => account.email.as_str(),
        "phone_number" => PHONE_NUMBER,
        "pass" => account.password.as_str(),
    }
}

/// Sign-up batteries, the optional phone number and the duplicate account.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn create_user(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let valid = sign_up_payload(&ctx.owner);
    let mut suite = Suite::new(engine, "Create user", create_user_endpoint(), &CookieJar::new());

    suite.field(&valid, FieldSpec::string("disp_name")).await?;
    suite.field(&valid, FieldSpec::email()).await?;
    suite
        .field(&valid, FieldSpec::password("pass", PasswordRole::New))
        .await?;
    // Omitting the phone number signs up a second account.
    suite
        .field(
            &valid.with("email", ctx.no_phone.email.as_str()),
            FieldSpec::phone("phone_number").optional(201),
        )
        .await?;
    suite.wrong_method(&valid).await?;
    suite.call(&valid, Expectation::success(201)).await?;
    suite
        .call_as("user already exists", &valid, Expectation::already_exists())
        .await?;
    Ok(())
}
