//! Institution lifecycle, invites and the teacher profile.

use super::user::{create_user_endpoint, sign_up_payload};
use super::{
    DISPLAY_NAME, INSTITUTION_NAME, PHONE_NUMBER, PLACEHOLDER_ID, SessionContext, Suite,
    TEACHER_EMAIL, json_scalar, last_row_scalar, or_placeholder, protected_delete, protected_get,
    protected_post,
};
use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, Payload};
use crate::error::HarnessError;
use crate::payload;
use crate::token::Session;
use auth_contract::{CookieJar, Expectation};

const LIST_INSTITUTIONS_PATH: &str = "/get_intezmenys";
const PROFILE_PATH: &str = "/user/profile";

pub(super) async fn create_institution(
    engine: &mut AssertionEngine,
    ctx: &mut SessionContext,
) -> Result<(), HarnessError> {
    let access = ctx.owner_session.access.clone();
    let wrong = ctx.owner_session.wrong_access.clone();

    let valid = payload! { "intezmeny_name" => INSTITUTION_NAME };
    let mut create = Suite::new(engine, "Create intezmeny", protected_post("/create_intezmeny"), &access);
    create.call(&valid, Expectation::success(201)).await?;
    create.field(&valid, FieldSpec::string("intezmeny_name")).await?;
    create.rejection(&valid, &wrong).await?;
    create.wrong_method(&valid).await?;

    // The new id is only known from the listing itself.
    let empty = Payload::new();
    let mut list = Suite::new(engine, "Get intezmenys", protected_get(LIST_INSTITUTIONS_PATH), &access);
    let response = list.send(&empty).await?;
    let institution_id = or_placeholder(
        last_row_scalar(&response, LIST_INSTITUTIONS_PATH, 0),
        PLACEHOLDER_ID,
    )?;
    list.check(
        &response,
        &Expectation::ok_with_body(format!("[[{institution_id},\"{INSTITUTION_NAME}\"]]")),
    )?;
    list.rejection(&empty, &wrong).await?;
    list.wrong_method(&empty).await?;

    ctx.institution_id = institution_id;
    Ok(())
}

pub(super) async fn invites(engine: &mut AssertionEngine, ctx: &mut SessionContext) -> Result<(), HarnessError> {
    Suite::new(engine, "Create teacher user", create_user_endpoint(), &CookieJar::new())
        .call(&sign_up_payload(&ctx.teacher), Expectation::success(201))
        .await?;
    let teacher = Session::sign_in(engine, &ctx.teacher, "teacher user").await?;

    let owner = &ctx.owner_session;
    let institution_id = ctx.institution_id.as_str();

    let valid = payload! { "intezmeny_id" => institution_id, "email" => TEACHER_EMAIL };
    let mut invite = Suite::new(engine, "Invite user", protected_post("/intezmeny/user/invite"), &owner.access);
    invite.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    invite.field(&valid, FieldSpec::email()).await?;
    invite.rejection(&valid, &owner.wrong_access).await?;
    invite.wrong_method(&valid).await?;
    invite.call(&valid, Expectation::success(200)).await?;
    invite
        .call_as("already invited", &valid, Expectation::already_exists())
        .await?;

    let valid = payload! { "intezmeny_id" => institution_id };
    let mut accept = Suite::new(
        engine,
        "Accept invite",
        protected_post("/intezmeny/user/accept_invite"),
        &teacher.access,
    );
    accept.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    accept.rejection(&valid, &owner.wrong_access).await?;
    accept.wrong_method(&valid).await?;
    accept.call(&valid, Expectation::success(200)).await?;
    accept
        .call_as("already accepted", &valid, Expectation::unauthorised())
        .await?;

    let empty = Payload::new();
    let mut profile = Suite::new(engine, "Get profile", protected_get(PROFILE_PATH), &teacher.access);
    profile.rejection(&empty, &owner.wrong_access).await?;
    profile.wrong_method(&empty).await?;
    let response = profile.send(&empty).await?;
    let teacher_uid = or_placeholder(json_scalar(&response, PROFILE_PATH, "/0"), PLACEHOLDER_ID)?;
    profile.check(
        &response,
        &Expectation::ok_with_body(format!(
            "[{teacher_uid},\"{DISPLAY_NAME}\",\"{TEACHER_EMAIL}\",\"{PHONE_NUMBER}\"]"
        )),
    )?;

    ctx.teacher_session = teacher;
    ctx.teacher_uid = teacher_uid;
    Ok(())
}

pub(super) async fn delete_institution(
    engine: &mut AssertionEngine,
    ctx: &SessionContext,
) -> Result<(), HarnessError> {
    let session = &ctx.owner_session;
    let valid = payload! { "intezmeny_id" => ctx.institution_id.as_str() };

    let mut suite = Suite::new(engine, "Delete intezmeny", protected_delete("/delete_intezmeny"), &session.access);
    suite.call(&valid, Expectation::success(204)).await?;
    suite.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    suite.rejection(&valid, &session.wrong_access).await?;
    suite.wrong_method(&valid).await?;
    Ok(())
}
