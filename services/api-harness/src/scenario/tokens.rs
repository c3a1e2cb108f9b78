//! Token issuance, rotation and rejection.

use super::{SessionContext, Suite};
use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, PasswordRole, Payload};
use crate::error::HarnessError;
use crate::token::{
    Session, get_access_token_endpoint, get_refresh_token, get_refresh_token_endpoint,
    refresh_refresh_token_endpoint,
};
use auth_contract::CookieJar;

/// Credential exchange batteries, then rotation and token rejection for the
/// owner, whose session is stored in `ctx`.
///
/// # Errors
///
/// Returns an error if the API cannot be reached or the reporter fails.
pub async fn token_lifecycle(engine: &mut AssertionEngine, ctx: &mut SessionContext) -> Result<(), HarnessError> {
    let refresh = get_refresh_token(engine, "Get refresh token", &ctx.owner).await?;

    let credentials = ctx.owner.payload();
    let mut exchange = Suite::new(
        engine,
        "Get refresh token",
        get_refresh_token_endpoint(),
        &CookieJar::new(),
    );
    exchange.field(&credentials, FieldSpec::email()).await?;
    exchange
        .field(&credentials, FieldSpec::password("pass", PasswordRole::Current))
        .await?;
    exchange.wrong_method(&credentials).await?;

    let session = Session::resume(engine, &refresh).await?;
    let empty = Payload::new();

    Suite::new(
        engine,
        "Refresh refresh token",
        refresh_refresh_token_endpoint(),
        &session.refresh,
    )
    .rejection_with_reused(&empty, &session.wrong_refresh, session.reused_refresh.as_ref())
    .await?;

    Suite::new(
        engine,
        "Get access token",
        get_access_token_endpoint(),
        &session.refresh,
    )
    .rejection_with_reused(&empty, &session.wrong_refresh, session.reused_refresh.as_ref())
    .await?;

    ctx.owner_session = session;
    Ok(())
}
