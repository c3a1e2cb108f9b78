//! State carried from one scenario group to the next.

use super::extract::PLACEHOLDER_ID;
use super::{NO_PHONE_EMAIL, OWNER_EMAIL, PASSWORD, TEACHER_EMAIL};
use crate::token::{Credentials, Session};

/// Accounts, their sessions and the ids read back from the API.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Account that owns the institution
    pub owner: Credentials,
    /// Owner's cookies
    pub owner_session: Session,
    /// Account invited as a teacher
    pub teacher: Credentials,
    /// Teacher's cookies
    pub teacher_session: Session,
    /// Account created without a phone number
    pub no_phone: Credentials,
    /// Id of the institution created by the run
    pub institution_id: String,
    /// User id of the teacher account
    pub teacher_uid: String,
}

impl SessionContext {
    /// Fresh context; sessions are empty until the token groups run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: Credentials::new(OWNER_EMAIL, PASSWORD),
            owner_session: Session::default(),
            teacher: Credentials::new(TEACHER_EMAIL, PASSWORD),
            teacher_session: Session::default(),
            no_phone: Credentials::new(NO_PHONE_EMAIL, PASSWORD),
            institution_id: PLACEHOLDER_ID.to_string(),
            teacher_uid: PLACEHOLDER_ID.to_string(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
