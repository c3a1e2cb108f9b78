//! Institution entity deletion.

use super::{SessionContext, Suite, protected_delete};
use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, Sensitivity};
use crate::error::HarnessError;
use crate::payload;
use auth_contract::Expectation;

/// Description base, entity path segment and id field, in deletion order.
const ENTITIES: [(&str, &str, &str); 8] = [
    ("Delete class", "class", "class_id"),
    ("Delete lesson", "lesson", "lesson_id"),
    ("Delete group", "group", "group_id"),
    ("Delete room", "room", "room_id"),
    ("Delete teacher", "teacher", "teacher_id"),
    ("Delete timetable element", "timetable_element", "timetable_element_id"),
    ("Delete attachment", "attachment", "attachment_id"),
    ("Delete homework", "homework", "homework_id"),
];

pub(super) async fn delete_endpoints(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let access = &ctx.owner_session.access;
    let wrong = &ctx.owner_session.wrong_access;

    for (name, entity, id_field) in ENTITIES {
        let valid = payload! { "intezmeny_id" => ctx.institution_id.as_str(), id_field => "1" };
        let endpoint = protected_delete(&format!("/intezmeny/delete/{entity}"));
        let mut suite = Suite::new(&mut *engine, name, endpoint, access);
        suite.call(&valid, Expectation::success(204)).await?;
        suite.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
        suite
            .field(&valid, FieldSpec::id(id_field, Sensitivity::NonSensitive))
            .await?;
        suite.rejection(&valid, wrong).await?;
        suite.wrong_method(&valid).await?;
    }
    Ok(())
}
