//! Institution entity updates.

use super::{SessionContext, Suite, protected_post};
use crate::assertion::AssertionEngine;
use crate::boundary::{DateTimeShape, FieldSpec, Payload, Sensitivity};
use crate::error::HarnessError;
use crate::payload;
use auth_contract::{CookieJar, Expectation};

fn plain_id(name: &str) -> FieldSpec {
    FieldSpec::id(name, Sensitivity::NonSensitive)
}

/// Institution and entity id batteries every update starts with.
async fn ids(suite: &mut Suite<'_>, valid: &Payload, entity_id: &str) -> Result<(), HarnessError> {
    suite.field(valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    suite.field(valid, plain_id(entity_id)).await?;
    Ok(())
}

async fn reject_and_update(suite: &mut Suite<'_>, valid: &Payload, wrong: &CookieJar) -> Result<(), HarnessError> {
    suite.rejection(valid, wrong).await?;
    suite.wrong_method(valid).await?;
    suite.call(valid, Expectation::success(204)).await?;
    Ok(())
}

pub(super) async fn update_endpoints(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let access = &ctx.owner_session.access;
    let wrong = &ctx.owner_session.wrong_access;
    let institution_id = ctx.institution_id.as_str();
    let teacher_uid = ctx.teacher_uid.as_str();

    let valid = payload! { "intezmeny_id" => institution_id, "class_id" => "1", "name" => "test_class_updated" };
    let mut class = Suite::new(engine, "Update class", protected_post("/intezmeny/update/class"), access);
    ids(&mut class, &valid, "class_id").await?;
    class.field(&valid, FieldSpec::string("name")).await?;
    reject_and_update(&mut class, &valid, wrong).await?;

    let valid = payload! { "intezmeny_id" => institution_id, "lesson_id" => "1", "name" => "test_lesson_updated" };
    let mut lesson = Suite::new(engine, "Update lesson", protected_post("/intezmeny/update/lesson"), access);
    ids(&mut lesson, &valid, "lesson_id").await?;
    lesson.field(&valid, FieldSpec::string("name")).await?;
    reject_and_update(&mut lesson, &valid, wrong).await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "group_id" => "1",
        "name" => "test_group_updated",
        "headcount" => "40",
        "class_id" => "1",
    };
    let mut group = Suite::new(engine, "Update group", protected_post("/intezmeny/update/group"), access);
    ids(&mut group, &valid, "group_id").await?;
    group.field(&valid, FieldSpec::string("name")).await?;
    group.field(&valid, FieldSpec::number("headcount")).await?;
    group
        .field(
            &valid
                .with("group_id", "2")
                .with("name", "test_group_updated_no_class_id"),
            plain_id("class_id").optional(204),
        )
        .await?;
    reject_and_update(&mut group, &valid, wrong).await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "room_id" => "1",
        "type" => "test_updated",
        "name" => "test_room_updated",
        "space" => "40",
    };
    let mut room = Suite::new(engine, "Update room", protected_post("/intezmeny/update/room"), access);
    ids(&mut room, &valid, "room_id").await?;
    room.field(
        &valid
            .with("room_id", "2")
            .with("name", "test_room_updated_no_type"),
        FieldSpec::string("type").optional(204),
    )
    .await?;
    room.field(&valid, FieldSpec::string("name")).await?;
    room.field(&valid, FieldSpec::number("space")).await?;
    reject_and_update(&mut room, &valid, wrong).await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "teacher_id" => "2",
        "name" => "test_teacher_updated",
        "job" => "test_updated",
        "teacher_uid" => teacher_uid,
    };
    let mut teacher = Suite::new(engine, "Update teacher", protected_post("/intezmeny/update/teacher"), access);
    ids(&mut teacher, &valid, "teacher_id").await?;
    teacher.field(&valid, FieldSpec::string("name")).await?;
    teacher.field(&valid, FieldSpec::string("job")).await?;
    teacher
        .field(
            &valid
                .with("teacher_id", "1")
                .with("name", "test_teacher_updated_no_user"),
            FieldSpec::sensitive_id("teacher_uid").optional(204),
        )
        .await?;
    reject_and_update(&mut teacher, &valid, wrong).await?;
    teacher
        .call_as(
            "teacher user already assigned",
            &valid.with("teacher_id", "1"),
            Expectation::bad_request(),
        )
        .await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "element_id" => "1",
        "duration" => "03:03:03",
        "day" => "5",
        "from" => "2021-11-23",
        "until" => "2021-11-24",
        "group_id" => "1",
        "lesson_id" => "1",
        "teacher_id" => "1",
        "room_id" => "1",
    };
    let mut element = Suite::new(
        engine,
        "Update timetable element",
        protected_post("/intezmeny/update/timetable_element"),
        access,
    );
    ids(&mut element, &valid, "element_id").await?;
    element
        .field(&valid, FieldSpec::datetime("duration", DateTimeShape::Time))
        .await?;
    element.field(&valid, FieldSpec::number("day")).await?;
    element
        .field(&valid, FieldSpec::datetime("from", DateTimeShape::Date))
        .await?;
    element
        .field(&valid, FieldSpec::datetime("until", DateTimeShape::Date))
        .await?;
    // Each omitted reference is cleared on its own element.
    for (element_id, reference) in [("2", "group_id"), ("3", "lesson_id"), ("4", "teacher_id"), ("5", "room_id")] {
        element
            .field(
                &valid.with("element_id", element_id),
                plain_id(reference).optional(204),
            )
            .await?;
    }
    element
        .call_as(
            "until is before from",
            &valid.with("until", "2021-10-24"),
            Expectation::bad_request(),
        )
        .await?;
    element
        .call_as(
            "until is the same day as from",
            &valid.with("until", "2021-11-23"),
            Expectation::success(204),
        )
        .await?;
    reject_and_update(&mut element, &valid, wrong).await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "homework_id" => "1",
        "due" => "2021-11-23 03:03:03",
        "lesson_id" => "1",
        "teacher_id" => "1",
    };
    let mut homework = Suite::new(engine, "Update homework", protected_post("/intezmeny/update/homework"), access);
    ids(&mut homework, &valid, "homework_id").await?;
    for (homework_id, field) in [
        ("2", FieldSpec::datetime("due", DateTimeShape::DateTime)),
        ("3", plain_id("lesson_id")),
        ("4", plain_id("teacher_id")),
    ] {
        homework
            .field(&valid.with("homework_id", homework_id), field.optional(204))
            .await?;
    }
    reject_and_update(&mut homework, &valid, wrong).await?;
    Ok(())
}
