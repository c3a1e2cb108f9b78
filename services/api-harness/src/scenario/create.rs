//! Institution entity creation.
//!
//! Optional-field batteries create real entities when the field is omitted;
//! their distinct names and the order of calls here shape what the read
//! group expects.

use super::{SessionContext, Suite, protected_post};
use crate::assertion::AssertionEngine;
use crate::boundary::{DateTimeShape, FieldSpec, Payload, Sensitivity};
use crate::error::HarnessError;
use crate::payload;
use auth_contract::{CookieJar, Expectation};

/// 20 MiB of text plus one byte, above the gateway's body limit.
const OVERSIZED_CONTENT_LEN: usize = 20 * 1024 * 1024;

/// Text of the attachment every later read expects.
pub(super) const ATTACHMENT_CONTENTS: &str = "test_text test_text\ntest_text";

/// Rejection pattern, wrong method, creation and the duplicate check.
async fn create_and_duplicate(
    suite: &mut Suite<'_>,
    valid: &Payload,
    wrong: &CookieJar,
    duplicate: &str,
) -> Result<(), HarnessError> {
    suite.rejection(valid, wrong).await?;
    suite.wrong_method(valid).await?;
    suite.call(valid, Expectation::success(201)).await?;
    suite.call_as(duplicate, valid, Expectation::bad_request()).await?;
    Ok(())
}

fn plain_id(name: &str) -> FieldSpec {
    FieldSpec::id(name, Sensitivity::NonSensitive)
}

pub(super) async fn create_endpoints(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let access = &ctx.owner_session.access;
    let wrong = &ctx.owner_session.wrong_access;
    let institution_id = ctx.institution_id.as_str();
    let teacher_uid = ctx.teacher_uid.as_str();

    let valid = payload! { "intezmeny_id" => institution_id, "name" => "test_class", "headcount" => "30" };
    let mut class = Suite::new(engine, "Create class", protected_post("/intezmeny/create/class"), access);
    class.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    class.field(&valid, FieldSpec::string("name")).await?;
    class.field(&valid, FieldSpec::number("headcount")).await?;
    create_and_duplicate(&mut class, &valid, wrong, "already exists").await?;

    let valid = payload! { "intezmeny_id" => institution_id, "name" => "test_lesson" };
    let mut lesson = Suite::new(engine, "Create lesson", protected_post("/intezmeny/create/lesson"), access);
    lesson.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    lesson.field(&valid, FieldSpec::string("name")).await?;
    create_and_duplicate(&mut lesson, &valid, wrong, "already exists").await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "name" => "test_group",
        "headcount" => "30",
        "class_id" => "1",
    };
    let mut group = Suite::new(engine, "Create group", protected_post("/intezmeny/create/group"), access);
    group.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    group.field(&valid, FieldSpec::string("name")).await?;
    group.field(&valid, FieldSpec::number("headcount")).await?;
    group
        .field(
            &valid.with("name", "test_group_no_class_id"),
            plain_id("class_id").optional(201),
        )
        .await?;
    create_and_duplicate(&mut group, &valid, wrong, "group already exists").await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "type" => "test",
        "name" => "test_room",
        "space" => "30",
    };
    let mut room = Suite::new(engine, "Create room", protected_post("/intezmeny/create/room"), access);
    room.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    room.field(
        &valid.with("name", "test_room_no_type"),
        FieldSpec::string("type").optional(201),
    )
    .await?;
    room.field(&valid, FieldSpec::string("name")).await?;
    room.field(&valid, FieldSpec::number("space")).await?;
    create_and_duplicate(&mut room, &valid, wrong, "room already exists").await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "name" => "test_teacher",
        "job" => "test",
        "teacher_uid" => teacher_uid,
    };
    let mut teacher = Suite::new(engine, "Create teacher", protected_post("/intezmeny/create/teacher"), access);
    teacher.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    teacher.field(&valid, FieldSpec::string("name")).await?;
    teacher.field(&valid, FieldSpec::string("job")).await?;
    teacher
        .field(
            &valid.with("name", "test_teacher_no_user"),
            FieldSpec::sensitive_id("teacher_uid").optional(201),
        )
        .await?;
    create_and_duplicate(&mut teacher, &valid, wrong, "user already assigned as teacher").await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "duration" => "02:02:02",
        "day" => "4",
        "from" => "2020-12-24",
        "until" => "2020-12-25",
        "group_id" => "1",
        "lesson_id" => "1",
        "teacher_id" => "1",
        "room_id" => "1",
    };
    let mut element = Suite::new(
        engine,
        "Create timetable element",
        protected_post("/intezmeny/create/timetable_element"),
        access,
    );
    element.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
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
    for reference in ["group_id", "lesson_id", "teacher_id", "room_id"] {
        element.field(&valid, plain_id(reference).optional(201)).await?;
    }
    element
        .call_as(
            "until is before from",
            &valid.with("until", "2020-12-23"),
            Expectation::bad_request(),
        )
        .await?;
    element
        .call_as(
            "until is the same day as from",
            &valid.with("until", "2020-12-24"),
            Expectation::success(201),
        )
        .await?;
    element.rejection(&valid, wrong).await?;
    element.wrong_method(&valid).await?;
    element.call(&valid, Expectation::success(201)).await?;

    // Homeworks carry no uniqueness constraint.
    let valid = payload! {
        "intezmeny_id" => institution_id,
        "due" => "2020-12-24 02:02:02",
        "lesson_id" => "1",
        "teacher_id" => "1",
    };
    let mut homework = Suite::new(engine, "Create homework", protected_post("/intezmeny/create/homework"), access);
    homework.call(&valid, Expectation::success(201)).await?;
    homework
        .call_as("already exists", &valid, Expectation::success(201))
        .await?;
    homework.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    homework
        .field(
            &valid,
            FieldSpec::datetime("due", DateTimeShape::DateTime).optional(201),
        )
        .await?;
    homework.field(&valid, plain_id("lesson_id").optional(201)).await?;
    homework.field(&valid, plain_id("teacher_id").optional(201)).await?;
    homework.rejection(&valid, wrong).await?;
    homework.wrong_method(&valid).await?;

    let valid = payload! {
        "intezmeny_id" => institution_id,
        "homework_id" => "1",
        "file_name" => "test_file",
        "file_contents" => ATTACHMENT_CONTENTS,
    };
    let mut attachment = Suite::new(
        engine,
        "Create attachment",
        protected_post("/intezmeny/create/attachment"),
        access,
    );
    attachment.call(&valid, Expectation::success(201)).await?;
    attachment.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    attachment.field(&valid, FieldSpec::sensitive_id("homework_id")).await?;
    attachment.field(&valid, FieldSpec::string("file_name")).await?;
    attachment
        .call_as(
            "file name with illegal character",
            &valid.with("file_name", "test_file\0"),
            Expectation::bad_request(),
        )
        .await?;
    attachment
        .call_as(
            "no file contents",
            &valid.without("file_contents"),
            Expectation::bad_request(),
        )
        .await?;
    attachment
        .call_as(
            "file contents empty",
            &valid.with("file_contents", ""),
            Expectation::success(201),
        )
        .await?;
    attachment
        .call_as(
            "file contents is not string",
            &valid.with("file_contents", vec![ATTACHMENT_CONTENTS]),
            Expectation::bad_request(),
        )
        .await?;
    attachment
        .call_as(
            "file contents too long",
            &valid.with("file_contents", format!("{}+", "t".repeat(OVERSIZED_CONTENT_LEN))),
            Expectation::payload_too_large(),
        )
        .await?;
    attachment
        .call_as(
            "file contents with null character",
            &valid.with("file_contents", format!("{ATTACHMENT_CONTENTS}\0")),
            Expectation::success(201),
        )
        .await?;
    attachment.rejection(&valid, wrong).await?;
    attachment.wrong_method(&valid).await?;
    Ok(())
}
