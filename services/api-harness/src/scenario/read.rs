//! Institution listings and attachment download.
//!
//! Expected bodies are the exact JSON text the API serialises after the
//! create and update groups.

use super::create::ATTACHMENT_CONTENTS;
use super::{PLACEHOLDER_ID, SessionContext, Suite, json_scalar, or_placeholder, protected_post};
use crate::assertion::AssertionEngine;
use crate::boundary::{FieldSpec, Payload};
use crate::error::HarnessError;
use crate::payload;
use auth_contract::{CookieJar, Expectation};

const CLASSES: &str = r#"[["1","test_class_updated"]]"#;

const LESSONS: &str = r#"[["1","test_lesson_updated"]]"#;

const GROUPS: &str = concat!(
    r#"[["1","test_group_updated","40","1","test_class_updated"],"#,
    r#"["2","test_group_updated_no_class_id","40",null,null],"#,
    r#"["3","test_group","30","1","test_class_updated"]]"#,
);

const ROOMS: &str = concat!(
    r#"[["1","test_room_updated","test_updated","40"],"#,
    r#"["2","test_room_updated_no_type",null,"40"]]"#,
);

const TIMETABLE: &str = concat!(
    r#"[["1","03:03:03","5","2021-11-23","2021-11-24","1","1","1","1"],"#,
    r#"["2","03:03:03","5","2021-11-23","2021-11-24",null,"1","1","1"],"#,
    r#"["3","03:03:03","5","2021-11-23","2021-11-24","1",null,"1","1"],"#,
    r#"["4","03:03:03","5","2021-11-23","2021-11-24","1","1",null,"1"],"#,
    r#"["5","03:03:03","5","2021-11-23","2021-11-24","1","1","1",null],"#,
    r#"["6","02:02:02","4","2020-12-24","2020-12-25","1","1","1","1"]]"#,
);

const HOMEWORKS_PATH: &str = "/intezmeny/get/homeworks";

/// Homework rows; the second column is server-generated and read back.
fn homeworks(generated: &[String]) -> String {
    let column = |row: usize| generated.get(row).map_or(PLACEHOLDER_ID, String::as_str);
    format!(
        concat!(
            r#"[["1","{}","2021-11-23 03:03:03","test_lesson_updated","test_teacher_updated_no_user",[[1,"test_file"],[2,"test_file"],[3,"test_file"]]],"#,
            r#"["2","{}",null,"test_lesson_updated","test_teacher_updated_no_user",[]],"#,
            r#"["3","{}","2021-11-23 03:03:03",null,"test_teacher_updated_no_user",[]],"#,
            r#"["4","{}","2021-11-23 03:03:03","test_lesson_updated",null,[]],"#,
            r#"["5","{}","2020-12-24 02:02:02","test_lesson_updated",null,[]]]"#,
        ),
        column(0),
        column(1),
        column(2),
        column(3),
        column(4),
    )
}

fn teachers(teacher_uid: &str) -> String {
    format!(
        r#"[["1","test_teacher_updated_no_user","test_updated",null,[],[]],["2","test_teacher_updated","test_updated","{teacher_uid}",[],[]]]"#
    )
}

/// Listing, institution id battery, rejection pattern and wrong method.
async fn listing(
    suite: &mut Suite<'_>,
    valid: &Payload,
    wrong: &CookieJar,
    expected: &str,
) -> Result<(), HarnessError> {
    suite.call(valid, Expectation::ok_with_body(expected)).await?;
    suite.field(valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    suite.rejection(valid, wrong).await?;
    suite.wrong_method(valid).await?;
    Ok(())
}

pub(super) async fn read_endpoints(engine: &mut AssertionEngine, ctx: &SessionContext) -> Result<(), HarnessError> {
    let access = &ctx.owner_session.access;
    let wrong = &ctx.owner_session.wrong_access;
    let valid = payload! { "intezmeny_id" => ctx.institution_id.as_str() };

    let fixed = [
        ("Get classes", "/intezmeny/get/classes", CLASSES.to_string()),
        ("Get lessons", "/intezmeny/get/lessons", LESSONS.to_string()),
        ("Get groups", "/intezmeny/get/groups", GROUPS.to_string()),
        ("Get rooms", "/intezmeny/get/rooms", ROOMS.to_string()),
        ("Get teachers", "/intezmeny/get/teachers", teachers(&ctx.teacher_uid)),
        ("Get timetable", "/intezmeny/get/timetable", TIMETABLE.to_string()),
    ];
    for (name, path, expected) in fixed {
        let mut suite = Suite::new(&mut *engine, name, protected_post(path), access);
        listing(&mut suite, &valid, wrong, &expected).await?;
    }

    let mut homework = Suite::new(&mut *engine, "Get homeworks", protected_post(HOMEWORKS_PATH), access);
    let response = homework.send(&valid).await?;
    let mut generated = Vec::with_capacity(5);
    for row in 0..5 {
        let pointer = format!("/{row}/1");
        generated.push(or_placeholder(
            json_scalar(&response, HOMEWORKS_PATH, &pointer),
            PLACEHOLDER_ID,
        )?);
    }
    homework.check(&response, &Expectation::ok_with_body(homeworks(&generated)))?;
    homework.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    homework.rejection(&valid, wrong).await?;
    homework.wrong_method(&valid).await?;

    let valid = valid.with("attachment_id", "1");
    let mut attachment = Suite::new(engine, "Get attachment", protected_post("/intezmeny/get/attachment"), access);
    attachment
        .call(&valid, Expectation::ok_with_body(ATTACHMENT_CONTENTS))
        .await?;
    attachment.field(&valid, FieldSpec::sensitive_id("intezmeny_id")).await?;
    attachment.field(&valid, FieldSpec::sensitive_id("attachment_id")).await?;
    attachment.rejection(&valid, wrong).await?;
    attachment.wrong_method(&valid).await?;
    Ok(())
}
