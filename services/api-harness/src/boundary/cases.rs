//! Boundary case generation.
//!
//! Each generator derives a fixed, ordered list of cases from a base payload
//! by changing one field only. The base payload may or may not already hold
//! the field; the first case of every battery omits it.

use super::field::{DateTimeShape, FieldSpec, FieldType, PasswordRole, Presence, Sensitivity};
use super::payload::Payload;
use auth_contract::Expectation;
use serde_json::Value;

/// A well-formed id no entity has.
pub const NONEXISTENT_ID: &str = "347653267853";

/// Repetitions of [`NONEXISTENT_ID`] that overflow a 64-bit integer.
const OVERSIZED_ID_REPEAT: usize = 25;

/// Repetitions of the filler that overflow a text column.
const TOO_LONG_REPEAT: usize = 300;

/// Digits that overflow a 64-bit integer.
const OVERSIZED_NUMBER_DIGITS: usize = 750;

/// An email address without `@`.
pub const EMAIL_WITHOUT_AT: &str = "testertest.com";

/// Eleven characters, one short of the minimum.
pub const SHORT_PASSWORD: &str = "tester_pass";

/// Long enough, but not the account's password.
pub const INCORRECT_PASSWORD: &str = "incorrect_tester_pass";

/// Sixteen digits, one more than a phone number may have.
pub const OVERLONG_PHONE: &str = "1234567890123456";

/// One request of a boundary battery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCase {
    /// Case description as reported
    pub description: String,
    /// Request body
    pub payload: Payload,
    /// Expected outcome
    pub expectation: Expectation,
}

impl BoundaryCase {
    fn new(description: String, payload: Payload, expectation: Expectation) -> Self {
        Self {
            description,
            payload,
            expectation,
        }
    }

    fn rejected(description: String, payload: Payload) -> Self {
        Self::new(description, payload, Expectation::bad_request())
    }
}

/// Generate the battery for one field.
#[must_use]
pub fn generate(base_message: &str, base: &Payload, field: &FieldSpec) -> Vec<BoundaryCase> {
    let name = field.name.as_str();
    match field.field_type {
        FieldType::Id(sensitivity) => id_cases(base_message, base, name, field.presence, sensitivity),
        FieldType::String => string_cases(base_message, base, name, field.presence),
        FieldType::Email => email_cases(base_message, base, name, field.presence),
        FieldType::Password(role) => password_cases(base_message, base, name, role),
        FieldType::Number => number_cases(base_message, base, name, field.presence),
        FieldType::Phone => phone_cases(base_message, base, name, field.presence),
        FieldType::DateTime(shape) => datetime_cases(base_message, base, name, field.presence, shape),
    }
}

fn absent_case(base_message: &str, base: &Payload, name: &str, presence: Presence) -> BoundaryCase {
    let expectation = match presence {
        Presence::Required => Expectation::bad_request(),
        Presence::Optional { success } => Expectation::success(success),
    };
    BoundaryCase::new(
        format!("{base_message}, no {name}"),
        base.without(name),
        expectation,
    )
}

fn list_of(value: &str) -> Value {
    Value::Array(vec![Value::from(value)])
}

/// Entity id battery.
#[must_use]
pub fn id_cases(
    base_message: &str,
    base: &Payload,
    name: &str,
    presence: Presence,
    sensitivity: Sensitivity,
) -> Vec<BoundaryCase> {
    let missing_entity = match sensitivity {
        Sensitivity::Sensitive => Expectation::unauthorised(),
        Sensitivity::NonSensitive => Expectation::bad_request(),
    };

    vec![
        absent_case(base_message, base, name, presence),
        BoundaryCase::new(
            format!("{base_message}, {name} does not exist"),
            base.with(name, NONEXISTENT_ID),
            missing_entity,
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} out of representable range of int"),
            base.with(name, NONEXISTENT_ID.repeat(OVERSIZED_ID_REPEAT)),
        ),
        BoundaryCase::rejected(format!("{base_message}, {name} id empty"), base.with(name, "")),
        BoundaryCase::rejected(
            format!("{base_message}, {name} is not string"),
            base.with(name, list_of("1")),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} is not numeric"),
            base.with(name, "1a"),
        ),
    ]
}

/// Free text battery.
///
/// Filler values contain `@` so the battery also fits email fields.
#[must_use]
pub fn string_cases(base_message: &str, base: &Payload, name: &str, presence: Presence) -> Vec<BoundaryCase> {
    let filler = format!("test@{name}");

    vec![
        absent_case(base_message, base, name, presence),
        BoundaryCase::rejected(format!("{base_message}, {name} empty"), base.with(name, "")),
        BoundaryCase::rejected(
            format!("{base_message}, {name} is not string"),
            base.with(name, list_of(&filler)),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} is too long"),
            base.with(name, filler.repeat(TOO_LONG_REPEAT)),
        ),
    ]
}

/// Email battery: the text battery plus a missing `@`.
#[must_use]
pub fn email_cases(base_message: &str, base: &Payload, name: &str, presence: Presence) -> Vec<BoundaryCase> {
    let mut cases = string_cases(base_message, base, name, presence);
    cases.push(BoundaryCase::rejected(
        format!("{base_message}, {name} with no @"),
        base.with(name, EMAIL_WITHOUT_AT),
    ));
    cases
}

/// Password battery.
///
/// A current password is also checked against the stored one.
#[must_use]
pub fn password_cases(base_message: &str, base: &Payload, name: &str, role: PasswordRole) -> Vec<BoundaryCase> {
    let mut cases = string_cases(base_message, base, name, Presence::Required);
    cases.push(BoundaryCase::rejected(
        format!("{base_message}, {name} length shorter than 12"),
        base.with(name, SHORT_PASSWORD),
    ));
    if role == PasswordRole::Current {
        cases.push(BoundaryCase::new(
            format!("{base_message}, incorrect {name}"),
            base.with(name, INCORRECT_PASSWORD),
            Expectation::unauthorised(),
        ));
    }
    cases
}

/// Integer battery.
#[must_use]
pub fn number_cases(base_message: &str, base: &Payload, name: &str, presence: Presence) -> Vec<BoundaryCase> {
    vec![
        absent_case(base_message, base, name, presence),
        BoundaryCase::rejected(format!("{base_message}, {name} empty"), base.with(name, "")),
        BoundaryCase::rejected(
            format!("{base_message}, {name} not string"),
            base.with(name, list_of("1")),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} is not numeric"),
            base.with(name, "1a"),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} is out of int's representable range"),
            base.with(name, "1".repeat(OVERSIZED_NUMBER_DIGITS)),
        ),
    ]
}

/// Phone number battery: the integer battery plus one digit too many.
#[must_use]
pub fn phone_cases(base_message: &str, base: &Payload, name: &str, presence: Presence) -> Vec<BoundaryCase> {
    let mut cases = number_cases(base_message, base, name, presence);
    cases.push(BoundaryCase::rejected(
        format!("{base_message}, {name} length longer than 15"),
        base.with(name, OVERLONG_PHONE),
    ));
    cases
}

/// Date/time battery for the given shape.
#[must_use]
pub fn datetime_cases(
    base_message: &str,
    base: &Payload,
    name: &str,
    presence: Presence,
    shape: DateTimeShape,
) -> Vec<BoundaryCase> {
    vec![
        absent_case(base_message, base, name, presence),
        BoundaryCase::rejected(format!("{base_message}, {name} empty"), base.with(name, "")),
        BoundaryCase::rejected(
            format!("{base_message}, invalid {name}"),
            base.with(name, shape.malformed()),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, null byte in {name}"),
            base.with(name, shape.with_nul()),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} not string"),
            base.with(name, list_of(shape.sample())),
        ),
        BoundaryCase::rejected(
            format!("{base_message}, {name} overflow"),
            base.with(name, shape.overflow()),
        ),
    ]
}
