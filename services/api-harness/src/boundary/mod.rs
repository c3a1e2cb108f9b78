//! Field boundary generators.
//!
//! A field is described once with a [`FieldSpec`]; [`generate`] turns it into
//! a deterministic battery of [`BoundaryCase`]s against a base [`Payload`],
//! and [`run_field`] sends them through the assertion engine.

mod cases;
mod field;
mod payload;
mod runner;

pub use cases::{
    BoundaryCase, EMAIL_WITHOUT_AT, INCORRECT_PASSWORD, NONEXISTENT_ID, OVERLONG_PHONE,
    SHORT_PASSWORD, datetime_cases, email_cases, generate, id_cases, number_cases, password_cases,
    phone_cases, string_cases,
};
pub use field::{DateTimeShape, FieldSpec, FieldType, PasswordRole, Presence, Sensitivity};
pub use payload::Payload;
pub use runner::{run_cases, run_field};
