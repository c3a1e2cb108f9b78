//! Immutable request payload templates.

use serde_json::{Map, Value};

/// A JSON object body used as a template.
///
/// [`Payload::with`] and [`Payload::without`] return new payloads and leave
/// the template untouched, so one base payload can seed any number of cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Empty payload (`{}` on the wire).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Payload::with`].
    #[must_use]
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Copy with `field` set to `value`.
    #[must_use]
    pub fn with(&self, field: &str, value: impl Into<Value>) -> Self {
        self.clone().set(field, value)
    }

    /// Copy with `field` removed.
    #[must_use]
    pub fn without(&self, field: &str) -> Self {
        let mut copy = self.clone();
        copy.fields.remove(field);
        copy
    }

    /// Value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the field is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON body.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Self::Object(payload.fields)
    }
}

/// Build a [`Payload`] from `field => value` pairs.
///
/// ```
/// use api_harness::payload;
///
/// let body = payload! { "email" => "tester@test.com", "pass" => "tester_pass+" };
/// assert_eq!(body.len(), 2);
/// ```
#[macro_export]
macro_rules! payload {
    () => {
        $crate::boundary::Payload::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {
        $crate::boundary::Payload::new()$(.set($field, $value))+
    };
}
