//! Declarative field descriptions.

/// Whether a field may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// Omitting the field is a malformed request
    #[default]
    Required,
    /// Omitting the field succeeds with the given status
    Optional {
        /// Success status code of the endpoint
        success: u16,
    },
}

/// How the API treats a reference to an entity that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensitivity {
    /// Ownership-checked reference: a foreign id is unauthorised (403)
    Sensitive,
    /// Plain reference: a foreign id is a bad request (400)
    NonSensitive,
}

/// Whether a password field sets a new password or proves the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRole {
    /// Only the length rule applies
    New,
    /// Also checked against the stored password
    Current,
}

/// Shape of a date/time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeShape {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM:SS`
    Time,
    /// `YYYY-MM-DD HH:MM:SS`
    DateTime,
}

impl DateTimeShape {
    /// A valid value of this shape.
    #[must_use]
    pub const fn sample(self) -> &'static str {
        match self {
            Self::Date => "2025-12-24",
            Self::Time => "02:02:02",
            Self::DateTime => "2025-12-24 02:02:02",
        }
    }

    /// A value that does not match the shape.
    #[must_use]
    pub const fn malformed(self) -> &'static str {
        match self {
            Self::Date => "2025-12-24a",
            Self::Time => "02:02:2",
            Self::DateTime => "2025-12-24 02:2:02",
        }
    }

    /// A valid value followed by a NUL byte.
    #[must_use]
    pub const fn with_nul(self) -> &'static str {
        match self {
            Self::Date => "2025-12-24\0",
            Self::Time => "02:02:02\0",
            Self::DateTime => "2025-12-24 02:02:02\0",
        }
    }

    /// A well-formed value with an out-of-range component.
    #[must_use]
    pub const fn overflow(self) -> &'static str {
        match self {
            Self::Date => "2025-13-24",
            Self::Time => "02:99:02",
            Self::DateTime => "2025-12-24 25:02:02",
        }
    }
}

/// Semantic type of a field, selecting its boundary battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Numeric entity id sent as a string
    Id(Sensitivity),
    /// Free text
    String,
    /// Email address
    Email,
    /// Password
    Password(PasswordRole),
    /// Integer sent as a string
    Number,
    /// Phone number, at most 15 digits
    Phone,
    /// Date, time or datetime
    DateTime(DateTimeShape),
}

/// One field of an endpoint's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key
    pub name: String,
    /// Semantic type
    pub field_type: FieldType,
    /// Whether the field may be omitted
    pub presence: Presence,
}

impl FieldSpec {
    /// Create a required field.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            presence: Presence::Required,
        }
    }

    /// Entity id.
    #[must_use]
    pub fn id(name: impl Into<String>, sensitivity: Sensitivity) -> Self {
        Self::new(name, FieldType::Id(sensitivity))
    }

    /// Ownership-checked entity id.
    #[must_use]
    pub fn sensitive_id(name: impl Into<String>) -> Self {
        Self::id(name, Sensitivity::Sensitive)
    }

    /// Free text.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// The `email` field.
    #[must_use]
    pub fn email() -> Self {
        Self::new("email", FieldType::Email)
    }

    /// Password.
    #[must_use]
    pub fn password(name: impl Into<String>, role: PasswordRole) -> Self {
        Self::new(name, FieldType::Password(role))
    }

    /// Integer.
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Phone number.
    #[must_use]
    pub fn phone(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Phone)
    }

    /// Date, time or datetime.
    #[must_use]
    pub fn datetime(name: impl Into<String>, shape: DateTimeShape) -> Self {
        Self::new(name, FieldType::DateTime(shape))
    }

    /// Mark the field optional; omitting it succeeds with `success`.
    ///
    /// Passwords stay required.
    #[must_use]
    pub fn optional(mut self, success: u16) -> Self {
        if !matches!(self.field_type, FieldType::Password(_)) {
            self.presence = Presence::Optional { success };
        }
        self
    }
}
