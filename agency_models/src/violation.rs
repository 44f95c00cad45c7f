use std::fmt;

/// A single field level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is missing.
    Required,
    /// The field is present but does not hold a string.
    NotAString,
    /// The field is empty after trimming, but must not be.
    Empty,
    TooShort {
        min: usize,
    },
    TooLong {
        max: usize,
    },
    InvalidEmail,
    /// The field is not part of the schema.
    NotAllowed,
    /// The value as a whole is not an object.
    NotAnObject,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = &self.field;
        match self.kind {
            ViolationKind::Required => write!(f, "\"{field}\" is required"),
            ViolationKind::NotAString => write!(f, "\"{field}\" must be a string"),
            ViolationKind::Empty => write!(f, "\"{field}\" is not allowed to be empty"),
            ViolationKind::TooShort { min } => {
                write!(f, "\"{field}\" length must be at least {min} characters long")
            }
            ViolationKind::TooLong { max } => write!(
                f,
                "\"{field}\" length must be less than or equal to {max} characters long"
            ),
            ViolationKind::InvalidEmail => write!(f, "\"{field}\" must be a valid email"),
            ViolationKind::NotAllowed => write!(f, "\"{field}\" is not allowed"),
            ViolationKind::NotAnObject => write!(f, "\"{field}\" must be of type object"),
        }
    }
}

/// A non-empty list of violations, in the order in which they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

#[allow(clippy::len_without_is_empty, reason = "violations are never empty")]
impl Violations {
    /// Returns `None` if `violations` is empty.
    pub fn new(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self(violations))
    }

    /// The violation that was found first.
    pub fn first(&self) -> &Violation {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.first().fmt(f)?;
        if self.len() > 1 {
            write!(f, " (and {} more)", self.len() - 1)?;
        }
        Ok(())
    }
}

impl From<Violation> for Violations {
    fn from(value: Violation) -> Self {
        Self(vec![value])
    }
}
