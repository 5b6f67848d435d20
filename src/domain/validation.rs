use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of `to`, `from`, `message` is unset or empty.
    MissingRequiredFields { fields: Vec<&'static str> },
}

impl ValidationError {
    /// Names of the required fields that were missing, in `to`, `from`, `message` order.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingRequiredFields { fields } => fields,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredFields { fields } => {
                write!(
                    f,
                    "required fields must be set: {} (missing: {})",
                    REQUIRED_FIELDS.join(", "),
                    fields.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub(crate) const REQUIRED_FIELDS: [&str; 3] = ["to", "from", "message"];
