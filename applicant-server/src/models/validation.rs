//! Validation error types

use std::fmt;

/// Input that could not be turned into a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format (e.g., integer id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body is not a usable JSON record
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::MalformedBody { reason } => write!(f, "malformed request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "must be an integer",
        };
        assert_eq!(err.to_string(), "id: must be an integer");

        let err = ValidationError::MalformedBody {
            reason: "EOF while parsing".into(),
        };
        assert_eq!(err.to_string(), "malformed request body: EOF while parsing");
    }
}
