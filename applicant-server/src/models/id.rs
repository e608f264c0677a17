//! Path identifier parsing

use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Primary key of a `users` row.
///
/// Matches the `SERIAL` column, so anything outside `i32` is rejected
/// before it reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Parse a path segment into an id.
    ///
    /// # Example
    /// ```
    /// use applicant_server::models::UserId;
    ///
    /// assert_eq!(UserId::parse("42").unwrap().get(), 42);
    /// assert!(UserId::parse("abc").is_err());
    /// assert!(UserId::parse("99999999999").is_err()); // overflows i32
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        s.parse::<i32>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a 32-bit integer",
            })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
