//! Display Name Value Object
//!
//! Free-form full name shown in the UI ("Welcome, Alice Liddell").

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("Full name is required")]
    Empty,
    #[error("Full name must be at most {DISPLAY_NAME_MAX_LENGTH} characters")]
    TooLong,
    #[error("Full name contains invalid characters")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DisplayNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DisplayNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed() {
        let name = DisplayName::new("  Alice Liddell ").unwrap();
        assert_eq!(name.as_str(), "Alice Liddell");
        assert_eq!(name.to_string(), "Alice Liddell");
    }

    #[test]
    fn test_rejects_blank_and_control() {
        assert_eq!(DisplayName::new(" \t ").unwrap_err(), DisplayNameError::Empty);
        assert_eq!(
            DisplayName::new("Alice\nLiddell").unwrap_err(),
            DisplayNameError::InvalidCharacter
        );
        assert_eq!(
            DisplayName::new("x".repeat(101)).unwrap_err(),
            DisplayNameError::TooLong
        );
    }
}
