//! Shared validation for titled entities

use std::fmt;

/// Validation errors for titles and names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleValidationError {
    Empty,
    TooLong { len: usize, max: usize },
}

impl TitleValidationError {
    /// Check that a title is non-blank and at most `max` characters long
    pub fn check(title: &str, max: usize) -> Result<(), Self> {
        if title.trim().is_empty() {
            return Err(Self::Empty);
        }

        let len = title.chars().count();
        if len > max {
            return Err(Self::TooLong { len, max });
        }

        Ok(())
    }
}

impl fmt::Display for TitleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Title cannot be empty"),
            Self::TooLong { len, max } => {
                write!(f, "Title too long ({} chars, max {})", len, max)
            }
        }
    }
}

impl std::error::Error for TitleValidationError {}
