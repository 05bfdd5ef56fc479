//! Category model
//!
//! Expenses are grouped by category title in the dashboard analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::TitleValidationError;

/// Maximum title length for categories
pub const CATEGORY_TITLE_MAX: usize = 150;

/// An expense category (e.g., "Rent", "Utilities")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category title
    pub title: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), TitleValidationError> {
        TitleValidationError::check(&self.title, CATEGORY_TITLE_MAX)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Utilities");
        assert_eq!(category.title, "Utilities");
        assert_eq!(category.to_string(), "Utilities");
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_rename_touches_updated_at() {
        let mut category = Category::new("Rent");
        let before = category.updated_at;
        category.rename("Housing");
        assert_eq!(category.title, "Housing");
        assert!(category.updated_at >= before);
    }

    #[test]
    fn test_empty_title_rejected() {
        let category = Category::new("");
        assert_eq!(category.validate(), Err(TitleValidationError::Empty));
    }
}
