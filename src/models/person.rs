//! Person model
//!
//! People are the payees of payroll-style expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PersonId;
use super::TitleValidationError;

pub const PERSON_NAME_MAX: usize = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PersonId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), TitleValidationError> {
        TitleValidationError::check(&self.name, PERSON_NAME_MAX)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person() {
        let person = Person::new("Maria");
        assert_eq!(person.to_string(), "Maria");
        assert!(person.validate().is_ok());
        assert!(Person::new(" ").validate().is_err());
    }
}
