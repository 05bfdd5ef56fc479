//! Payment method model
//!
//! A payment method (cash, a card, a bank transfer...) is referenced by
//! expenses but never owned by them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PaymentMethodId;
use super::TitleValidationError;

/// Maximum title length for payment methods
pub const PAYMENT_METHOD_TITLE_MAX: usize = 150;

/// A way of paying an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier
    pub id: PaymentMethodId,

    /// Display title, unique across payment methods
    pub title: String,

    /// When the payment method was created
    pub created_at: DateTime<Utc>,

    /// When the payment method was last modified
    pub updated_at: DateTime<Utc>,
}

impl PaymentMethod {
    /// Create a new payment method
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentMethodId::new(),
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the title
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// Validate the payment method
    pub fn validate(&self) -> Result<(), TitleValidationError> {
        TitleValidationError::check(&self.title, PAYMENT_METHOD_TITLE_MAX)
    }

    /// Normalize a title for uniqueness checks and lookups
    pub fn normalize_title(title: &str) -> String {
        title.trim().to_lowercase()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payment_method() {
        let method = PaymentMethod::new("Credit Card");
        assert_eq!(method.title, "Credit Card");
        assert_eq!(method.to_string(), "Credit Card");
        assert!(method.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut method = PaymentMethod::new("  ");
        assert_eq!(method.validate(), Err(TitleValidationError::Empty));

        method.rename("x".repeat(PAYMENT_METHOD_TITLE_MAX + 1));
        assert_eq!(
            method.validate(),
            Err(TitleValidationError::TooLong {
                len: PAYMENT_METHOD_TITLE_MAX + 1,
                max: PAYMENT_METHOD_TITLE_MAX
            })
        );
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(PaymentMethod::normalize_title("  Cash "), "cash");
    }
}
