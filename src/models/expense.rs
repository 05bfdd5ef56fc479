//! Expense record model
//!
//! An expense is one payable obligation: an amount owed by a due date, with a
//! paid flag and optional references to a payment method, a category and a
//! person.
//!
//! The paid value is derived, never set directly:
//! `paid_value == final_value` when the expense is paid, zero otherwise.
//! [`Expense::sync_paid_value`] re-establishes that before every write to
//! storage, overwriting whatever value the record carried.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, PaymentMethodId, PersonId};
use super::money::Money;
use super::TitleValidationError;

/// Maximum title length for expenses
pub const EXPENSE_TITLE_MAX: usize = 100;

/// A single payable obligation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Optional free-text title
    #[serde(default)]
    pub title: Option<String>,

    /// When the expense is due
    pub due_date: NaiveDate,

    /// Amount owed
    final_value: Money,

    /// Amount settled; kept in sync with `is_paid` and `final_value`
    #[serde(default)]
    paid_value: Money,

    #[serde(default)]
    is_paid: bool,

    /// Payment method used; cleared when the method is deleted
    #[serde(default)]
    pub payment_method_id: Option<PaymentMethodId>,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub person_id: Option<PersonId>,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new unpaid expense
    pub fn new(title: Option<String>, due_date: NaiveDate, final_value: Money) -> Self {
        let now = Utc::now();
        let mut expense = Self {
            id: ExpenseId::new(),
            title,
            due_date,
            final_value,
            paid_value: Money::zero(),
            is_paid: false,
            payment_method_id: None,
            category_id: None,
            person_id: None,
            created_at: now,
            updated_at: now,
        };
        expense.sync_paid_value();
        expense
    }

    /// Create a new expense with a title
    pub fn titled(title: impl Into<String>, due_date: NaiveDate, final_value: Money) -> Self {
        Self::new(Some(title.into()), due_date, final_value)
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_person(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn with_payment_method(mut self, payment_method_id: PaymentMethodId) -> Self {
        self.payment_method_id = Some(payment_method_id);
        self
    }

    /// Mark the expense as paid while building it
    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self.sync_paid_value();
        self
    }

    pub fn final_value(&self) -> Money {
        self.final_value
    }

    pub fn paid_value(&self) -> Money {
        self.paid_value
    }

    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    /// Amount still owed (final value minus paid value)
    pub fn remaining(&self) -> Money {
        self.final_value - self.paid_value
    }

    /// Set the paid flag, recomputing the paid value
    pub fn set_paid(&mut self, is_paid: bool) {
        self.is_paid = is_paid;
        self.sync_paid_value();
        self.updated_at = Utc::now();
    }

    /// Set the amount owed, recomputing the paid value
    pub fn set_final_value(&mut self, final_value: Money) {
        self.final_value = final_value;
        self.sync_paid_value();
        self.updated_at = Utc::now();
    }

    /// Recompute the paid value from the paid flag and the final value.
    ///
    /// Called before every persist; any previously stored paid value is discarded.
    pub fn sync_paid_value(&mut self) {
        self.paid_value = if self.is_paid {
            self.final_value
        } else {
            Money::zero()
        };
    }

    /// Whether the stored paid value agrees with the paid flag
    pub fn is_consistent(&self) -> bool {
        if self.is_paid {
            self.paid_value == self.final_value
        } else {
            self.paid_value.is_zero()
        }
    }

    /// Record a modification
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Title for display, empty when absent
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// The final value with a currency symbol, e.g. "100.00 €"
    pub fn tag_final_value(&self, currency_symbol: &str) -> String {
        self.final_value.format_with_symbol(currency_symbol)
    }

    /// "Is Paid" or "Not Paid"
    pub fn tag_is_paid(&self) -> &'static str {
        if self.is_paid {
            "Is Paid"
        } else {
            "Not Paid"
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if let Some(title) = &self.title {
            let len = title.chars().count();
            if len > EXPENSE_TITLE_MAX {
                return Err(ExpenseValidationError::Title(TitleValidationError::TooLong {
                    len,
                    max: EXPENSE_TITLE_MAX,
                }));
            }
        }

        if !self.final_value.is_within_limit() {
            return Err(ExpenseValidationError::ValueOutOfRange(self.final_value));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    Title(TitleValidationError),
    ValueOutOfRange(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(e) => write!(f, "{}", e),
            Self::ValueOutOfRange(value) => write!(f, "Final value {} is out of range", value),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
