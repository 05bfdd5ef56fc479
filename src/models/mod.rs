//! Core data models for my-expenses
//!
//! This module contains the data structures of the expense domain: expense
//! records, payment methods, categories, people, money and typed ids.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod payment_method;
pub mod person;
pub mod validation;

pub use category::Category;
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId, PaymentMethodId, PersonId};
pub use money::{Money, MoneyParseError, MAX_CENTS};
pub use payment_method::PaymentMethod;
pub use person::Person;
pub use validation::TitleValidationError;
