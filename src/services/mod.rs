//! Service layer for my-expenses
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, reference checks and audit logging, plus the two
//! stateless cores: dashboard analysis and query-parameter filtering.

pub mod analysis;
pub mod category;
pub mod expense;
pub mod filter;
pub mod payment_method;
pub mod person;

pub use analysis::{analyze, CategoryAnalysis, ExpenseAnalysis};
pub use category::CategoryService;
pub use expense::{ExpenseService, ExpenseUpdate, NewExpense};
pub use filter::{filter_expenses, ExpenseFilter, PaidStatus, QueryParams, RequestParams};
pub use payment_method::PaymentMethodService;
pub use person::PersonService;
