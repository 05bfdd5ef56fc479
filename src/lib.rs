//! my-expenses - a command-line tracker for household expenses
//!
//! Expenses carry a due date, a final value and a paid flag, and may point
//! at a payment method, a category and a person. The tracker keeps the paid
//! value consistent with the paid flag on every save, summarizes a
//! collection of expenses for the dashboard and narrows collections with
//! request-style query parameters.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, payment methods, categories, people)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic, analysis and filtering
//! - `audit`: Audit logging system
//! - `cli`, `display`, `export`: Command handlers, terminal output, CSV/JSON export
//!
//! # Example
//!
//! ```rust,ignore
//! use my_expenses::config::{paths::ExpensePaths, settings::Settings};
//! use my_expenses::services::{ExpenseService, RequestParams};
//! use my_expenses::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let params = RequestParams::parse("search_name=rent&paid_name=paid");
//! let summary = ExpenseService::new(&storage).summary(&params)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
