//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod expense;
pub mod export;
pub mod method;
pub mod person;
pub mod report;

pub use audit::{handle_audit_command, AuditArgs};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands, FilterArgs};
pub use export::{handle_export_command, ExportArgs};
pub use method::{handle_method_command, MethodCommands};
pub use person::{handle_person_command, PersonCommands};
pub use report::{handle_report_command, ReportArgs};
