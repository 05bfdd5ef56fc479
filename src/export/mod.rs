//! Export module for my-expenses
//!
//! - CSV: one row per expense, spreadsheet-compatible
//! - JSON: expenses together with every reference list, schema-versioned

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
