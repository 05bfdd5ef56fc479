//! JSON export with schema versioning

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, PaymentMethod, Person};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Expenses plus the reference lists they point into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub expenses: Vec<Expense>,
    pub payment_methods: Vec<PaymentMethod>,
    pub categories: Vec<Category>,
    pub people: Vec<Person>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub paid_count: usize,
    /// Earliest due date among the exported expenses
    pub earliest_due: Option<String>,
    /// Latest due date among the exported expenses
    pub latest_due: Option<String>,
}

impl ExpenseExport {
    /// Build an export of the given expenses with every reference list from storage
    pub fn new(storage: &Storage, expenses: Vec<Expense>) -> ExpenseResult<Self> {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            paid_count: expenses.iter().filter(|e| e.is_paid()).count(),
            earliest_due: expenses.iter().map(|e| e.due_date).min().map(|d| d.to_string()),
            latest_due: expenses.iter().map(|e| e.due_date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            payment_methods: storage.payment_methods.get_all()?,
            categories: storage.categories.get_all()?,
            people: storage.people.get_all()?,
            metadata,
        })
    }
}

/// Serialize an export as JSON
pub fn export_json<W: Write>(export: &ExpenseExport, writer: &mut W, pretty: bool) -> ExpenseResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    };
    result.map_err(|e| ExpenseError::Export(e.to_string()))?;
    writer.flush()?;
    Ok(())
}
