//! CSV export of expense records

use std::io::Write;

use crate::display::ReferenceNames;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

const HEADER: [&str; 9] = [
    "ID",
    "Title",
    "Due Date",
    "Final Value",
    "Paid Value",
    "Is Paid",
    "Payment Method",
    "Category",
    "Person",
];

fn export_error(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Write expenses as CSV, resolving references to their titles
pub fn export_expenses_csv<W: Write>(
    expenses: &[Expense],
    names: &ReferenceNames,
    writer: W,
) -> ExpenseResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(export_error)?;

    for expense in expenses {
        let due_date = expense.due_date.format("%Y-%m-%d").to_string();
        let final_value = expense.final_value().to_string();
        let paid_value = expense.paid_value().to_string();
        let id = expense.id.to_string();

        csv_writer
            .write_record([
                id.as_str(),
                expense.display_title(),
                due_date.as_str(),
                final_value.as_str(),
                paid_value.as_str(),
                if expense.is_paid() { "true" } else { "false" },
                names.payment_method(expense.payment_method_id).unwrap_or(""),
                names.category(expense.category_id).unwrap_or(""),
                names.person(expense.person_id).unwrap_or(""),
            ])
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)?;
    Ok(())
}
