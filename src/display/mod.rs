//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for expenses, the dashboard analysis
//! and the reference lists.

pub mod analysis;
pub mod expense;
pub mod reference;

pub use analysis::format_analysis;
pub use expense::{format_expense_details, format_expense_list, ReferenceNames};
pub use reference::{format_category_list, format_payment_method_list, format_person_list};

/// Truncate a string to at most `max_len` characters, ending with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
