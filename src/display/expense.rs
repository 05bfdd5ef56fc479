//! Expense display formatting
//!
//! Formats expense records as a register table and as a detail view.

use std::collections::HashMap;

use crate::config::Settings;
use crate::models::{
    Category, CategoryId, Expense, PaymentMethod, PaymentMethodId, Person, PersonId,
};

use super::truncate;

const TITLE_WIDTH: usize = 30;
const REFERENCE_WIDTH: usize = 20;

/// Lookup of reference titles for rendering expenses
#[derive(Debug, Default)]
pub struct ReferenceNames {
    payment_methods: HashMap<PaymentMethodId, String>,
    categories: HashMap<CategoryId, String>,
    people: HashMap<PersonId, String>,
}

impl ReferenceNames {
    pub fn new(methods: &[PaymentMethod], categories: &[Category], people: &[Person]) -> Self {
        Self {
            payment_methods: methods.iter().map(|m| (m.id, m.title.clone())).collect(),
            categories: categories.iter().map(|c| (c.id, c.title.clone())).collect(),
            people: people.iter().map(|p| (p.id, p.name.clone())).collect(),
        }
    }

    pub fn payment_method(&self, id: Option<PaymentMethodId>) -> Option<&str> {
        id.and_then(|id| self.payment_methods.get(&id)).map(String::as_str)
    }

    pub fn category(&self, id: Option<CategoryId>) -> Option<&str> {
        id.and_then(|id| self.categories.get(&id)).map(String::as_str)
    }

    pub fn person(&self, id: Option<PersonId>) -> Option<&str> {
        id.and_then(|id| self.people.get(&id)).map(String::as_str)
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str, cap: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
        .min(cap)
}

/// Format a list of expenses as a table
pub fn format_expense_list(
    expenses: &[Expense],
    names: &ReferenceNames,
    settings: &Settings,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let title_width = column_width(
        expenses.iter().map(|e| e.display_title()),
        "Title",
        TITLE_WIDTH,
    );
    let category_width = column_width(
        expenses.iter().filter_map(|e| names.category(e.category_id)),
        "Category",
        REFERENCE_WIDTH,
    );
    let person_width = column_width(
        expenses.iter().filter_map(|e| names.person(e.person_id)),
        "Person",
        REFERENCE_WIDTH,
    );

    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<title_width$}  {:<category_width$}  {:<person_width$}  {:>14}  {}\n",
        "Due",
        "Title",
        "Category",
        "Person",
        "Value",
        "Status",
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<title_width$}  {:-<category_width$}  {:-<person_width$}  {:->14}  {:-<8}\n",
        "", "", "", "", "", "",
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<10}  {:<title_width$}  {:<category_width$}  {:<person_width$}  {:>14}  {}\n",
            settings.format_date(expense.due_date),
            truncate(expense.display_title(), title_width),
            truncate(names.category(expense.category_id).unwrap_or(""), category_width),
            truncate(names.person(expense.person_id).unwrap_or(""), person_width),
            expense.tag_final_value(symbol),
            expense.tag_is_paid(),
        ));
    }

    output.push_str(&format!("\n{} expense(s)\n", expenses.len()));
    output
}

/// Format a single expense's details
pub fn format_expense_details(
    expense: &Expense,
    names: &ReferenceNames,
    settings: &Settings,
) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.display_title()));
    output.push_str(&format!("  ID:             {}\n", expense.id.as_uuid()));
    output.push_str(&format!(
        "  Due Date:       {}\n",
        settings.format_date(expense.due_date)
    ));
    output.push_str(&format!(
        "  Final Value:    {}\n",
        expense.tag_final_value(symbol)
    ));
    output.push_str(&format!(
        "  Paid Value:     {}\n",
        expense.paid_value().format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Status:         {}\n", expense.tag_is_paid()));
    output.push_str(&format!(
        "  Payment Method: {}\n",
        names
            .payment_method(expense.payment_method_id)
            .unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "  Category:       {}\n",
        names.category(expense.category_id).unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "  Person:         {}\n",
        names.person(expense.person_id).unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "  Updated:        {}\n",
        expense.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
