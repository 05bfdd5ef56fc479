//! Reference list formatting: payment methods, categories and people

use crate::models::{Category, PaymentMethod, Person};

/// A two-column "Title  ID" list
fn format_titled_list<'a>(
    heading: &str,
    empty: &str,
    rows: impl Iterator<Item = (&'a str, String)>,
) -> String {
    let rows: Vec<(&str, String)> = rows.collect();
    if rows.is_empty() {
        return format!("{}\n", empty);
    }

    let width = rows
        .iter()
        .map(|(title, _)| title.chars().count())
        .max()
        .unwrap_or(0)
        .max(heading.len());

    let mut output = String::new();
    output.push_str(&format!("{:<width$}  {}\n", heading, "ID"));
    output.push_str(&format!("{:-<width$}  {:-<40}\n", "", ""));
    for (title, id) in rows {
        output.push_str(&format!("{:<width$}  {}\n", title, id));
    }
    output
}

pub fn format_payment_method_list(methods: &[PaymentMethod]) -> String {
    format_titled_list(
        "Payment Method",
        "No payment methods found.",
        methods.iter().map(|m| (m.title.as_str(), m.id.as_uuid().to_string())),
    )
}

pub fn format_category_list(categories: &[Category]) -> String {
    format_titled_list(
        "Category",
        "No categories found.",
        categories.iter().map(|c| (c.title.as_str(), c.id.as_uuid().to_string())),
    )
}

pub fn format_person_list(people: &[Person]) -> String {
    format_titled_list(
        "Name",
        "No people found.",
        people.iter().map(|p| (p.name.as_str(), p.id.as_uuid().to_string())),
    )
}
