//! Dashboard report formatting

use crate::models::Money;
use crate::services::ExpenseAnalysis;

use super::truncate;

const BAR_WIDTH: usize = 20;

/// Proportional bar, e.g. "█████░░░░░"
fn bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() || !value.is_positive() {
        return "░".repeat(width);
    }

    let filled = ((value.cents() as f64 / max.cents() as f64) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format the expense analysis: totals followed by the per-category breakdown
pub fn format_analysis(analysis: &ExpenseAnalysis, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Expenses Summary\n");
    output.push_str(&"═".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  Total:      {:>16}\n",
        analysis.total_value.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Unpaid:     {:>16}\n",
        analysis.paid_value.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Difference: {:>16}\n",
        analysis.diff.format_with_symbol(currency_symbol)
    ));

    if analysis.category_analysis.is_empty() {
        output.push_str("\nNo expenses to analyze.\n");
        return output;
    }

    let name_width = analysis
        .category_analysis
        .iter()
        .map(|c| c.category_title.as_deref().map_or(4, |t| t.chars().count()))
        .max()
        .unwrap_or(8)
        .clamp(8, 24);
    let max_total = analysis
        .category_analysis
        .iter()
        .map(|c| c.total_value)
        .max()
        .unwrap_or_default();

    output.push('\n');
    output.push_str(&format!(
        "{:<name_width$}  {:>16}  {:>16}  {}\n",
        "Category", "Total", "Remaining", "",
    ));
    output.push_str(&"─".repeat(name_width + 36 + BAR_WIDTH));
    output.push('\n');

    for row in &analysis.category_analysis {
        let title = row.category_title.as_deref().unwrap_or("None");
        output.push_str(&format!(
            "{:<name_width$}  {:>16}  {:>16}  {}\n",
            truncate(title, name_width),
            row.total_value.format_with_symbol(currency_symbol),
            row.remaining.format_with_symbol(currency_symbol),
            bar(row.total_value, max_total, BAR_WIDTH),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense};
    use crate::services::analyze;
    use chrono::NaiveDate;

    #[test]
    fn test_bar() {
        let max = Money::from_cents(1000);
        assert_eq!(bar(Money::from_cents(500), max, 10), "█████░░░░░");
        assert_eq!(bar(Money::zero(), max, 4), "░░░░");
        assert_eq!(bar(max, Money::zero(), 4), "░░░░");
    }

    #[test]
    fn test_format_analysis() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let rent = Category::new("Rent");
        let expenses = vec![
            Expense::titled("May", date, Money::from_cents(50000))
                .with_category(rent.id)
                .paid(),
            Expense::titled("Snacks", date, Money::from_cents(1500)),
        ];

        let analysis = analyze(&expenses, &[rent]);
        let output = format_analysis(&analysis, "€");

        assert!(output.contains("515.00 €"));
        assert!(output.contains("Rent"));
        assert!(output.contains("None"));
    }

    #[test]
    fn test_format_empty_analysis() {
        let analysis = analyze(&[], &[]);
        let output = format_analysis(&analysis, "€");
        assert!(output.contains("0.00 €"));
        assert!(output.contains("No expenses to analyze."));
    }
}
