//! Dashboard analysis of a collection of expenses
//!
//! Computes the totals shown on the dashboard and a per-category breakdown.
//! The caller scopes the collection (e.g. to one category or person) before
//! calling [`analyze`].
//!
//! Note on naming: [`ExpenseAnalysis::paid_value`] is the sum of the final
//! values of the *unpaid* expenses, and `diff` is the total minus that sum.
//! Reports built on top of this rely on those exact figures, so the field
//! keeps its historical name and meaning.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{Category, CategoryId, Expense, Money};

/// Totals for one category title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAnalysis {
    /// Category title; `None` for expenses without a (resolvable) category
    pub category_title: Option<String>,
    /// Sum of final values
    pub total_value: Money,
    /// Sum of `final_value - paid_value`
    pub remaining: Money,
}

/// Summary statistics for a collection of expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseAnalysis {
    /// Sum of all final values
    pub total_value: Money,
    /// Sum of the final values of expenses that are NOT paid
    pub paid_value: Money,
    /// `total_value - paid_value`
    pub diff: Money,
    /// Per-category totals, ascending by `remaining`
    pub category_analysis: Vec<CategoryAnalysis>,
}

impl ExpenseAnalysis {
    /// The analysis as a `(total_value, paid_value, diff, category_analysis)` tuple
    pub fn into_tuple(self) -> (Money, Money, Money, Vec<CategoryAnalysis>) {
        (
            self.total_value,
            self.paid_value,
            self.diff,
            self.category_analysis,
        )
    }
}

/// Analyze a collection of expenses.
///
/// `categories` resolves category ids to titles. Empty input yields zeros and
/// an empty breakdown.
pub fn analyze(expenses: &[Expense], categories: &[Category]) -> ExpenseAnalysis {
    let total_value: Money = expenses.iter().map(Expense::final_value).sum();
    let paid_value: Money = expenses
        .iter()
        .filter(|e| !e.is_paid())
        .map(Expense::final_value)
        .sum();

    ExpenseAnalysis {
        total_value,
        paid_value,
        diff: total_value - paid_value,
        category_analysis: category_analysis(expenses, categories),
    }
}

/// Group expenses by category title, ascending by remaining balance.
///
/// Groups with equal remaining balances stay in title order, with the
/// uncategorized group first.
pub fn category_analysis(expenses: &[Expense], categories: &[Category]) -> Vec<CategoryAnalysis> {
    let titles: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.title.as_str()))
        .collect();

    let mut groups: BTreeMap<Option<&str>, (Money, Money)> = BTreeMap::new();
    for expense in expenses {
        let title = expense
            .category_id
            .and_then(|id| titles.get(&id).copied());
        let entry = groups.entry(title).or_insert((Money::zero(), Money::zero()));
        entry.0 += expense.final_value();
        entry.1 += expense.remaining();
    }

    let mut rows: Vec<CategoryAnalysis> = groups
        .into_iter()
        .map(|(title, (total_value, remaining))| CategoryAnalysis {
            category_title: title.map(str::to_string),
            total_value,
            remaining,
        })
        .collect();

    rows.sort_by_key(|row| row.remaining);
    rows
}
