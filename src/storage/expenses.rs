//! Expense repository
//!
//! Persists expenses to expenses.json. Every write goes through
//! [`Expense::sync_paid_value`] so the stored paid value always follows the
//! paid flag.

use std::cmp::Ordering;

use crate::error::ExpenseResult;
use crate::models::{CategoryId, Expense, ExpenseId, PaymentMethodId, PersonId};

use super::repository::{Record, Repository};

impl Record for Expense {
    type Id = ExpenseId;
    const ENTITY_NAME: &'static str = "Expense";

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.due_date
            .cmp(&other.due_date)
            .then_with(|| self.display_title().cmp(other.display_title()))
            .then_with(|| self.id.cmp(&other.id))
    }

    fn before_save(&mut self) {
        self.sync_paid_value();
        debug_assert!(self.is_consistent());
    }
}

/// Repository for expense persistence
pub type ExpenseRepository = Repository<Expense>;

impl Repository<Expense> {
    /// Expenses paid with the given payment method
    pub fn by_payment_method(&self, id: PaymentMethodId) -> ExpenseResult<Vec<Expense>> {
        self.find_all(|e| e.payment_method_id == Some(id))
    }

    pub fn by_category(&self, id: CategoryId) -> ExpenseResult<Vec<Expense>> {
        self.find_all(|e| e.category_id == Some(id))
    }

    pub fn by_person(&self, id: PersonId) -> ExpenseResult<Vec<Expense>> {
        self.find_all(|e| e.person_id == Some(id))
    }

    /// Find expenses whose title matches exactly (case-insensitive)
    pub fn by_title(&self, title: &str) -> ExpenseResult<Vec<Expense>> {
        let wanted = title.trim().to_lowercase();
        self.find_all(|e| {
            e.title
                .as_deref()
                .is_some_and(|t| t.trim().to_lowercase() == wanted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_recomputes_paid_value() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::titled("Rent", date(1), Money::from_cents(80000)).paid();
        let stored = repo.upsert(expense).unwrap();
        assert_eq!(stored.paid_value(), Money::from_cents(80000));
    }

    #[test]
    fn test_hand_edited_paid_value_is_discarded_on_save() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("expenses.json");
        let id = ExpenseId::new();

        std::fs::write(
            &path,
            format!(
                r#"{{"items": [{{
                    "id": "{}",
                    "title": "Water",
                    "due_date": "2025-01-05",
                    "final_value": 4000,
                    "paid_value": 999,
                    "is_paid": true,
                    "created_at": "2025-01-01T00:00:00Z",
                    "updated_at": "2025-01-01T00:00:00Z"
                }}]}}"#,
                id.as_uuid()
            ),
        )
        .unwrap();

        repo.load().unwrap();
        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.paid_value(), Money::from_cents(999));

        // An update that touches an unrelated field still re-derives the paid value
        let mut edited = loaded;
        edited.title = Some("Water bill".into());
        let stored = repo.upsert(edited).unwrap();
        assert_eq!(stored.paid_value(), Money::from_cents(4000));
        assert!(stored.is_consistent());
    }

    #[test]
    fn test_listing_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Expense::titled("b", date(2), Money::zero())).unwrap();
        repo.upsert(Expense::titled("z", date(1), Money::zero())).unwrap();
        repo.upsert(Expense::titled("a", date(2), Money::zero())).unwrap();

        let titles: Vec<String> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|e| e.display_title().to_string())
            .collect();
        assert_eq!(titles, vec!["z", "a", "b"]);
    }

    #[test]
    fn test_reference_queries() {
        let (_temp_dir, repo) = create_test_repo();
        let method = PaymentMethodId::new();
        let category = CategoryId::new();
        let person = PersonId::new();

        repo.upsert(
            Expense::titled("Rent", date(1), Money::from_cents(100))
                .with_payment_method(method)
                .with_category(category),
        )
        .unwrap();
        repo.upsert(Expense::titled("Salary", date(1), Money::from_cents(100)).with_person(person))
            .unwrap();

        assert_eq!(repo.by_payment_method(method).unwrap().len(), 1);
        assert_eq!(repo.by_category(category).unwrap().len(), 1);
        assert_eq!(repo.by_person(person).unwrap().len(), 1);
        assert_eq!(repo.by_title("RENT").unwrap().len(), 1);
        assert!(repo.by_title("Gas").unwrap().is_empty());
    }
}
