//! Expense service
//!
//! Business logic for expense records: creation with reference checks,
//! updates, paying and unpaying, deletion, filtered queries and the
//! dashboard summary.

use chrono::NaiveDate;

use crate::audit::{diff_of, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money, PaymentMethodId, PersonId};
use crate::storage::Storage;

use super::analysis::{analyze, ExpenseAnalysis};
use super::filter::{filter_expenses, QueryParams};

/// Input for creating an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: Option<String>,
    pub due_date: NaiveDate,
    pub final_value: Money,
    pub is_paid: bool,
    pub payment_method_id: Option<PaymentMethodId>,
    pub category_id: Option<CategoryId>,
    pub person_id: Option<PersonId>,
}

impl NewExpense {
    pub fn new(title: Option<String>, due_date: NaiveDate, final_value: Money) -> Self {
        Self {
            title,
            due_date,
            final_value,
            is_paid: false,
            payment_method_id: None,
            category_id: None,
            person_id: None,
        }
    }
}

/// Changes to apply to an existing expense; `None` leaves a field as is.
///
/// The nested options on references distinguish "leave" (`None`) from
/// "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub title: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
    pub final_value: Option<Money>,
    pub is_paid: Option<bool>,
    pub payment_method_id: Option<Option<PaymentMethodId>>,
    pub category_id: Option<Option<CategoryId>>,
    pub person_id: Option<Option<PersonId>>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.due_date.is_none()
            && self.final_value.is_none()
            && self.is_paid.is_none()
            && self.payment_method_id.is_none()
            && self.category_id.is_none()
            && self.person_id.is_none()
    }
}

/// Trim a title; blank titles become `None`
fn normalize_title(title: Option<String>) -> Option<String> {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new expense
    pub fn create(&self, input: NewExpense) -> ExpenseResult<Expense> {
        self.ensure_references(input.payment_method_id, input.category_id, input.person_id)?;

        let mut expense = Expense::new(normalize_title(input.title), input.due_date, input.final_value);
        expense.payment_method_id = input.payment_method_id;
        expense.category_id = input.category_id;
        expense.person_id = input.person_id;
        expense.set_paid(input.is_paid);

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let expense = self.storage.expenses.upsert(expense)?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            expense.title.clone(),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by ID or exact title.
    ///
    /// Fails when several expenses share the title.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(Some(expense));
            }
        }

        let mut matches = self.storage.expenses.by_title(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "{} expenses are titled '{}'; use the expense ID instead",
                n,
                identifier.trim()
            ))),
        }
    }

    /// Find an expense or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> ExpenseResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))
    }

    /// All expenses, by due date
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Apply changes to an expense
    pub fn update(&self, id: ExpenseId, changes: ExpenseUpdate) -> ExpenseResult<Expense> {
        let before = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let payment_method_id = changes.payment_method_id.unwrap_or(before.payment_method_id);
        let category_id = changes.category_id.unwrap_or(before.category_id);
        let person_id = changes.person_id.unwrap_or(before.person_id);
        self.ensure_references(payment_method_id, category_id, person_id)?;

        let mut expense = before.clone();
        if let Some(title) = changes.title {
            expense.title = normalize_title(title);
        }
        if let Some(due_date) = changes.due_date {
            expense.due_date = due_date;
        }
        if let Some(final_value) = changes.final_value {
            expense.set_final_value(final_value);
        }
        if let Some(is_paid) = changes.is_paid {
            expense.set_paid(is_paid);
        }
        expense.payment_method_id = payment_method_id;
        expense.category_id = category_id;
        expense.person_id = person_id;
        expense.touch();

        self.save_update(&before, expense)
    }

    /// Mark an expense as paid
    pub fn mark_paid(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.update(
            id,
            ExpenseUpdate {
                is_paid: Some(true),
                ..ExpenseUpdate::default()
            },
        )
    }

    /// Mark an expense as not paid
    pub fn mark_unpaid(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.update(
            id,
            ExpenseUpdate {
                is_paid: Some(false),
                ..ExpenseUpdate::default()
            },
        )
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            expense.title.clone(),
            &expense,
        )?;

        Ok(expense)
    }

    /// All expenses narrowed by query parameters
    pub fn query<Q: QueryParams + ?Sized>(&self, params: &Q) -> ExpenseResult<Vec<Expense>> {
        Ok(filter_expenses(&self.list()?, params))
    }

    /// Analysis of the expenses selected by query parameters
    pub fn summary<Q: QueryParams + ?Sized>(&self, params: &Q) -> ExpenseResult<ExpenseAnalysis> {
        let expenses = self.query(params)?;
        self.analyze(&expenses)
    }

    /// Analysis of every expense
    pub fn summary_all(&self) -> ExpenseResult<ExpenseAnalysis> {
        let expenses = self.list()?;
        self.analyze(&expenses)
    }

    /// Analysis of the given expenses, resolving category titles from storage
    pub fn analyze(&self, expenses: &[Expense]) -> ExpenseResult<ExpenseAnalysis> {
        let categories = self.storage.categories.get_all()?;
        Ok(analyze(expenses, &categories))
    }

    /// Persist an edited expense and audit the change
    pub(crate) fn save_update(&self, before: &Expense, mut after: Expense) -> ExpenseResult<Expense> {
        after.sync_paid_value();
        after
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let stored = self.storage.expenses.upsert(after)?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            stored.id.to_string(),
            stored.title.clone(),
            before,
            &stored,
            diff_of(before, &stored),
        )?;

        Ok(stored)
    }

    /// Apply `clear` to each expense and save it like any other update.
    ///
    /// Used when a referenced payment method, category or person is deleted.
    pub(crate) fn clear_references<F>(&self, affected: Vec<Expense>, clear: F) -> ExpenseResult<usize>
    where
        F: Fn(&mut Expense),
    {
        let count = affected.len();
        for before in affected {
            let mut after = before.clone();
            clear(&mut after);
            after.touch();
            self.save_update(&before, after)?;
        }
        Ok(count)
    }

    fn ensure_references(
        &self,
        payment_method_id: Option<PaymentMethodId>,
        category_id: Option<CategoryId>,
        person_id: Option<PersonId>,
    ) -> ExpenseResult<()> {
        if let Some(id) = payment_method_id {
            self.storage
                .payment_methods
                .get(id)?
                .ok_or_else(|| ExpenseError::payment_method_not_found(id.to_string()))?;
        }
        if let Some(id) = category_id {
            self.storage
                .categories
                .get(id)?
                .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;
        }
        if let Some(id) = person_id {
            self.storage
                .people
                .get(id)?
                .ok_or_else(|| ExpenseError::person_not_found(id.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Category, PaymentMethod, Person};
    use crate::services::filter::{RequestParams, PAID_MARKER, PAID_PARAM, SEARCH_PARAM};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn new_expense(title: &str, cents: i64) -> NewExpense {
        NewExpense::new(Some(title.to_string()), date(1), Money::from_cents(cents))
    }

    #[test]
    fn test_create_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(new_expense("  Rent  ", 80000)).unwrap();
        assert_eq!(expense.title.as_deref(), Some("Rent"));
        assert!(!expense.is_paid());
        assert_eq!(expense.paid_value(), Money::zero());
        assert_eq!(service.list().unwrap().len(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_paid_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let mut input = new_expense("Internet", 3000);
        input.is_paid = true;
        let expense = service.create(input).unwrap();
        assert_eq!(expense.paid_value(), Money::from_cents(3000));
    }

    #[test]
    fn test_blank_title_becomes_none() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(new_expense("   ", 100)).unwrap();
        assert!(expense.title.is_none());
    }

    #[test]
    fn test_create_rejects_unknown_references() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let mut input = new_expense("Rent", 100);
        input.payment_method_id = Some(PaymentMethodId::new());
        assert!(service.create(input).unwrap_err().is_not_found());

        let mut input = new_expense("Rent", 100);
        input.category_id = Some(CategoryId::new());
        assert!(service.create(input).unwrap_err().is_not_found());

        let mut input = new_expense("Rent", 100);
        input.person_id = Some(PersonId::new());
        assert!(service.create(input).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_with_references() {
        let (_temp_dir, storage) = create_test_storage();
        let method = storage.payment_methods.upsert(PaymentMethod::new("Cash")).unwrap();
        let category = storage.categories.upsert(Category::new("Rent")).unwrap();
        let person = storage.people.upsert(Person::new("Maria")).unwrap();
        let service = ExpenseService::new(&storage);

        let mut input = new_expense("Rent", 100);
        input.payment_method_id = Some(method.id);
        input.category_id = Some(category.id);
        input.person_id = Some(person.id);

        let expense = service.create(input).unwrap();
        assert_eq!(expense.payment_method_id, Some(method.id));
        assert_eq!(expense.category_id, Some(category.id));
        assert_eq!(expense.person_id, Some(person.id));
    }

    #[test]
    fn test_pay_and_unpay() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(new_expense("Rent", 80000)).unwrap();

        let paid = service.mark_paid(expense.id).unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.paid_value(), Money::from_cents(80000));

        let unpaid = service.mark_unpaid(expense.id).unwrap();
        assert_eq!(unpaid.paid_value(), Money::zero());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        let diff = entries[1].diff_summary.as_deref().unwrap();
        assert!(diff.contains("is_paid: false -> true"));
        assert!(diff.contains("paid_value: 0 -> 80000"));
    }

    #[test]
    fn test_update_final_value_of_paid_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let mut input = new_expense("Rent", 80000);
        input.is_paid = true;
        let expense = service.create(input).unwrap();

        let updated = service
            .update(
                expense.id,
                ExpenseUpdate {
                    final_value: Some(Money::from_cents(85000)),
                    title: Some(Some("Rent May".into())),
                    due_date: Some(date(5)),
                    ..ExpenseUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.paid_value(), Money::from_cents(85000));
        assert_eq!(updated.title.as_deref(), Some("Rent May"));
        assert_eq!(updated.due_date, date(5));
    }

    #[test]
    fn test_update_can_clear_reference() {
        let (_temp_dir, storage) = create_test_storage();
        let category = storage.categories.upsert(Category::new("Rent")).unwrap();
        let service = ExpenseService::new(&storage);

        let mut input = new_expense("Rent", 100);
        input.category_id = Some(category.id);
        let expense = service.create(input).unwrap();

        let updated = service
            .update(
                expense.id,
                ExpenseUpdate {
                    category_id: Some(None),
                    ..ExpenseUpdate::default()
                },
            )
            .unwrap();
        assert!(updated.category_id.is_none());
    }

    #[test]
    fn test_update_missing_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let err = service
            .update(ExpenseId::new(), ExpenseUpdate::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_id_and_title() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(new_expense("Water", 100)).unwrap();

        assert_eq!(
            service.find(&expense.id.as_uuid().to_string()).unwrap().unwrap().id,
            expense.id
        );
        assert_eq!(service.find("water").unwrap().unwrap().id, expense.id);
        assert!(service.find("Gas").unwrap().is_none());
        assert!(service.require("Gas").unwrap_err().is_not_found());

        service.create(new_expense("Water", 200)).unwrap();
        assert!(service.find("Water").unwrap_err().is_validation());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(new_expense("Water", 100)).unwrap();

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_query_and_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let mut rent = new_expense("Rent", 10000);
        rent.is_paid = true;
        service.create(rent).unwrap();
        service.create(new_expense("Rent garage", 5000)).unwrap();
        service.create(new_expense("Water", 700)).unwrap();

        let params = RequestParams::new().with(SEARCH_PARAM, "rent");
        let unpaid_rent = service.query(&params).unwrap();
        assert_eq!(unpaid_rent.len(), 1);

        let params = RequestParams::new().with(PAID_PARAM, PAID_MARKER);
        let summary = service.summary(&params).unwrap();
        assert_eq!(summary.total_value, Money::from_cents(10000));
        assert_eq!(summary.paid_value, Money::zero());

        let all = service.summary_all().unwrap();
        assert_eq!(all.total_value, Money::from_cents(15700));
        assert_eq!(all.paid_value, Money::from_cents(5700));
        assert_eq!(all.diff, Money::from_cents(10000));
    }

    #[test]
    fn test_expenses_persist() {
        let (temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(new_expense("Rent", 100)).unwrap();

        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert!(reloaded.expenses.get(expense.id).unwrap().is_some());
    }
}
