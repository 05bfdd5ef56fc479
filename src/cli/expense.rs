//! Expense CLI commands
//!
//! Implements CLI commands for expense records, plus the filter flags shared
//! by `expense list`, `report` and `export`.

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, ReferenceNames};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};
use crate::services::filter::{CATEGORY_PARAM, PAID_MARKER, PAID_PARAM, PERSON_PARAM, SEARCH_PARAM};
use crate::services::{
    CategoryService, ExpenseService, ExpenseUpdate, NewExpense, PaymentMethodService,
    PersonService, RequestParams,
};
use crate::storage::Storage;

/// Filter flags, translated into query parameters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep expenses whose title contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category title or ID (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Show paid expenses instead of unpaid ones
    #[arg(long)]
    pub paid: bool,

    /// Person name or ID (repeatable)
    #[arg(long = "person")]
    pub people: Vec<String>,

    /// Raw query string, e.g. "search_name=rent&paid_name=paid"
    #[arg(short, long)]
    pub query: Option<String>,

    /// Skip filtering and include every expense
    #[arg(
        long,
        conflicts_with_all = ["search", "categories", "paid", "people", "query"]
    )]
    pub all: bool,
}

impl FilterArgs {
    /// Build the query parameters, resolving titles and names to IDs.
    ///
    /// Returns `None` when `--all` was given.
    pub fn to_params(&self, storage: &Storage) -> ExpenseResult<Option<RequestParams>> {
        if self.all {
            return Ok(None);
        }

        let mut params = self
            .query
            .as_deref()
            .map(RequestParams::parse)
            .unwrap_or_default();

        if let Some(search) = &self.search {
            params.push(SEARCH_PARAM, search.as_str());
        }

        let categories = CategoryService::new(storage);
        for category in &self.categories {
            let category = categories.require(category)?;
            params.push(CATEGORY_PARAM, category.id.as_uuid().to_string());
        }

        if self.paid {
            params.push(PAID_PARAM, PAID_MARKER);
        }

        let people = PersonService::new(storage);
        for person in &self.people {
            let person = people.require(person)?;
            params.push(PERSON_PARAM, person.id.as_uuid().to_string());
        }

        Ok(Some(params))
    }

    /// The expenses these flags select
    pub fn select(&self, storage: &Storage) -> ExpenseResult<Vec<Expense>> {
        let service = ExpenseService::new(storage);
        match self.to_params(storage)? {
            Some(params) => service.query(&params),
            None => service.list(),
        }
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Final value (e.g., "120.50" or "120,50 €")
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Title
        #[arg(short, long)]
        title: Option<String>,
        /// Due date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        due: Option<String>,
        /// Payment method title or ID
        #[arg(short, long)]
        method: Option<String>,
        /// Category title or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Person name or ID
        #[arg(long)]
        person: Option<String>,
        /// Mark as already paid
        #[arg(long)]
        paid: bool,
    },

    /// List expenses (unpaid ones unless --paid or --all)
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show expense details
    Show {
        /// Expense ID or title
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID or title
        expense: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// Remove the title
        #[arg(long, conflicts_with = "title")]
        clear_title: bool,
        /// New due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
        /// New final value
        #[arg(short, long, allow_hyphen_values = true)]
        value: Option<String>,
        /// New payment method title or ID
        #[arg(short, long)]
        method: Option<String>,
        /// Remove the payment method
        #[arg(long, conflicts_with = "method")]
        clear_method: bool,
        /// New category title or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Remove the category
        #[arg(long, conflicts_with = "category")]
        clear_category: bool,
        /// New person name or ID
        #[arg(long)]
        person: Option<String>,
        /// Remove the person
        #[arg(long, conflicts_with = "person")]
        clear_person: bool,
    },

    /// Mark an expense as paid
    Pay {
        /// Expense ID or title
        expense: String,
    },

    /// Mark an expense as not paid
    Unpay {
        /// Expense ID or title
        expense: String,
    },

    /// Delete an expense
    Delete {
        /// Expense ID or title
        expense: String,
    },
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format", s))
    })
}

fn parse_value(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| ExpenseError::Validation(format!("Invalid value: {}", e)))
}

/// Title lookup for every reference list
pub fn reference_names(storage: &Storage) -> ExpenseResult<ReferenceNames> {
    Ok(ReferenceNames::new(
        &storage.payment_methods.get_all()?,
        &storage.categories.get_all()?,
        &storage.people.get_all()?,
    ))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let methods = PaymentMethodService::new(storage);
    let categories = CategoryService::new(storage);
    let people = PersonService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            value,
            title,
            due,
            method,
            category,
            person,
            paid,
        } => {
            let due_date = match due {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let mut input = NewExpense::new(title, due_date, parse_value(&value)?);
            input.is_paid = paid;
            input.payment_method_id = method.map(|m| methods.require(&m)).transpose()?.map(|m| m.id);
            input.category_id = category.map(|c| categories.require(&c)).transpose()?.map(|c| c.id);
            input.person_id = person.map(|p| people.require(&p)).transpose()?.map(|p| p.id);

            let expense = service.create(input)?;
            println!(
                "Created expense: {} {}",
                expense.display_title(),
                expense.tag_final_value(&settings.currency_symbol)
            );
            println!("  Due: {}", settings.format_date(expense.due_date));
            println!("  ID:  {}", expense.id.as_uuid());
        }

        ExpenseCommands::List { filter } => {
            let expenses = filter.select(storage)?;
            let names = reference_names(storage)?;
            print!("{}", format_expense_list(&expenses, &names, settings));
        }

        ExpenseCommands::Show { expense } => {
            let expense = service.require(&expense)?;
            let names = reference_names(storage)?;
            print!("{}", format_expense_details(&expense, &names, settings));
        }

        ExpenseCommands::Edit {
            expense,
            title,
            clear_title,
            due,
            value,
            method,
            clear_method,
            category,
            clear_category,
            person,
            clear_person,
        } => {
            let existing = service.require(&expense)?;

            let mut changes = ExpenseUpdate::default();
            if clear_title {
                changes.title = Some(None);
            } else if let Some(title) = title {
                changes.title = Some(Some(title));
            }
            if let Some(due) = due {
                changes.due_date = Some(parse_date(&due)?);
            }
            if let Some(value) = value {
                changes.final_value = Some(parse_value(&value)?);
            }
            if clear_method {
                changes.payment_method_id = Some(None);
            } else if let Some(method) = method {
                changes.payment_method_id = Some(Some(methods.require(&method)?.id));
            }
            if clear_category {
                changes.category_id = Some(None);
            } else if let Some(category) = category {
                changes.category_id = Some(Some(categories.require(&category)?.id));
            }
            if clear_person {
                changes.person_id = Some(None);
            } else if let Some(person) = person {
                changes.person_id = Some(Some(people.require(&person)?.id));
            }

            if changes.is_empty() {
                println!("No changes specified. Use --title, --due, --value, --method, --category or --person.");
                return Ok(());
            }

            let updated = service.update(existing.id, changes)?;
            println!("Updated expense: {}", updated.display_title());
        }

        ExpenseCommands::Pay { expense } => {
            let existing = service.require(&expense)?;
            let updated = service.mark_paid(existing.id)?;
            println!(
                "Paid: {} {}",
                updated.display_title(),
                updated.paid_value().format_with_symbol(&settings.currency_symbol)
            );
        }

        ExpenseCommands::Unpay { expense } => {
            let existing = service.require(&expense)?;
            let updated = service.mark_unpaid(existing.id)?;
            println!("Marked as not paid: {}", updated.display_title());
        }

        ExpenseCommands::Delete { expense } => {
            let existing = service.require(&expense)?;
            let deleted = service.delete(existing.id)?;
            println!("Deleted expense: {} ({})", deleted.display_title(), deleted.id.as_uuid());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2025").unwrap_err().is_validation());
    }

    #[test]
    fn test_filter_args_resolve_titles() {
        let (_temp_dir, storage) = create_test_storage();
        let rent = CategoryService::new(&storage).create("Rent").unwrap();

        let args = FilterArgs {
            search: Some("april".into()),
            categories: vec!["rent".into()],
            paid: true,
            ..FilterArgs::default()
        };
        let params = args.to_params(&storage).unwrap().unwrap();
        let expected = RequestParams::new()
            .with(SEARCH_PARAM, "april")
            .with(CATEGORY_PARAM, rent.id.as_uuid().to_string())
            .with(PAID_PARAM, PAID_MARKER);
        assert_eq!(params, expected);
    }

    #[test]
    fn test_filter_args_unknown_person() {
        let (_temp_dir, storage) = create_test_storage();
        let args = FilterArgs {
            people: vec!["Nobody".into()],
            ..FilterArgs::default()
        };
        assert!(args.to_params(&storage).unwrap_err().is_not_found());
    }

    #[test]
    fn test_select_all_skips_paid_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let mut paid = NewExpense::new(Some("Paid".into()), date, Money::from_cents(100));
        paid.is_paid = true;
        service.create(paid).unwrap();
        service
            .create(NewExpense::new(Some("Open".into()), date, Money::from_cents(200)))
            .unwrap();

        let unpaid_only = FilterArgs::default().select(&storage).unwrap();
        assert_eq!(unpaid_only.len(), 1);
        assert_eq!(unpaid_only[0].display_title(), "Open");

        let all = FilterArgs {
            all: true,
            ..FilterArgs::default()
        };
        assert_eq!(all.select(&storage).unwrap().len(), 2);
    }
}
