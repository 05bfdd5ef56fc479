//! Narrowing a collection of expenses with request-style query parameters
//!
//! Recognized parameters:
//!
//! - `search_name`: case-insensitive substring of the title
//! - `cate_name` (repeatable): category ids
//! - `paid_name`: `paid` or `not_paid`
//! - `person_name` (repeatable): person ids
//!
//! The paid-status step always runs. Anything other than exactly `paid`
//! (including no parameter at all) keeps only unpaid expenses, so an
//! unfiltered listing shows what is still owed.

use crate::models::{CategoryId, Expense, PersonId};

pub const SEARCH_PARAM: &str = "search_name";
pub const CATEGORY_PARAM: &str = "cate_name";
pub const PAID_PARAM: &str = "paid_name";
pub const PERSON_PARAM: &str = "person_name";

/// Marker values of the `paid_name` parameter
pub const PAID_MARKER: &str = "paid";
pub const NOT_PAID_MARKER: &str = "not_paid";

/// A source of query parameters with single- and multi-value lookups
pub trait QueryParams {
    /// The value of a parameter (the last one when repeated)
    fn get(&self, name: &str) -> Option<&str>;

    /// Every value of a parameter, in order
    fn get_list(&self, name: &str) -> Vec<&str>;
}

/// Ordered multimap of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a URL query string such as `search_name=rent&cate_name=a&cate_name=b`.
    ///
    /// A leading `?` is ignored, `+` decodes to a space and percent escapes are
    /// decoded. Segments that fail to decode are kept verbatim.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// Append a parameter
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

impl QueryParams for RequestParams {
    fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn get_list(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Which expenses the paid-status step keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaidStatus {
    Paid,
    NotPaid,
}

impl PaidStatus {
    /// Interpret the values of `paid_name`.
    ///
    /// Exactly `["paid"]` selects paid expenses; `["not_paid"]` and every
    /// other input, including none, select unpaid ones.
    pub fn from_values(values: &[String]) -> Self {
        match values {
            [only] if only == PAID_MARKER => PaidStatus::Paid,
            [only] if only == NOT_PAID_MARKER => PaidStatus::NotPaid,
            _ => PaidStatus::NotPaid,
        }
    }

    pub fn matches(self, expense: &Expense) -> bool {
        match self {
            PaidStatus::Paid => expense.is_paid(),
            PaidStatus::NotPaid => !expense.is_paid(),
        }
    }
}

/// The filter criteria captured from a set of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub paid: Vec<String>,
    pub people: Vec<String>,
}

impl ExpenseFilter {
    /// Capture the recognized parameters.
    ///
    /// Blank values count as not supplied; other values are kept verbatim, so
    /// `paid_name` must be exactly `paid` to select paid expenses.
    pub fn from_params<Q: QueryParams + ?Sized>(params: &Q) -> Self {
        let list = |name: &str| -> Vec<String> {
            params
                .get_list(name)
                .into_iter()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .collect()
        };

        Self {
            search: params
                .get(SEARCH_PARAM)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            categories: list(CATEGORY_PARAM),
            paid: list(PAID_PARAM),
            people: list(PERSON_PARAM),
        }
    }

    pub fn paid_status(&self) -> PaidStatus {
        PaidStatus::from_values(&self.paid)
    }

    /// Apply the filter steps in order, returning a new collection
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut selected: Vec<&Expense> = expenses.iter().collect();

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            selected.retain(|e| {
                e.title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            });
        }

        if !self.categories.is_empty() {
            let wanted: Vec<CategoryId> = self
                .categories
                .iter()
                .filter_map(|raw| raw.parse().ok())
                .collect();
            selected.retain(|e| e.category_id.is_some_and(|id| wanted.contains(&id)));
        }

        let status = self.paid_status();
        selected.retain(|e| status.matches(e));

        if !self.people.is_empty() {
            // A malformed person id abandons this step only
            let parsed: Result<Vec<PersonId>, _> =
                self.people.iter().map(|raw| raw.parse::<PersonId>()).collect();
            if let Ok(wanted) = parsed {
                selected.retain(|e| e.person_id.is_some_and(|id| wanted.contains(&id)));
            }
        }

        selected.into_iter().cloned().collect()
    }
}

/// Narrow `expenses` by the filters present in `params`
pub fn filter_expenses<Q: QueryParams + ?Sized>(expenses: &[Expense], params: &Q) -> Vec<Expense> {
    ExpenseFilter::from_params(params).apply(expenses)
}
