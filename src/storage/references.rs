//! Repositories for the entities expenses refer to: payment methods,
//! categories and people. Each is unique by title (or name).

use std::cmp::Ordering;

use crate::models::{Category, CategoryId, PaymentMethod, PaymentMethodId, Person, PersonId};

use super::repository::{Record, Repository};

impl Record for PaymentMethod {
    type Id = PaymentMethodId;
    const ENTITY_NAME: &'static str = "Payment method";

    fn id(&self) -> PaymentMethodId {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.title.to_lowercase().cmp(&other.title.to_lowercase())
    }
}

impl Record for Category {
    type Id = CategoryId;
    const ENTITY_NAME: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.title.to_lowercase().cmp(&other.title.to_lowercase())
    }
}

impl Record for Person {
    type Id = PersonId;
    const ENTITY_NAME: &'static str = "Person";

    fn id(&self) -> PersonId {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.name.to_lowercase().cmp(&other.name.to_lowercase())
    }
}

pub type PaymentMethodRepository = Repository<PaymentMethod>;
pub type CategoryRepository = Repository<Category>;
pub type PersonRepository = Repository<Person>;
