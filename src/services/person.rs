//! Person service

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Person, PersonId};
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Service for people expenses can be assigned to
pub struct PersonService<'a> {
    storage: &'a Storage,
}

impl<'a> PersonService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str) -> ExpenseResult<Person> {
        let name = name.trim();
        let person = Person::new(name);
        person
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.people.get_by_key(name)?.is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "Person",
                identifier: name.to_string(),
            });
        }

        let person = self.storage.people.upsert(person)?;
        self.storage.people.save()?;

        self.storage.log_create(
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &person,
        )?;

        Ok(person)
    }

    /// Find a person by name or ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Person>> {
        if let Some(person) = self.storage.people.get_by_key(identifier)? {
            return Ok(Some(person));
        }

        match identifier.parse::<PersonId>() {
            Ok(id) => self.storage.people.get(id),
            Err(_) => Ok(None),
        }
    }

    pub fn require(&self, identifier: &str) -> ExpenseResult<Person> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::person_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Person>> {
        self.storage.people.get_all()
    }

    /// Delete a person; their expenses are kept without a person
    pub fn delete(&self, id: PersonId) -> ExpenseResult<(Person, usize)> {
        let person = self
            .storage
            .people
            .get(id)?
            .ok_or_else(|| ExpenseError::person_not_found(id.to_string()))?;

        let affected = self.storage.expenses.by_person(id)?;
        let cleared = ExpenseService::new(self.storage)
            .clear_references(affected, |e| e.person_id = None)?;

        self.storage.people.delete(id)?;
        self.storage.people.save()?;

        self.storage.log_delete(
            EntityType::Person,
            id.to_string(),
            Some(person.name.clone()),
            &person,
        )?;

        Ok((person, cleared))
    }
}
