//! Category service
//!
//! Categories are unique by title. Deleting one leaves its expenses
//! uncategorized.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, title: &str) -> ExpenseResult<Category> {
        let title = title.trim();
        let category = Category::new(title);
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.categories.get_by_key(title)?.is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: title.to_string(),
            });
        }

        let category = self.storage.categories.upsert(category)?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.title.clone()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by title or ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_key(identifier)? {
            return Ok(Some(category));
        }

        match identifier.parse::<CategoryId>() {
            Ok(id) => self.storage.categories.get(id),
            Err(_) => Ok(None),
        }
    }

    pub fn require(&self, identifier: &str) -> ExpenseResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, new_title: &str) -> ExpenseResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        let before = category.clone();
        category.rename(new_title.trim());
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let category = self.storage.categories.upsert(category)?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.title.clone()),
            &before,
            &category,
            Some(format!("title: {} -> {}", before.title, category.title)),
        )?;

        Ok(category)
    }

    /// Delete a category; returns it with the number of expenses uncategorized
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<(Category, usize)> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        let affected = self.storage.expenses.by_category(id)?;
        let cleared = ExpenseService::new(self.storage)
            .clear_references(affected, |e| e.category_id = None)?;

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            id.to_string(),
            Some(category.title.clone()),
            &category,
        )?;

        Ok((category, cleared))
    }
}
