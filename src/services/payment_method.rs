//! Payment method service
//!
//! Payment methods are unique by title. Deleting one clears it from every
//! expense that referenced it; the expenses themselves are kept.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{PaymentMethod, PaymentMethodId};
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Service for payment method management
pub struct PaymentMethodService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentMethodService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new payment method
    pub fn create(&self, title: &str) -> ExpenseResult<PaymentMethod> {
        let title = title.trim();
        let method = PaymentMethod::new(title);
        method
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.payment_methods.get_by_key(title)?.is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "Payment method",
                identifier: title.to_string(),
            });
        }

        let method = self.storage.payment_methods.upsert(method)?;
        self.storage.payment_methods.save()?;

        self.storage.log_create(
            EntityType::PaymentMethod,
            method.id.to_string(),
            Some(method.title.clone()),
            &method,
        )?;

        Ok(method)
    }

    pub fn get(&self, id: PaymentMethodId) -> ExpenseResult<Option<PaymentMethod>> {
        self.storage.payment_methods.get(id)
    }

    /// Find a payment method by title or ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<PaymentMethod>> {
        if let Some(method) = self.storage.payment_methods.get_by_key(identifier)? {
            return Ok(Some(method));
        }

        if let Ok(id) = identifier.parse::<PaymentMethodId>() {
            return self.storage.payment_methods.get(id);
        }

        Ok(None)
    }

    /// Find a payment method or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> ExpenseResult<PaymentMethod> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::payment_method_not_found(identifier))
    }

    /// List all payment methods, by title
    pub fn list(&self) -> ExpenseResult<Vec<PaymentMethod>> {
        self.storage.payment_methods.get_all()
    }

    /// Rename a payment method
    pub fn rename(&self, id: PaymentMethodId, new_title: &str) -> ExpenseResult<PaymentMethod> {
        let mut method = self
            .storage
            .payment_methods
            .get(id)?
            .ok_or_else(|| ExpenseError::payment_method_not_found(id.to_string()))?;

        let before = method.clone();
        method.rename(new_title.trim());
        method
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let method = self.storage.payment_methods.upsert(method)?;
        self.storage.payment_methods.save()?;

        self.storage.log_update(
            EntityType::PaymentMethod,
            method.id.to_string(),
            Some(method.title.clone()),
            &before,
            &method,
            Some(format!("title: {} -> {}", before.title, method.title)),
        )?;

        Ok(method)
    }

    /// Delete a payment method, clearing it from the expenses that used it.
    ///
    /// Returns the deleted method and the number of expenses updated.
    pub fn delete(&self, id: PaymentMethodId) -> ExpenseResult<(PaymentMethod, usize)> {
        let method = self
            .storage
            .payment_methods
            .get(id)?
            .ok_or_else(|| ExpenseError::payment_method_not_found(id.to_string()))?;

        let affected = self.storage.expenses.by_payment_method(id)?;
        let cleared = ExpenseService::new(self.storage)
            .clear_references(affected, |e| e.payment_method_id = None)?;

        self.storage.payment_methods.delete(id)?;
        self.storage.payment_methods.save()?;

        self.storage.log_delete(
            EntityType::PaymentMethod,
            id.to_string(),
            Some(method.title.clone()),
            &method,
        )?;

        Ok((method, cleared))
    }
}
