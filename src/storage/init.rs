//! Storage initialization
//!
//! Handles first-run setup and the starter payment methods.

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::PaymentMethod;

use super::references::PaymentMethodRepository;

/// Payment methods created on first run
pub const DEFAULT_PAYMENT_METHODS: [&str; 3] = ["Cash", "Card", "Bank Transfer"];

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &ExpensePaths) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if !paths.payment_methods_file().exists() {
        let repo = PaymentMethodRepository::new(paths.payment_methods_file());
        for title in DEFAULT_PAYMENT_METHODS {
            repo.upsert(PaymentMethod::new(title))?;
        }
        repo.save()?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.settings_file().exists()
}
