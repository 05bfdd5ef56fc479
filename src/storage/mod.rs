//! Storage layer for my-expenses
//!
//! Provides JSON file storage with atomic writes, one repository per entity,
//! and the audit hooks every service write goes through.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod references;
pub mod repository;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use references::{CategoryRepository, PaymentMethodRepository, PersonRepository};
pub use repository::{Record, Repository};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExpensePaths,
    audit: AuditLogger,
    pub expenses: ExpenseRepository,
    pub payment_methods: PaymentMethodRepository,
    pub categories: CategoryRepository,
    pub people: PersonRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            payment_methods: PaymentMethodRepository::new(paths.payment_methods_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            people: PersonRepository::new(paths.people_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> ExpenseResult<()> {
        self.expenses.load()?;
        self.payment_methods.load()?;
        self.categories.load()?;
        self.people.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> ExpenseResult<()> {
        self.expenses.save()?;
        self.payment_methods.save()?;
        self.categories.save()?;
        self.people.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> ExpenseResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
