//! Generic JSON-backed repository
//!
//! Every entity file has the same shape (`{"items": [...]}`) and the same
//! in-memory layout: a map by id plus an optional index of normalized unique
//! keys (titles, names). Entities describe themselves through [`Record`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_json, write_json_atomic};

/// An entity that can be kept in a [`Repository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display;

    /// Name used in error messages ("Expense", "Category", ...)
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// A value that must be unique across records (compared case-insensitively)
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Ordering used by [`Repository::get_all`] and when saving
    fn listing_order(&self, other: &Self) -> Ordering;

    /// Hook run on every record right before it enters the store
    fn before_save(&mut self) {}
}

/// Normalize a unique key for indexing
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordFile<T> {
    items: Vec<T>,
}

impl<T> Default for RecordFile<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// In-memory store of one entity type, persisted to a single JSON file
pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
    by_key: RwLock<HashMap<String, T::Id>>,
}

fn read_guard<V>(lock: &RwLock<V>) -> ExpenseResult<RwLockReadGuard<'_, V>> {
    lock.read()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
}

fn write_guard<V>(lock: &RwLock<V>) -> ExpenseResult<RwLockWriteGuard<'_, V>> {
    lock.write()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_key: RwLock::new(HashMap::new()),
        }
    }

    /// Load records from disk, replacing anything held in memory
    pub fn load(&self) -> ExpenseResult<()> {
        let file: RecordFile<T> = read_json(&self.path)?;

        let mut data = write_guard(&self.data)?;
        let mut by_key = write_guard(&self.by_key)?;

        data.clear();
        by_key.clear();

        for record in file.items {
            if let Some(key) = record.unique_key() {
                by_key.insert(normalize_key(key), record.id());
            }
            data.insert(record.id(), record);
        }

        Ok(())
    }

    /// Save all records to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let items = self.get_all()?;
        write_json_atomic(&self.path, &RecordFile { items })
    }

    pub fn get(&self, id: T::Id) -> ExpenseResult<Option<T>> {
        let data = read_guard(&self.data)?;
        Ok(data.get(&id).cloned())
    }

    /// All records in listing order
    pub fn get_all(&self) -> ExpenseResult<Vec<T>> {
        let data = read_guard(&self.data)?;
        let mut records: Vec<T> = data.values().cloned().collect();
        records.sort_by(|a, b| a.listing_order(b));
        Ok(records)
    }

    /// Look up a record by its unique key (case-insensitive)
    pub fn get_by_key(&self, key: &str) -> ExpenseResult<Option<T>> {
        let data = read_guard(&self.data)?;
        let by_key = read_guard(&self.by_key)?;

        Ok(by_key
            .get(&normalize_key(key))
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Records matching a predicate, in listing order
    pub fn find_all<F>(&self, predicate: F) -> ExpenseResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.get_all()?.into_iter().filter(|r| predicate(r)).collect())
    }

    /// Insert or update a record, returning it as stored
    ///
    /// Runs [`Record::before_save`] first. Fails with `Duplicate` when another
    /// record already owns the same unique key.
    pub fn upsert(&self, mut record: T) -> ExpenseResult<T> {
        record.before_save();

        let mut data = write_guard(&self.data)?;
        let mut by_key = write_guard(&self.by_key)?;

        let id = record.id();
        let new_key = record.unique_key().map(normalize_key);

        if let Some(key) = &new_key {
            if let Some(owner) = by_key.get(key) {
                if *owner != id {
                    return Err(ExpenseError::Duplicate {
                        entity_type: T::ENTITY_NAME,
                        identifier: record.unique_key().unwrap_or_default().trim().to_string(),
                    });
                }
            }
        }

        if let Some(old_key) = data.get(&id).and_then(|old| old.unique_key()).map(normalize_key) {
            by_key.remove(&old_key);
        }

        if let Some(key) = new_key {
            by_key.insert(key, id);
        }

        data.insert(id, record.clone());
        Ok(record)
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> ExpenseResult<Option<T>> {
        let mut data = write_guard(&self.data)?;
        let mut by_key = write_guard(&self.by_key)?;

        let removed = data.remove(&id);
        if let Some(key) = removed.as_ref().and_then(|r| r.unique_key()) {
            by_key.remove(&normalize_key(key));
        }

        Ok(removed)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read_guard(&self.data)?.len())
    }
}
