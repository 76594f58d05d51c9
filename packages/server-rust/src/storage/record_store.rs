//! The employee record store.
//!
//! [`RecordStore`] is the primary interface that HTTP handlers interact
//! with. It wraps a Layer 1 [`StorageEngine`] with id-keyed CRUD
//! semantics, assigns record metadata, and notifies a
//! [`CompositeMutationObserver`] after each successful mutation.
//!
//! Every operation resolves its id with a single keyed engine call, so
//! operations on one id are linearizable and operations on different ids
//! only share whatever sharding the engine provides.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use roster_core::{Employee, EmployeePatch};
use tracing::warn;

use super::engine::{EngineKind, StorageEngine};
use super::mutation_observer::{CompositeMutationObserver, MutationObserver};
use super::record::Record;

/// Expected outcomes of store operations that did not apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The id does not resolve to any stored record.
    #[error("employee '{id}' not found")]
    NotFound { id: String },
    /// `create` targeted an id that is already stored.
    #[error("employee '{id}' already exists")]
    Conflict { id: String },
}

impl StoreError {
    fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/// Configuration for the record store, applied by
/// [`RecordStoreFactory`](super::RecordStoreFactory).
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Which engine backs the store.
    pub engine: EngineKind,
    /// Load the fixed startup records on creation.
    pub seed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            seed: true,
        }
    }
}

/// In-memory employee store with keyed CRUD.
///
/// Duplicate ids are rejected on `create` with [`StoreError::Conflict`];
/// the stored record is left untouched.
///
/// Shared as `Arc<RecordStore>`; all methods take `&self`.
pub struct RecordStore {
    engine: Box<dyn StorageEngine>,
    observer: Arc<CompositeMutationObserver>,
    next_sequence: AtomicU64,
}

impl RecordStore {
    /// Creates an empty store over the given engine.
    #[must_use]
    pub fn new(engine: Box<dyn StorageEngine>, observer: Arc<CompositeMutationObserver>) -> Self {
        Self {
            engine,
            observer,
            next_sequence: AtomicU64::new(0),
        }
    }

    fn next_sequence(&self) -> u64 {
        self.next_sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns a copy of every stored employee, oldest insertion first.
    ///
    /// The returned vector is detached from the store.
    #[must_use]
    pub fn list(&self) -> Vec<Employee> {
        let mut entries = self.engine.snapshot_iter();
        entries.sort_unstable_by_key(|(_, record)| record.metadata.sequence);
        entries.into_iter().map(|(_, record)| record.employee).collect()
    }

    /// Looks up one employee by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn get(&self, id: &str) -> Result<Employee, StoreError> {
        self.engine
            .get(id)
            .map(|record| record.employee)
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Inserts a new employee and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the id is already stored.
    pub fn create(&self, employee: Employee) -> Result<Employee, StoreError> {
        self.insert(employee.clone())?;
        self.observer.on_create(&employee);
        self.observer.on_record_count(self.engine.len());
        Ok(employee)
    }

    fn insert(&self, employee: Employee) -> Result<(), StoreError> {
        let id = employee.id.clone();
        let record = Record::new(employee, self.next_sequence());
        match self.engine.put_if_absent(&id, record) {
            None => Ok(()),
            Some(_) => Err(StoreError::Conflict { id }),
        }
    }

    /// Replaces the name and department of an existing employee.
    ///
    /// The id never changes and a missing id never creates a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Employee, StoreError> {
        let mut previous = None;
        let updated = self
            .engine
            .update(id, &mut |record: &mut Record| {
                previous = Some(record.employee.clone());
                record.employee.apply(patch);
                record.metadata.on_update();
            })
            .ok_or_else(|| StoreError::not_found(id))?;

        if let Some(old) = previous {
            self.observer.on_update(&old, &updated.employee);
        }
        Ok(updated.employee)
    }

    /// Removes an employee. Returns `true` if a record was removed.
    pub fn delete(&self, id: &str) -> bool {
        match self.engine.remove(id) {
            Some(record) => {
                self.observer.on_delete(&record.employee);
                self.observer.on_record_count(self.engine.len());
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a record with this id is stored.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.engine.contains_key(id)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// Bulk-loads startup records, returning how many were inserted.
    ///
    /// Ids already present are skipped with a warning instead of failing.
    pub fn seed(&self, employees: impl IntoIterator<Item = Employee>) -> usize {
        let mut inserted = 0;
        for employee in employees {
            match self.insert(employee) {
                Ok(()) => inserted += 1,
                Err(err) => warn!(error = %err, "skipping seed record"),
            }
        }
        self.observer.on_seed(inserted);
        self.observer.on_record_count(self.engine.len());
        inserted
    }
}
