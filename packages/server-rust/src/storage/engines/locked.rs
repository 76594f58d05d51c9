//! Single-lock [`StorageEngine`] implementation.
//!
//! A `HashMap` behind one `parking_lot::RwLock`. The lock guards only the
//! map call itself; cloning a returned record happens under the guard, but
//! nothing else does.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;

use crate::storage::engine::StorageEngine;
use crate::storage::record::Record;

/// In-memory storage guarded by a single reader-writer lock.
///
/// Reads share the lock; writes are exclusive for the duration of one map
/// operation. Snapshots are trivially point-in-time.
#[derive(Default)]
pub struct LockedMapStorage {
    entries: RwLock<HashMap<String, Record>>,
}

impl LockedMapStorage {
    /// Creates a new, empty `LockedMapStorage`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageEngine for LockedMapStorage {
    fn put_if_absent(&self, key: &str, record: Record) -> Option<Record> {
        match self.entries.write().entry(key.to_string()) {
            Entry::Occupied(existing) => Some(existing.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(record);
                None
            }
        }
    }

    fn get(&self, key: &str) -> Option<Record> {
        self.entries.read().get(key).cloned()
    }

    fn update(&self, key: &str, mutate: &mut dyn FnMut(&mut Record)) -> Option<Record> {
        let mut entries = self.entries.write();
        let record = entries.get_mut(key)?;
        mutate(record);
        Some(record.clone())
    }

    fn remove(&self, key: &str) -> Option<Record> {
        self.entries.write().remove(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn snapshot_iter(&self) -> Vec<(String, Record)> {
        self.entries
            .read()
            .iter()
            .map(|(k, r)| (k.clone(), r.clone()))
            .collect()
    }
}
