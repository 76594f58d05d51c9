//! In-memory [`StorageEngine`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without a store-wide lock.
//! Suitable for all workloads where the record set fits in memory.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::storage::engine::StorageEngine;
use crate::storage::record::Record;

/// In-memory storage backed by [`DashMap`] for concurrent keyed access.
///
/// Each key hashes to one shard, and only that shard's lock is taken for a
/// keyed operation, so writers on different shards proceed in parallel.
///
/// Writers also hold the shared side of `snapshot_gate`; [`snapshot_iter`]
/// takes the exclusive side so a snapshot never observes half of a
/// concurrent batch of writes. Readers never touch the gate.
///
/// [`snapshot_iter`]: StorageEngine::snapshot_iter
pub struct HashMapStorage {
    entries: DashMap<String, Record>,
    snapshot_gate: RwLock<()>,
}

impl HashMapStorage {
    /// Creates a new, empty `HashMapStorage`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            snapshot_gate: RwLock::new(()),
        }
    }
}

impl Default for HashMapStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for HashMapStorage {
    fn put_if_absent(&self, key: &str, record: Record) -> Option<Record> {
        let _gate = self.snapshot_gate.read();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(existing) => Some(existing.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(record);
                None
            }
        }
    }

    fn get(&self, key: &str) -> Option<Record> {
        self.entries.get(key).map(|r| r.clone())
    }

    fn update(&self, key: &str, mutate: &mut dyn FnMut(&mut Record)) -> Option<Record> {
        let _gate = self.snapshot_gate.read();
        let mut entry = self.entries.get_mut(key)?;
        mutate(entry.value_mut());
        Some(entry.value().clone())
    }

    fn remove(&self, key: &str) -> Option<Record> {
        let _gate = self.snapshot_gate.read();
        self.entries.remove(key).map(|(_, r)| r)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn snapshot_iter(&self) -> Vec<(String, Record)> {
        let _gate = self.snapshot_gate.write();
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
