//! Low-level storage engine trait.
//!
//! Defines [`StorageEngine`], the innermost storage layer: a synchronous,
//! concurrency-safe keyed map from employee id to [`Record`]. Every method
//! resolves its key directly; only [`StorageEngine::snapshot_iter`] visits
//! all entries.

use std::fmt;
use std::str::FromStr;

use super::record::Record;

/// Keyed in-memory storage shared by all callers of a record store.
///
/// Implementations must make each method atomic with respect to its key and
/// must hold internal locks only for the duration of the map operation.
/// All operations are synchronous.
///
/// Wrapped in `Box<dyn StorageEngine>` by the record store.
pub trait StorageEngine: Send + Sync + 'static {
    /// Insert a record only if the key is vacant.
    ///
    /// Returns `None` when the record was inserted, or a copy of the record
    /// already stored under `key` (in which case nothing changes).
    fn put_if_absent(&self, key: &str, record: Record) -> Option<Record>;

    /// Retrieve a copy of the record by key, or `None` if not present.
    fn get(&self, key: &str) -> Option<Record>;

    /// Mutate the record stored under `key` in place.
    ///
    /// `mutate` runs while the key is exclusively held, so it must not call
    /// back into the engine. Returns a copy of the record after mutation,
    /// or `None` (without calling `mutate`) if the key is absent.
    fn update(&self, key: &str, mutate: &mut dyn FnMut(&mut Record)) -> Option<Record>;

    /// Remove a record by key, returning the removed record.
    fn remove(&self, key: &str) -> Option<Record>;

    /// Check if a key exists without copying the record.
    fn contains_key(&self, key: &str) -> bool;

    /// Return the number of entries.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Return a point-in-time copy of all entries, in no particular order.
    ///
    /// No write is applied halfway through the copy: every write either
    /// happened before the snapshot or after it.
    fn snapshot_iter(&self) -> Vec<(String, Record)>;
}

/// Selects which [`StorageEngine`] implementation backs the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// [`HashMapStorage`](super::engines::HashMapStorage): sharded `DashMap`,
    /// writers on different shards never contend.
    #[default]
    DashMap,
    /// [`LockedMapStorage`](super::engines::LockedMapStorage): one `RwLock`
    /// around a `HashMap`, held only for the map operation.
    Locked,
}

impl EngineKind {
    /// Returns the lowercase name used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DashMap => "dashmap",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown engine name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage engine '{0}', expected 'dashmap' or 'locked'")]
pub struct UnknownEngine(pub String);

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dashmap" => Ok(Self::DashMap),
            "locked" => Ok(Self::Locked),
            _ => Err(UnknownEngine(s.to_string())),
        }
    }
}
