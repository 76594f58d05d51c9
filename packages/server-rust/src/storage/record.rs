//! Record types for the storage layer.
//!
//! Defines the unit stored in a [`StorageEngine`](super::StorageEngine):
//! an [`Employee`] plus server-internal [`RecordMetadata`].

use roster_core::Employee;

/// Metadata tracked for every stored employee.
///
/// Server-internal -- NOT serialized to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMetadata {
    /// Record version, starts at 1 and is incremented on every update.
    pub version: u32,
    /// Monotonic insertion counter assigned by the record store.
    /// Snapshots are ordered by this value.
    pub sequence: u64,
}

impl RecordMetadata {
    /// Creates metadata for a freshly inserted record.
    #[must_use]
    pub fn new(sequence: u64) -> Self {
        Self {
            version: 1,
            sequence,
        }
    }

    /// Records a write: increments `version`.
    pub fn on_update(&mut self) {
        self.version = self.version.saturating_add(1);
    }
}

/// A stored employee together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub employee: Employee,
    pub metadata: RecordMetadata,
}

impl Record {
    #[must_use]
    pub fn new(employee: Employee, sequence: u64) -> Self {
        Self {
            employee,
            metadata: RecordMetadata::new(sequence),
        }
    }
}
