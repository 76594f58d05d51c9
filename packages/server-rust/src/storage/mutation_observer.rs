//! Mutation observer trait and composite implementation.
//!
//! Defines [`MutationObserver`] for reacting to record mutations within a
//! [`RecordStore`](super::RecordStore), and [`CompositeMutationObserver`]
//! which fans out notifications to multiple observers.
//!
//! Observers are always called after the storage engine has released its
//! locks, so logging and metrics never extend a critical section.

use std::sync::Arc;

use roster_core::Employee;
use tracing::{debug, info};

/// Observer for record mutations within a `RecordStore`.
///
/// Used as `Arc<dyn MutationObserver>`.
pub trait MutationObserver: Send + Sync {
    /// Called after a new record is inserted by `create`.
    fn on_create(&self, employee: &Employee);

    /// Called after a record's mutable fields were replaced.
    fn on_update(&self, old: &Employee, new: &Employee);

    /// Called after a record is removed.
    fn on_delete(&self, employee: &Employee);

    /// Called once after the startup seed set has been loaded.
    fn on_seed(&self, inserted: usize);

    /// Called with the store's record count after a create, delete, or seed.
    ///
    /// Concurrent mutations may report out of order; the next mutation
    /// reports a fresh count.
    fn on_record_count(&self, _records: usize) {}
}

/// Composite observer that fans out to multiple observers.
#[derive(Default)]
pub struct CompositeMutationObserver {
    observers: Vec<Arc<dyn MutationObserver>>,
}

impl CompositeMutationObserver {
    /// Creates a composite observer with the given list of observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn MutationObserver>>) -> Self {
        Self { observers }
    }

    /// Number of registered observers.
    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}

impl MutationObserver for CompositeMutationObserver {
    fn on_create(&self, employee: &Employee) {
        for observer in &self.observers {
            observer.on_create(employee);
        }
    }

    fn on_update(&self, old: &Employee, new: &Employee) {
        for observer in &self.observers {
            observer.on_update(old, new);
        }
    }

    fn on_delete(&self, employee: &Employee) {
        for observer in &self.observers {
            observer.on_delete(employee);
        }
    }

    fn on_seed(&self, inserted: usize) {
        for observer in &self.observers {
            observer.on_seed(inserted);
        }
    }

    fn on_record_count(&self, records: usize) {
        for observer in &self.observers {
            observer.on_record_count(records);
        }
    }
}

/// Emits one structured `tracing` event per mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MutationObserver for TracingObserver {
    fn on_create(&self, employee: &Employee) {
        info!(
            id = %employee.id,
            department = %employee.department,
            "employee created"
        );
    }

    fn on_update(&self, old: &Employee, new: &Employee) {
        info!(
            id = %new.id,
            old_department = %old.department,
            department = %new.department,
            "employee updated"
        );
        debug!(id = %new.id, old_name = %old.name, name = %new.name, "employee renamed");
    }

    fn on_delete(&self, employee: &Employee) {
        info!(id = %employee.id, "employee deleted");
    }

    fn on_seed(&self, inserted: usize) {
        info!(records = inserted, "employee store seeded");
    }
}

/// Counter of store mutations, labelled by `op`.
pub const MUTATIONS_TOTAL: &str = "roster_store_mutations_total";
/// Gauge holding the latest record count reported by a store.
pub const RECORDS_GAUGE: &str = "roster_store_records";

/// Records mutation counts through the `metrics` facade.
///
/// The records gauge is set, not accumulated, so it holds the last count
/// any store reported. Without an installed recorder every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsObserver;

impl MutationObserver for MetricsObserver {
    fn on_create(&self, _employee: &Employee) {
        metrics::counter!(MUTATIONS_TOTAL, "op" => "create").increment(1);
    }

    fn on_update(&self, _old: &Employee, _new: &Employee) {
        metrics::counter!(MUTATIONS_TOTAL, "op" => "update").increment(1);
    }

    fn on_delete(&self, _employee: &Employee) {
        metrics::counter!(MUTATIONS_TOTAL, "op" => "delete").increment(1);
    }

    fn on_seed(&self, inserted: usize) {
        metrics::counter!(MUTATIONS_TOTAL, "op" => "seed").increment(inserted as u64);
    }

    #[allow(clippy::cast_precision_loss)]
    fn on_record_count(&self, records: usize) {
        metrics::gauge!(RECORDS_GAUGE).set(records as f64);
    }
}
