//! Factory for creating fully-wired [`RecordStore`] instances.
//!
//! [`RecordStoreFactory`] is the dependency injection point: it picks the
//! [`StorageEngine`] named by [`StorageConfig::engine`], assembles a
//! [`CompositeMutationObserver`] from registered observers, and loads the
//! startup seed set when configured.

use std::sync::Arc;

use roster_core::seed_employees;
use tracing::info;

use crate::storage::engine::{EngineKind, StorageEngine};
use crate::storage::engines::{HashMapStorage, LockedMapStorage};
use crate::storage::mutation_observer::{
    CompositeMutationObserver, MetricsObserver, MutationObserver, TracingObserver,
};
use crate::storage::record_store::{RecordStore, StorageConfig};

/// Builds the engine for the given kind.
#[must_use]
pub fn build_engine(kind: EngineKind) -> Box<dyn StorageEngine> {
    match kind {
        EngineKind::DashMap => Box::new(HashMapStorage::new()),
        EngineKind::Locked => Box::new(LockedMapStorage::new()),
    }
}

/// Factory for creating fully-wired [`RecordStore`] instances.
pub struct RecordStoreFactory {
    config: StorageConfig,
    observers: Vec<Arc<dyn MutationObserver>>,
}

impl RecordStoreFactory {
    /// Creates a new factory with the given configuration and observers.
    #[must_use]
    pub fn new(config: StorageConfig, observers: Vec<Arc<dyn MutationObserver>>) -> Self {
        Self { config, observers }
    }

    /// Creates a factory with the default observers: tracing and metrics.
    #[must_use]
    pub fn with_default_observers(config: StorageConfig) -> Self {
        Self::new(
            config,
            vec![Arc::new(TracingObserver), Arc::new(MetricsObserver)],
        )
    }

    /// Creates a [`RecordStore`], seeded if the config asks for it.
    #[must_use]
    pub fn create(&self) -> RecordStore {
        let engine = build_engine(self.config.engine);
        let observer = Arc::new(CompositeMutationObserver::new(self.observers.clone()));
        let observers = observer.len();
        let store = RecordStore::new(engine, observer);

        if self.config.seed {
            store.seed(seed_employees());
        }

        info!(
            engine = %self.config.engine,
            records = store.len(),
            observers,
            "record store ready"
        );
        store
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use roster_core::{Employee, EmployeePatch, SEED_COUNT};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;

    #[derive(Default)]
    struct SeedCounter(AtomicUsize);

    impl MutationObserver for SeedCounter {
        fn on_create(&self, _: &Employee) {}
        fn on_update(&self, _: &Employee, _: &Employee) {}
        fn on_delete(&self, _: &Employee) {}
        fn on_seed(&self, inserted: usize) {
            self.0.fetch_add(inserted, Ordering::Relaxed);
        }
    }

    #[test]
    fn default_config_creates_seeded_store() {
        let store = RecordStoreFactory::with_default_observers(StorageConfig::default()).create();

        assert_eq!(store.len(), SEED_COUNT);
        assert_eq!(store.get("3").unwrap().name, "User3");
    }

    #[test]
    fn seed_disabled_creates_empty_store() {
        let config = StorageConfig {
            seed: false,
            ..StorageConfig::default()
        };
        let store = RecordStoreFactory::new(config, Vec::new()).create();
        assert!(store.is_empty());
    }

    #[test]
    fn every_engine_kind_produces_working_store() {
        for engine in [EngineKind::DashMap, EngineKind::Locked] {
            let config = StorageConfig { engine, seed: true };
            let store = RecordStoreFactory::new(config, Vec::new()).create();

            store.update("1", &EmployeePatch::new("Bob", "OPS")).unwrap();
            assert!(store.delete("2"));
            assert_eq!(store.len(), SEED_COUNT - 1);
        }
    }

    /// Counts events emitted by the factory itself.
    struct FactoryEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for FactoryEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if event.metadata().target() == "roster_server::storage::factory" {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn create_announces_the_store_once() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(FactoryEvents(Arc::clone(&events)));
        let factory = RecordStoreFactory::with_default_observers(StorageConfig::default());

        let store = tracing::subscriber::with_default(subscriber, || factory.create());

        assert_eq!(store.len(), SEED_COUNT);
        assert_eq!(events.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn registered_observers_are_wired_into_store() {
        let counter = Arc::new(SeedCounter::default());
        let factory = RecordStoreFactory::new(
            StorageConfig::default(),
            vec![counter.clone() as Arc<dyn MutationObserver>],
        );

        let _first = factory.create();
        let _second = factory.create();

        assert_eq!(counter.0.load(Ordering::Relaxed), 2 * SEED_COUNT);
    }

    #[test]
    fn stores_from_one_factory_are_independent() {
        let factory = RecordStoreFactory::new(StorageConfig::default(), Vec::new());
        let first = factory.create();
        let second = factory.create();

        assert!(first.delete("1"));
        assert!(second.contains("1"));
    }
}
