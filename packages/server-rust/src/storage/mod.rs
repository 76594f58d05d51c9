//! Storage system for the `Roster` server.
//!
//! Two layers:
//!
//! - **Layer 1** ([`StorageEngine`]): concurrency-safe keyed map of records,
//!   implemented by [`HashMapStorage`] (sharded) and [`LockedMapStorage`]
//!   (single `RwLock`)
//! - **Layer 2** ([`RecordStore`]): employee CRUD over an engine, with
//!   metadata assignment and mutation observation
//!
//! Additionally defines [`MutationObserver`] for reacting to record mutations
//! and [`RecordStoreFactory`] for wiring a store at startup.

pub mod engine;
pub mod engines;
pub mod factory;
pub mod mutation_observer;
pub mod record;
pub mod record_store;

pub use engine::*;
pub use engines::{HashMapStorage, LockedMapStorage};
pub use factory::*;
pub use mutation_observer::*;
pub use record::*;
pub use record_store::*;
