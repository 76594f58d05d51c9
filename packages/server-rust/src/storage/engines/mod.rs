//! [`StorageEngine`](super::StorageEngine) implementations.

mod hashmap;
mod locked;

pub use hashmap::HashMapStorage;
pub use locked::LockedMapStorage;
