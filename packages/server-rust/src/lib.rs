//! Roster Server -- concurrent in-memory employee record store behind an HTTP API.

pub mod config;
pub mod logging;
pub mod network;
pub mod storage;

pub use config::{Cli, LogFormat};
pub use network::{build_router, NetworkConfig, NetworkModule};
pub use storage::{RecordStore, RecordStoreFactory, StorageConfig, StoreError};
