//! HTTP handler definitions for the Roster server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod employees;
pub mod error;
pub mod health;

pub use employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
};
pub use error::{ApiError, ApiJson};
pub use health::{health_handler, liveness_handler, readiness_handler};

use std::sync::Arc;
use std::time::Instant;

use super::ShutdownController;
use crate::storage::RecordStore;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references so cloning per request is cheap. The store is
/// constructed once at startup and injected here; handlers never reach it
/// any other way.
#[derive(Clone)]
pub struct AppState {
    /// The employee record store.
    pub store: Arc<RecordStore>,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}
