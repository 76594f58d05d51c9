//! Server lifecycle state and in-flight request accounting.
//!
//! The lifecycle is published through an `ArcSwap` so probes and the
//! in-flight middleware read it without locking. In-flight requests are
//! counted by [`InFlightGuard`]s; the guard that brings the count to zero
//! wakes anyone waiting in [`ShutdownController::wait_for_drain`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::Notify;

/// Server lifecycle, reported by `/health`.
///
/// Moves forward only: Starting -> Ready -> Draining -> Stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Starting,
    Ready,
    /// Shutdown signalled; `/employees` requests are refused.
    Draining,
    /// Drained; no request is in flight.
    Stopped,
}

impl HealthState {
    /// Lowercase name reported by the `/health` endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

/// Shared by the network module, the health handlers, and the in-flight
/// middleware.
#[derive(Debug)]
pub struct ShutdownController {
    state: ArcSwap<HealthState>,
    in_flight: AtomicU64,
    drained: Notify,
}

impl ShutdownController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(HealthState::Starting),
            in_flight: AtomicU64::new(0),
            drained: Notify::new(),
        }
    }

    pub fn set_ready(&self) {
        self.state.store(Arc::new(HealthState::Ready));
    }

    /// Moves to `Draining`. From here on `/employees` requests get 503 and
    /// readiness fails.
    pub fn trigger_shutdown(&self) {
        self.state.store(Arc::new(HealthState::Draining));
    }

    #[must_use]
    pub fn health_state(&self) -> HealthState {
        **self.state.load()
    }

    /// `false` once shutdown has been triggered.
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        matches!(
            self.health_state(),
            HealthState::Starting | HealthState::Ready
        )
    }

    /// Counts one request as in flight until the guard is dropped.
    #[must_use]
    pub fn in_flight_guard(&self) -> InFlightGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        InFlightGuard { controller: self }
    }

    #[must_use]
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Waits until no request is in flight, for at most `timeout`.
    ///
    /// On success the state becomes `Stopped` and `true` is returned. On
    /// timeout the state is left as it was.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            // Register before checking so a release in between is not lost.
            let notified = self.drained.notified();
            if self.in_flight_count() == 0 {
                self.state.store(Arc::new(HealthState::Stopped));
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return false;
            }
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases its in-flight slot on drop, including during unwinding.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    controller: &'a ShutdownController,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.controller.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.controller.drained.notify_waiters();
        }
    }
}
