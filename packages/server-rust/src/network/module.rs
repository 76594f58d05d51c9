//! Network module with deferred startup lifecycle.
//!
//! Implements the deferred startup pattern: `new()` takes the shared record
//! store, `start()` binds the TCP listener, and `serve()` starts accepting
//! connections.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    create_employee, delete_employee, get_employee, health_handler, list_employees,
    liveness_handler, readiness_handler, update_employee, AppState,
};
use super::middleware::{build_http_layers, track_in_flight};
use super::shutdown::ShutdownController;
use crate::storage::RecordStore;

/// Assembles the axum router with all routes and middleware.
///
/// Routes:
/// - `GET /health` -- health JSON
/// - `GET /health/live` -- liveness probe
/// - `GET /health/ready` -- readiness probe
/// - `GET|POST /employees` -- list / create
/// - `GET|PUT|DELETE /employees/{id}` -- get / update / delete
///
/// Only `/employees` routes are counted as in-flight work; probes keep
/// answering while the server drains.
pub fn build_router(state: AppState, config: &NetworkConfig) -> Router {
    let employees = Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .route_layer(from_fn_with_state(
            Arc::clone(&state.shutdown),
            track_in_flight,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .merge(employees)
        .layer(build_http_layers(config))
        .with_state(state)
}

/// Manages the HTTP server lifecycle.
///
/// 1. `new()` -- takes the store, allocates the shutdown controller
/// 2. `start()` -- binds TCP listener to the configured address
/// 3. `serve()` -- accepts connections until shutdown is signalled
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    store: Arc<RecordStore>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, store: Arc<RecordStore>) -> Self {
        Self {
            config,
            listener: None,
            store,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Returns a shared reference to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Returns a shared reference to the record store.
    #[must_use]
    pub fn store(&self) -> Arc<RecordStore> {
        Arc::clone(&self.store)
    }

    /// Builds the router over this module's store and shutdown controller.
    pub fn build_router(&self) -> Router {
        let state = AppState {
            store: Arc::clone(&self.store),
            shutdown: Arc::clone(&self.shutdown),
            start_time: Instant::now(),
        };
        build_router(state, &self.config)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which differs from the configured
    /// port when port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let port = listener.local_addr()?.port();

        info!(host = %self.config.host, port, "TCP listener bound");

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until the `shutdown` future resolves.
    ///
    /// When it does, health moves to Draining, new `/employees` requests get
    /// 503, and the server waits up to `drain_timeout` for in-flight
    /// requests before moving to Stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a fatal I/O error.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .expect("start() must be called before serve()");
        let shutdown_ctrl = self.shutdown;

        let signal_ctrl = Arc::clone(&shutdown_ctrl);
        let signal = async move {
            shutdown.await;
            info!("shutdown signal received, draining");
            signal_ctrl.trigger_shutdown();
        };

        shutdown_ctrl.set_ready();
        info!("serving HTTP connections");

        axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .await?;

        shutdown_ctrl.trigger_shutdown();
        if shutdown_ctrl.wait_for_drain(self.config.drain_timeout).await {
            info!("all in-flight requests drained");
        } else {
            warn!(
                in_flight = shutdown_ctrl.in_flight_count(),
                "drain timeout expired with in-flight requests remaining"
            );
        }
        Ok(())
    }
}
