//! HTTP middleware for the `Roster` server.
//!
//! [`build_http_layers`] wraps the whole router. [`track_in_flight`] is
//! attached only to the `/employees` routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::config::NetworkConfig;
use super::shutdown::ShutdownController;

const REQUEST_ID: &str = "x-request-id";

/// Router-wide layers, outermost first.
pub type HttpLayers = (
    SetRequestIdLayer<MakeRequestUuid>,
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>>,
    CompressionLayer,
    CorsLayer,
    TimeoutLayer,
    PropagateRequestIdLayer,
);

/// Builds the router-wide layers.
///
/// A request id is assigned before the trace span opens so every log line
/// for the request carries it; a caller-supplied `x-request-id` is kept.
/// Requests running longer than `request_timeout` get 408.
#[must_use]
pub fn build_http_layers(config: &NetworkConfig) -> HttpLayers {
    (
        SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID), MakeRequestUuid),
        TraceLayer::new_for_http(),
        CompressionLayer::new(),
        build_cors_layer(&config.cors_origins),
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout),
        PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID)),
    )
}

/// `*` anywhere in the list allows every origin. Entries that are not valid
/// header values are skipped.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse::<HeaderValue>().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Counts each request as in flight for the duration of the inner handler.
///
/// Once shutdown has started, new requests are refused with 503 so that
/// draining converges.
pub async fn track_in_flight(
    State(shutdown): State<Arc<ShutdownController>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !shutdown.is_accepting() {
        debug!(uri = %request.uri(), "refusing request while draining");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let _guard = shutdown.in_flight_guard();
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::header;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use tokio::sync::oneshot;
    use tower::ServiceExt;

    use super::*;
    use crate::network::HealthState;

    fn get_req(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// `/employees` waits for `release`; `/fast` answers at once.
    fn held_router(shutdown: &Arc<ShutdownController>, release: oneshot::Receiver<()>) -> Router {
        let release = Arc::new(tokio::sync::Mutex::new(Some(release)));
        Router::new()
            .route(
                "/employees",
                get(move || {
                    let release = Arc::clone(&release);
                    async move {
                        if let Some(rx) = release.lock().await.take() {
                            let _ = rx.await;
                        }
                        "[]"
                    }
                }),
            )
            .route("/fast", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(Arc::clone(shutdown), track_in_flight))
    }

    #[tokio::test]
    async fn drain_waits_for_held_employee_request_and_refuses_new_ones() {
        let shutdown = Arc::new(ShutdownController::new());
        shutdown.set_ready();
        let (release_tx, release_rx) = oneshot::channel();
        let app = held_router(&shutdown, release_rx);

        let held = tokio::spawn(app.clone().oneshot(get_req("/employees")));
        while shutdown.in_flight_count() == 0 {
            tokio::task::yield_now().await;
        }

        shutdown.trigger_shutdown();
        let refused = app.clone().oneshot(get_req("/fast")).await.unwrap();
        assert_eq!(refused.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(shutdown.in_flight_count(), 1);

        assert!(!shutdown.wait_for_drain(Duration::from_millis(30)).await);
        assert_eq!(shutdown.health_state(), HealthState::Draining);

        release_tx.send(()).unwrap();
        let finished = held.await.unwrap().unwrap();
        assert_eq!(finished.status(), StatusCode::OK);

        assert!(shutdown.wait_for_drain(Duration::from_secs(1)).await);
        assert_eq!(shutdown.health_state(), HealthState::Stopped);
    }

    #[tokio::test]
    async fn requests_are_accepted_before_ready() {
        let shutdown = Arc::new(ShutdownController::new());
        let (_release_tx, release_rx) = oneshot::channel();
        let app = held_router(&shutdown, release_rx);

        let res = app.oneshot(get_req("/fast")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(shutdown.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn cors_preflight_allows_crud_methods_for_listed_origin() {
        let config = NetworkConfig {
            cors_origins: vec!["https://hr.example".to_string(), "not a header\n".to_string()],
            ..NetworkConfig::default()
        };
        let app = Router::new()
            .route("/employees", get(|| async { "[]" }))
            .layer(build_http_layers(&config));

        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/employees")
            .header(header::ORIGIN, "https://hr.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(preflight).await.unwrap();
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://hr.example"
        );
        let methods = res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .to_string();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "{method} missing from {methods}");
        }

        let foreign = Request::builder()
            .uri("/employees")
            .header(header::ORIGIN, "https://other.example")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(foreign).await.unwrap();
        assert!(!res
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_request_times_out_with_408() {
        let config = NetworkConfig {
            request_timeout: Duration::from_secs(5),
            ..NetworkConfig::default()
        };
        let app = Router::new()
            .route(
                "/employees",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    "[]"
                }),
            )
            .layer(build_http_layers(&config));

        let res = app.oneshot(get_req("/employees")).await.unwrap();
        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn caller_request_id_is_echoed() {
        let app = Router::new()
            .route("/employees", get(|| async { "[]" }))
            .layer(build_http_layers(&NetworkConfig::default()));

        let req = Request::builder()
            .uri("/employees")
            .header(REQUEST_ID, "trace-42")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.headers()[REQUEST_ID], "trace-42");
    }
}
