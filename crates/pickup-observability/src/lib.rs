//! # Pickup Observability
//!
//! Tracing subscriber setup, HTTP request logging and Prometheus metrics for
//! the pickup service.
//!
//! Everything here can be compiled out with the `observability` feature, in
//! which case the same functions exist as no-ops and only a basic console
//! subscriber is installed. At runtime `OBSERVABILITY_ENABLED=false` has the
//! same effect.
//!
//! ```no_run
//! use pickup_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... serve ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, set_queue_active, track_check_in,
    track_release, track_release_noop, track_teacher_login_failure, track_teacher_login_success,
};

#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console logging only.
    pub fn init_tracing() {
        super::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn track_check_in(_assignment: &str, _method: &str) {}
    pub fn track_release(_wait_minutes: f64) {}
    pub fn track_release_noop() {}
    pub fn track_teacher_login_success() {}
    pub fn track_teacher_login_failure(_reason: &str) {}
    pub fn set_queue_active(_pickups: usize, _students: usize) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
