use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};
use tracing::warn;

pub use crate::logging::is_observability_enabled;

const HTTP_DURATION_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

const WAIT_MINUTES_BUCKETS: &[f64] = &[0.5, 1.0, 2.0, 3.0, 5.0, 7.5, 10.0, 15.0, 20.0, 30.0];

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is disabled or a recorder is already
/// installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            HTTP_DURATION_BUCKETS,
        )
        .and_then(|b| {
            b.set_buckets_for_metric(
                Matcher::Full("pickup_wait_minutes".to_string()),
                WAIT_MINUTES_BUCKETS,
            )
        })
        .and_then(|b| b.install_recorder())
        .map_err(|e| warn!(error = %e, "Prometheus recorder not installed"))
        .ok()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status.to_string()).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    counter!("http_requests_by_status", "status_category" => status_category(status)).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

fn status_category(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Router for the metrics listener.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics

/// `assignment` is one of `single_teacher`, `mixed` or `unrecognized`.
pub fn track_check_in(assignment: &str, method: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("pickup_check_ins_total", "assignment" => assignment.to_string(), "method" => method.to_string()).increment(1);
}

pub fn track_release(wait_minutes: f64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("pickup_releases_total").increment(1);
    histogram!("pickup_wait_minutes").record(wait_minutes);
}

/// A release aimed at a position that was not in the queue.
pub fn track_release_noop() {
    if !is_observability_enabled() {
        return;
    }
    counter!("pickup_release_noops_total").increment(1);
}

pub fn track_teacher_login_success() {
    if !is_observability_enabled() {
        return;
    }
    counter!("teacher_logins_total", "status" => "success").increment(1);
}

pub fn track_teacher_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("teacher_logins_total", "status" => "failure", "reason" => reason.to_string()).increment(1);
}

pub fn set_queue_active(pickups: usize, students: usize) {
    if !is_observability_enabled() {
        return;
    }
    gauge!("pickup_queue_active", "unit" => "pickups").set(pickups as f64);
    gauge!("pickup_queue_active", "unit" => "students").set(students as f64);
}
