//! Per-peer request quotas backed by `tower_governor`.
//!
//! Keys come from the connection's peer address, so the router must be
//! served with `into_make_service_with_connect_info::<SocketAddr>()`.
//! Rejections use the same `{"error": ...}` body as every other failure.

use anyhow::anyhow;
use axum::{
    body::Body,
    http::{HeaderValue, Response, header},
    response::IntoResponse,
};
use pickup_core::AppError;
use std::time::Duration;
use tower_governor::GovernorError;
use tracing::{debug, warn};

use crate::state::AppState;

/// How often idle limiter keys are dropped.
pub const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

fn rejection(error: GovernorError, message: &'static str) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, .. } => {
            warn!(wait_time, "Rate limit exceeded");
            let mut response = AppError::too_many_requests(anyhow!(message)).into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(wait_time));
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::internal(anyhow!("Client address unavailable")).into_response()
        }
        other => AppError::internal(other).into_response(),
    }
}

/// Rejection for the API-wide quota.
pub fn general_rejection(error: GovernorError) -> Response<Body> {
    rejection(error, "Too many requests, slow down")
}

/// Rejection for the teacher login quota.
pub fn login_rejection(error: GovernorError) -> Response<Body> {
    rejection(error, "Too many login attempts, try again later")
}

/// Drops limiter state for peers whose quota has fully replenished.
pub fn prune_limiters(state: &AppState) {
    for config in [&state.general_governor, &state.login_governor] {
        let limiter = config.limiter();
        limiter.retain_recent();
        limiter.shrink_to_fit();
    }
    debug!(
        general = state.general_governor.limiter().len(),
        login = state.login_governor.limiter().len(),
        "Rate limiter keys pruned"
    );
}

/// Runs [`prune_limiters`] every [`LIMITER_CLEANUP_INTERVAL`].
pub fn spawn_limiter_cleanup(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_CLEANUP_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            prune_limiters(&state);
        }
    })
}
