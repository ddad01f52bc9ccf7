use axum::{Json, extract::State};
use pickup_models::DismissalStats;
use tracing::instrument;

use crate::state::AppState;

/// Queue and enrollment counts for the dashboard
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Current dismissal statistics", body = DismissalStats)
    ),
    tag = "Activity"
)]
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Json<DismissalStats> {
    Json(state.portal.lock().await.dismissal.stats())
}
