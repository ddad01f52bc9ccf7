use axum::{
    Json,
    extract::{Query, State},
};
use pickup_models::ActivityEntry;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityParams {
    /// Return at most this many of the newest entries
    pub limit: Option<usize>,
}

/// Recent activity, newest first
#[utoipa::path(
    get,
    path = "/api/activity",
    params(ActivityParams),
    responses(
        (status = 200, description = "Activity feed (at most 20 entries)", body = Vec<ActivityEntry>)
    ),
    tag = "Activity"
)]
#[instrument(skip(state))]
pub async fn get_activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityParams>,
) -> Json<Vec<ActivityEntry>> {
    let mut entries = state.portal.lock().await.dismissal.activity();
    if let Some(limit) = params.limit {
        entries.truncate(limit);
    }
    Json(entries)
}
