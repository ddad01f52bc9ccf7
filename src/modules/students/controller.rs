use axum::{Json, extract::State};
use pickup_models::StudentEntry;
use tracing::instrument;

use crate::state::AppState;

/// Student roster with each student's teacher
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students, ordered by name", body = Vec<StudentEntry>)
    ),
    tag = "Directory"
)]
#[instrument(skip(state))]
pub async fn get_students(State(state): State<AppState>) -> Json<Vec<StudentEntry>> {
    let portal = state.portal.lock().await;
    Json(portal.dismissal.directory().students())
}
