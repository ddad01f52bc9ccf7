use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pickup_core::AppError;
use pickup_dismissal::CheckIn;
use pickup_models::{CheckInRequest, PickupRequest};
use tracing::instrument;

use crate::middleware::auth::AuthTeacher;
use crate::modules::teachers::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::PickupFilterParams;
use super::service::PickupService;

/// Parent check-in: joins the queue and is assigned to a teacher
#[utoipa::path(
    post,
    path = "/api/pickups/check-in",
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Pickup queued", body = PickupRequest),
        (status = 400, description = "Missing parent name, students or pickup method", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Pickups"
)]
#[instrument(skip(state))]
pub async fn check_in_pickup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CheckInRequest>,
) -> Result<(StatusCode, Json<PickupRequest>), AppError> {
    let check_in = CheckIn::try_from(dto).map_err(AppError::bad_request)?;
    let request = PickupService::check_in(&state.portal, check_in).await;

    Ok((StatusCode::CREATED, Json(request)))
}

/// Current queue in position order
#[utoipa::path(
    get,
    path = "/api/pickups",
    params(PickupFilterParams),
    responses(
        (status = 200, description = "Waiting pickups", body = Vec<PickupRequest>)
    ),
    tag = "Pickups"
)]
#[instrument(skip(state))]
pub async fn get_pickups(
    State(state): State<AppState>,
    Query(filters): Query<PickupFilterParams>,
) -> Json<Vec<PickupRequest>> {
    Json(PickupService::get_pickups(&state.portal, &filters).await)
}

#[utoipa::path(
    get,
    path = "/api/pickups/{position}",
    params(
        ("position" = u32, Path, description = "Queue position")
    ),
    responses(
        (status = 200, description = "Pickup details", body = PickupRequest),
        (status = 404, description = "Position not in queue", body = ErrorResponse)
    ),
    tag = "Pickups"
)]
#[instrument(skip(state))]
pub async fn get_pickup(
    State(state): State<AppState>,
    Path(position): Path<u32>,
) -> Result<Json<PickupRequest>, AppError> {
    let request = PickupService::get_pickup(&state.portal, position).await?;
    Ok(Json(request))
}

/// Release the students for a queue position to their parent
#[utoipa::path(
    post,
    path = "/api/pickups/{position}/release",
    params(
        ("position" = u32, Path, description = "Queue position")
    ),
    responses(
        (status = 200, description = "Pickup released", body = PickupRequest),
        (status = 401, description = "Teacher login required", body = ErrorResponse),
        (status = 403, description = "Pickup belongs to another teacher's class", body = ErrorResponse),
        (status = 404, description = "Position not in queue", body = ErrorResponse)
    ),
    tag = "Pickups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn release_pickup(
    State(state): State<AppState>,
    auth_teacher: AuthTeacher,
    Path(position): Path<u32>,
) -> Result<Json<PickupRequest>, AppError> {
    let request = PickupService::release(&state.portal, position, &auth_teacher.teacher).await?;
    Ok(Json(request))
}
