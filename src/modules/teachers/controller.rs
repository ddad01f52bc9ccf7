use axum::{Json, extract::State, http::StatusCode};
use pickup_core::AppError;
use pickup_models::{
    PickupRequest, StudentEntry, TeacherLoginRequest, TeacherLoginResponse, TeacherSummary,
};
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthTeacher;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::TeacherService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Teachers in the directory, without their PINs
#[utoipa::path(
    get,
    path = "/api/teachers",
    responses(
        (status = 200, description = "All teachers", body = Vec<TeacherSummary>)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(State(state): State<AppState>) -> Json<Vec<TeacherSummary>> {
    let portal = state.portal.lock().await;
    Json(
        portal
            .dismissal
            .directory()
            .teachers()
            .map(TeacherSummary::from)
            .collect(),
    )
}

/// Log into the teacher portal with a PIN
#[utoipa::path(
    post,
    path = "/api/teachers/login",
    request_body = TeacherLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TeacherLoginResponse),
        (status = 401, description = "Invalid PIN", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Too many login attempts", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip_all)]
pub async fn login_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TeacherLoginRequest>,
) -> Result<Json<TeacherLoginResponse>, AppError> {
    let (token, teacher) = TeacherService::login(&state.portal, &dto.pin).await?;

    Ok(Json(TeacherLoginResponse {
        token,
        teacher: TeacherSummary::from(&teacher),
    }))
}

#[utoipa::path(
    post,
    path = "/api/teachers/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn logout_teacher(
    State(state): State<AppState>,
    auth_teacher: AuthTeacher,
) -> StatusCode {
    TeacherService::logout(&state.portal, auth_teacher.token).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/teachers/me",
    responses(
        (status = 200, description = "Signed-in teacher", body = TeacherSummary),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument]
pub async fn get_current_teacher(auth_teacher: AuthTeacher) -> Json<TeacherSummary> {
    Json(TeacherSummary::from(&auth_teacher.teacher))
}

/// Pickups assigned to the signed-in teacher's class
#[utoipa::path(
    get,
    path = "/api/teachers/me/queue",
    responses(
        (status = 200, description = "Waiting pickups for this class", body = Vec<PickupRequest>),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_queue(
    State(state): State<AppState>,
    auth_teacher: AuthTeacher,
) -> Result<Json<Vec<PickupRequest>>, AppError> {
    let queue = TeacherService::my_queue(&state.portal, auth_teacher.token).await?;
    Ok(Json(queue))
}

#[utoipa::path(
    get,
    path = "/api/teachers/me/students",
    responses(
        (status = 200, description = "Students in this class", body = Vec<StudentEntry>),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_students(
    State(state): State<AppState>,
    auth_teacher: AuthTeacher,
) -> Json<Vec<StudentEntry>> {
    Json(TeacherService::my_students(&state.portal, auth_teacher.display_name()).await)
}
