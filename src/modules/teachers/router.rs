use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    get_current_teacher, get_my_queue, get_my_students, get_teachers, login_teacher,
    logout_teacher,
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_teachers))
        .route("/logout", post(logout_teacher))
        .route("/me", get(get_current_teacher))
        .route("/me/queue", get(get_my_queue))
        .route("/me/students", get(get_my_students))
}

/// Kept separate so the login quota can be layered on this route alone.
pub fn init_teacher_login_router() -> Router<AppState> {
    Router::new().route("/login", post(login_teacher))
}
