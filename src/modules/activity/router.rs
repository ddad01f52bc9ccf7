use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_activity;

pub fn init_activity_router() -> Router<AppState> {
    Router::new().route("/", get(get_activity))
}
