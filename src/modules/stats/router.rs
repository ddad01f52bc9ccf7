use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_stats;

pub fn init_stats_router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}
