use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{check_in_pickup, get_pickup, get_pickups, release_pickup};

pub fn init_pickups_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_pickups))
        .route("/check-in", post(check_in_pickup))
        .route("/{position}", get(get_pickup))
        .route("/{position}/release", post(release_pickup))
}
