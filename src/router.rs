use crate::docs::ApiDoc;
use crate::middleware::rate_limit::{general_rejection, login_rejection};
use crate::modules::activity::init_activity_router;
use crate::modules::health::init_health_router;
use crate::modules::pickups::init_pickups_router;
use crate::modules::stats::init_stats_router;
use crate::modules::students::init_students_router;
use crate::modules::teachers::{init_teacher_login_router, init_teachers_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use pickup_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use tower_governor::GovernorLayer;
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/health", init_health_router())
                .nest(
                    "/teachers",
                    init_teachers_router().merge(init_teacher_login_router().route_layer(
                        GovernorLayer::new(state.login_governor.clone())
                            .error_handler(login_rejection),
                    )),
                )
                .nest("/students", init_students_router())
                .nest("/pickups", init_pickups_router())
                .nest("/activity", init_activity_router())
                .nest("/stats", init_stats_router())
                .route_layer(
                    GovernorLayer::new(state.general_governor.clone())
                        .error_handler(general_rejection),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
