use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use pickup_models::{
    ActivityEntry, CheckInRequest, DismissalStats, PickupMethod, PickupRequest, PickupStatus,
    StudentEntry, TeacherLoginRequest, TeacherLoginResponse, TeacherSummary,
};

use crate::modules::health::controller::HealthResponse;
use crate::modules::teachers::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::pickups::controller::check_in_pickup,
        crate::modules::pickups::controller::get_pickups,
        crate::modules::pickups::controller::get_pickup,
        crate::modules::pickups::controller::release_pickup,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::login_teacher,
        crate::modules::teachers::controller::logout_teacher,
        crate::modules::teachers::controller::get_current_teacher,
        crate::modules::teachers::controller::get_my_queue,
        crate::modules::teachers::controller::get_my_students,
        crate::modules::students::controller::get_students,
        crate::modules::activity::controller::get_activity,
        crate::modules::stats::controller::get_stats,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            CheckInRequest,
            PickupMethod,
            PickupStatus,
            PickupRequest,
            TeacherSummary,
            TeacherLoginRequest,
            TeacherLoginResponse,
            StudentEntry,
            ActivityEntry,
            DismissalStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Pickups", description = "Parent check-in and the pickup queue"),
        (name = "Teachers", description = "Teacher portal sessions and class queues"),
        (name = "Directory", description = "Student roster"),
        (name = "Activity", description = "Activity feed and dismissal statistics")
    ),
    info(
        title = "Pickup API",
        version = "0.1.0",
        description = "End-of-day student pickup coordination: parent check-in, teacher assignment and release.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .build(),
                ),
            )
        }
    }
}
