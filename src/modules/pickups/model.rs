use pickup_models::{PickupMethod, PickupRequest};
use serde::Deserialize;
use utoipa::IntoParams;

/// Optional filters for the queue listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PickupFilterParams {
    /// Assigned label: a teacher display name, "Mixed Classes" or "Unknown Teacher"
    pub teacher: Option<String>,
    pub pickup_method: Option<PickupMethod>,
}

impl PickupFilterParams {
    pub fn is_empty(&self) -> bool {
        self.teacher.is_none() && self.pickup_method.is_none()
    }

    pub fn matches(&self, request: &PickupRequest) -> bool {
        self.teacher
            .as_deref()
            .is_none_or(|t| request.assigned_teacher_label == t)
            && self
                .pickup_method
                .is_none_or(|m| request.pickup_method == m)
    }
}
