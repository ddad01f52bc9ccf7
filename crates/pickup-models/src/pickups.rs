//! Pickup requests and the check-in DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

/// Label given to a request whose students belong to different teachers.
pub const MIXED_CLASSES_LABEL: &str = "Mixed Classes";

/// Label given to a request whose first student is not in the directory.
pub const UNKNOWN_TEACHER_LABEL: &str = "Unknown Teacher";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PickupMethod {
    #[serde(alias = "carline", alias = "Car Line")]
    CarLine,
    #[serde(alias = "walkup", alias = "Walk Up")]
    WalkUp,
}

impl PickupMethod {
    pub fn label(self) -> &'static str {
        match self {
            Self::CarLine => "Car Line",
            Self::WalkUp => "Walk Up",
        }
    }
}

impl fmt::Display for PickupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PickupMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "carline" | "car" => Ok(Self::CarLine),
            "walkup" | "walk" => Ok(Self::WalkUp),
            _ => Err(s.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    Waiting,
    Released,
}

/// A parent's request to collect one or more students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PickupRequest {
    pub queue_position: u32,
    /// Short code shown to the parent, e.g. `P-247`
    pub ticket: String,
    pub requester_name: String,
    pub student_names: Vec<String>,
    pub pickup_method: PickupMethod,
    pub status: PickupStatus,
    /// Teacher display name, "Mixed Classes" or "Unknown Teacher"
    pub assigned_teacher_label: String,
    pub checked_in_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
}

impl PickupRequest {
    /// Student names as written in activity messages: comma separated.
    pub fn students_text(&self) -> String {
        self.student_names.join(", ")
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 100, message = "parent_name is required"))]
    pub parent_name: String,
    #[validate(length(min = 1, max = 12, message = "between 1 and 12 students are required"))]
    pub students: Vec<String>,
    pub pickup_method: PickupMethod,
}
