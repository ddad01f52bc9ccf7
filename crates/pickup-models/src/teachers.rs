//! Teacher profiles and portal login DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A teacher as known to the directory.
///
/// The credential is the PIN typed into the teacher portal. It is never
/// serialized; API responses use [`TeacherSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherProfile {
    pub credential: String,
    pub display_name: String,
    pub grade_label: String,
    pub room_label: String,
}

impl TeacherProfile {
    pub fn new(
        credential: impl Into<String>,
        display_name: impl Into<String>,
        grade_label: impl Into<String>,
        room_label: impl Into<String>,
    ) -> Self {
        Self {
            credential: credential.into(),
            display_name: display_name.into(),
            grade_label: grade_label.into(),
            room_label: room_label.into(),
        }
    }
}

/// Public view of a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeacherSummary {
    pub name: String,
    pub grade: String,
    pub room: String,
}

impl From<&TeacherProfile> for TeacherSummary {
    fn from(profile: &TeacherProfile) -> Self {
        Self {
            name: profile.display_name.clone(),
            grade: profile.grade_label.clone(),
            room: profile.room_label.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TeacherLoginRequest {
    #[validate(length(min = 1, max = 32, message = "pin is required"))]
    pub pin: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeacherLoginResponse {
    /// Bearer token for the teacher portal session
    pub token: Uuid,
    pub teacher: TeacherSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hides_credential() {
        let profile = TeacherProfile::new("3333", "Mrs. Johnson", "3rd Grade", "Room 2A");
        let json = serde_json::to_value(TeacherSummary::from(&profile)).unwrap();
        assert_eq!(json["name"], "Mrs. Johnson");
        assert_eq!(json["grade"], "3rd Grade");
        assert_eq!(json["room"], "Room 2A");
        assert!(!json.to_string().contains("3333"));
    }

    #[test]
    fn test_login_request_validation() {
        let ok = TeacherLoginRequest {
            pin: "3333".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = TeacherLoginRequest { pin: String::new() };
        assert!(empty.validate().is_err());
    }
}
