use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use pickup_core::AppError;
use pickup_models::TeacherProfile;
use uuid::Uuid;

use crate::state::AppState;

/// Extractor for routes that need a signed-in teacher.
#[derive(Clone)]
pub struct AuthTeacher {
    pub token: Uuid,
    pub teacher: TeacherProfile,
}

// Spans record extractor arguments; keep the PIN and token out of them.
impl std::fmt::Debug for AuthTeacher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTeacher")
            .field("teacher", &self.teacher.display_name)
            .finish_non_exhaustive()
    }
}

impl AuthTeacher {
    pub fn display_name(&self) -> &str {
        &self.teacher.display_name
    }
}

/// Parses `Authorization: Bearer <uuid>`.
pub fn bearer_token(parts: &Parts) -> Result<Uuid, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

    Uuid::parse_str(token.trim())
        .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired session")))
}

impl FromRequestParts<AppState> for AuthTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let mut portal = state.portal.lock().await;
        let teacher = portal
            .session(&token)
            .and_then(|session| session.teacher())
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid or expired session")))?;

        Ok(AuthTeacher { token, teacher })
    }
}
