use anyhow::anyhow;
use pickup_core::AppError;
use pickup_dismissal::{DismissalError, TeacherSession};
use pickup_models::{PickupRequest, StudentEntry, TeacherProfile};
use pickup_observability::{track_teacher_login_failure, track_teacher_login_success};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::Portal;

pub struct TeacherService;

impl TeacherService {
    /// Opens a portal session for `pin` and registers it under a new token.
    #[instrument(skip_all)]
    pub async fn login(
        portal: &Mutex<Portal>,
        pin: &str,
    ) -> Result<(Uuid, TeacherProfile), AppError> {
        let mut portal = portal.lock().await;
        let mut session = TeacherSession::new();

        let teacher = match portal.dismissal.login(&mut session, pin.trim()) {
            Ok(teacher) => teacher,
            Err(e @ DismissalError::InvalidCredential) => {
                track_teacher_login_failure("invalid_pin");
                return Err(AppError::unauthorized(e));
            }
            Err(e) => return Err(AppError::bad_request(e)),
        };

        let token = portal.open_session(session);
        track_teacher_login_success();

        info!(teacher = %teacher.display_name, sessions = portal.session_count(), "Portal session opened");
        Ok((token, teacher))
    }

    /// Ends the session behind `token`. Unknown tokens are ignored.
    pub async fn logout(portal: &Mutex<Portal>, token: Uuid) {
        let mut portal = portal.lock().await;
        if let Some(mut session) = portal.close_session(&token) {
            portal.dismissal.logout(&mut session);
        }
    }

    pub async fn my_queue(
        portal: &Mutex<Portal>,
        token: Uuid,
    ) -> Result<Vec<PickupRequest>, AppError> {
        let mut portal = portal.lock().await;
        let session = portal
            .session(&token)
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid or expired session")))?;
        Ok(portal.dismissal.my_queue(&session))
    }

    pub async fn my_students(portal: &Mutex<Portal>, display_name: &str) -> Vec<StudentEntry> {
        let portal = portal.lock().await;
        portal
            .dismissal
            .directory()
            .students_of(display_name)
            .into_iter()
            .map(|name| StudentEntry {
                name: name.to_string(),
                teacher: display_name.to_string(),
            })
            .collect()
    }
}
