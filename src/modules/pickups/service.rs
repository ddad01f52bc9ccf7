use anyhow::anyhow;
use pickup_core::AppError;
use pickup_dismissal::{CheckIn, Dismissal, DismissalError, assignment_kind};
use pickup_models::{PickupRequest, TeacherProfile};
use pickup_observability::{set_queue_active, track_check_in, track_release, track_release_noop};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::state::Portal;

use super::model::PickupFilterParams;

pub struct PickupService;

fn record_queue(dismissal: &Dismissal) {
    let ledger = dismissal.ledger();
    set_queue_active(ledger.len(), ledger.total_active_student_count());
}

impl PickupService {
    #[instrument(skip(portal))]
    pub async fn check_in(portal: &Mutex<Portal>, check_in: CheckIn) -> PickupRequest {
        let mut portal = portal.lock().await;
        let request = portal.dismissal.check_in(check_in);

        track_check_in(
            assignment_kind(&request.assigned_teacher_label),
            request.pickup_method.label(),
        );
        record_queue(&portal.dismissal);

        info!(
            position = request.queue_position,
            ticket = %request.ticket,
            assigned = %request.assigned_teacher_label,
            "Parent checked in"
        );
        request
    }

    pub async fn get_pickups(
        portal: &Mutex<Portal>,
        filters: &PickupFilterParams,
    ) -> Vec<PickupRequest> {
        let portal = portal.lock().await;
        if filters.is_empty() {
            return portal.dismissal.queue();
        }
        portal.dismissal.ledger().query(|r| filters.matches(r))
    }

    pub async fn get_pickup(portal: &Mutex<Portal>, position: u32) -> Result<PickupRequest, AppError> {
        let portal = portal.lock().await;
        portal
            .dismissal
            .pickup(position)
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow!("Queue position {position} not found")))
    }

    /// Releases `position` for `teacher`. An absent position leaves the queue
    /// and the feed untouched and surfaces as 404; another class's pickup is
    /// refused with 403.
    #[instrument(skip(portal, teacher), fields(teacher = %teacher.display_name))]
    pub async fn release(
        portal: &Mutex<Portal>,
        position: u32,
        teacher: &TeacherProfile,
    ) -> Result<PickupRequest, AppError> {
        let mut portal = portal.lock().await;

        let request = match portal.dismissal.release_as(position, teacher) {
            Ok(Some(request)) => request,
            Ok(None) => {
                track_release_noop();
                return Err(AppError::not_found(anyhow!(
                    "Queue position {position} not found"
                )));
            }
            Err(e @ DismissalError::NotAssignedTeacher { .. }) => {
                return Err(AppError::forbidden(e));
            }
            Err(e) => return Err(AppError::bad_request(e)),
        };

        if let Some(released_at) = request.released_at {
            let wait = released_at - request.checked_in_at;
            track_release(wait.num_milliseconds() as f64 / 60_000.0);
        }
        record_queue(&portal.dismissal);

        info!(position, "Pickup released");
        Ok(request)
    }
}
