use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counters for the operator view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DismissalStats {
    /// Requests currently waiting in the queue
    pub active_pickups: usize,
    /// Students named across all waiting requests
    pub active_students: usize,
    /// Configured enrollment figure
    pub total_enrollment: u32,
    /// Enrollment minus students in the active queue, never negative
    pub students_remaining: u32,
    /// Requests released so far this session
    pub completed_pickups: usize,
    /// Mean wait between check-in and release, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_wait_minutes: Option<f64>,
}
