//! Ordered store of waiting pickup requests.

use chrono::Duration;
use pickup_config::QueueNumbering;
use pickup_core::SharedClock;
use pickup_models::{CheckInRequest, PickupMethod, PickupRequest, PickupStatus};
use tracing::{debug, instrument};

use crate::activity::ActivityLog;
use crate::directory::Directory;
use crate::error::DismissalError;
use crate::roster::{Assignment, resolve_assignment};
use crate::tickets::TicketIssuer;

/// A validated check-in: trimmed, non-empty requester and at least one
/// non-blank student name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    requester_name: String,
    student_names: Vec<String>,
    pickup_method: PickupMethod,
}

impl CheckIn {
    pub fn new<I, S>(
        requester_name: impl AsRef<str>,
        student_names: I,
        pickup_method: PickupMethod,
    ) -> Result<Self, DismissalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requester_name = requester_name.as_ref().trim();
        if requester_name.is_empty() {
            return Err(DismissalError::MissingRequester);
        }

        let student_names: Vec<String> = student_names
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if student_names.is_empty() {
            return Err(DismissalError::NoStudents);
        }

        Ok(Self {
            requester_name: requester_name.to_string(),
            student_names,
            pickup_method,
        })
    }

    /// Like [`CheckIn::new`] with the pickup method given as free text
    /// (`car_line`, `Walk Up`, ...).
    pub fn parse<I, S>(
        requester_name: impl AsRef<str>,
        student_names: I,
        pickup_method: &str,
    ) -> Result<Self, DismissalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let method = pickup_method
            .parse()
            .map_err(DismissalError::UnknownPickupMethod)?;
        Self::new(requester_name, student_names, method)
    }

    pub fn requester_name(&self) -> &str {
        &self.requester_name
    }

    pub fn student_names(&self) -> &[String] {
        &self.student_names
    }

    pub fn pickup_method(&self) -> PickupMethod {
        self.pickup_method
    }
}

impl TryFrom<CheckInRequest> for CheckIn {
    type Error = DismissalError;

    fn try_from(dto: CheckInRequest) -> Result<Self, Self::Error> {
        Self::new(dto.parent_name, dto.students, dto.pickup_method)
    }
}

pub struct QueueLedger {
    requests: Vec<PickupRequest>,
    numbering: QueueNumbering,
    last_issued: u32,
    completed: usize,
    total_wait: Duration,
    clock: SharedClock,
    tickets: Box<dyn TicketIssuer>,
}

impl QueueLedger {
    pub fn new(
        numbering: QueueNumbering,
        clock: SharedClock,
        tickets: Box<dyn TicketIssuer>,
    ) -> Self {
        Self {
            requests: Vec::new(),
            numbering,
            last_issued: 0,
            completed: 0,
            total_wait: Duration::zero(),
            clock,
            tickets,
        }
    }

    fn allocate_position(&mut self) -> u32 {
        match self.numbering {
            QueueNumbering::Monotonic => {
                self.last_issued += 1;
                self.last_issued
            }
            QueueNumbering::QueueLength => {
                let position = self.requests.len() as u32 + 1;
                self.last_issued = self.last_issued.max(position);
                position
            }
        }
    }

    /// Queues a check-in and narrates it in `log`.
    ///
    /// Emits, in order: the arrival confirmation, the queue-join message and
    /// the assignment message. The assigned label is fixed here and never
    /// recomputed.
    #[instrument(skip_all, fields(requester = %check_in.requester_name))]
    pub fn submit(
        &mut self,
        check_in: CheckIn,
        directory: &Directory,
        log: &mut ActivityLog,
    ) -> PickupRequest {
        let position = self.allocate_position();
        let assignment = resolve_assignment(directory, &check_in.student_names);
        let now = self.clock.now();

        let request = PickupRequest {
            queue_position: position,
            ticket: self.tickets.issue(now),
            requester_name: check_in.requester_name,
            student_names: check_in.student_names,
            pickup_method: check_in.pickup_method,
            status: PickupStatus::Waiting,
            assigned_teacher_label: assignment.label().to_string(),
            checked_in_at: now,
            released_at: None,
        };
        self.requests.push(request.clone());

        log.append(format!(
            "Parent {} confirmed arrival at school",
            request.requester_name
        ));
        log.append(format!(
            "{} joined queue #{} for {} ({})",
            request.requester_name,
            position,
            request.students_text(),
            request.pickup_method
        ));
        log.append(match &assignment {
            Assignment::SingleTeacher(teacher) => {
                format!("Queue #{position} assigned to {teacher}'s class")
            }
            Assignment::Mixed => format!("Queue #{position} contains students from multiple classes"),
            Assignment::Unrecognized => format!("Queue #{position} contains unrecognized students"),
        });

        debug!(
            position,
            assignment = assignment.kind(),
            ticket = %request.ticket,
            "Pickup queued"
        );
        request
    }

    /// Removes the request at `position` and narrates the release.
    ///
    /// An absent position is a silent no-op: nothing changes and nothing is
    /// logged. When positions repeat (queue-length numbering) only the
    /// earliest matching request is released; later duplicates stay queued.
    #[instrument(skip(self, log))]
    pub fn release(&mut self, position: u32, log: &mut ActivityLog) -> Option<PickupRequest> {
        let Some(index) = self
            .requests
            .iter()
            .position(|r| r.queue_position == position)
        else {
            debug!(position, "Release ignored, position not in queue");
            return None;
        };

        let mut request = self.requests.remove(index);
        let now = self.clock.now();
        let wait = (now - request.checked_in_at).max(Duration::zero());
        request.status = PickupStatus::Released;
        request.released_at = Some(now);

        self.completed += 1;
        self.total_wait += wait;

        log.append(format!(
            "{} released {} to parent {}",
            request.assigned_teacher_label,
            request.students_text(),
            request.requester_name
        ));
        log.append(format!(
            "Queue #{} pickup completed ({:.1} min wait time)",
            position,
            minutes(wait)
        ));

        Some(request)
    }

    pub fn get(&self, position: u32) -> Option<&PickupRequest> {
        self.requests.iter().find(|r| r.queue_position == position)
    }

    /// Waiting requests matching `predicate`, in queue order.
    pub fn query<F>(&self, predicate: F) -> Vec<PickupRequest>
    where
        F: Fn(&PickupRequest) -> bool,
    {
        self.requests.iter().filter(|r| predicate(r)).cloned().collect()
    }

    pub fn query_by_teacher(&self, display_name: &str) -> Vec<PickupRequest> {
        self.query(|r| r.assigned_teacher_label == display_name)
    }

    pub fn snapshot(&self) -> Vec<PickupRequest> {
        self.requests.clone()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn total_active_student_count(&self) -> usize {
        self.requests.iter().map(|r| r.student_names.len()).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn average_wait_minutes(&self) -> Option<f64> {
        if self.completed == 0 {
            return None;
        }
        Some(minutes(self.total_wait) / self.completed as f64)
    }
}

fn minutes(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 60_000.0
}

impl std::fmt::Debug for QueueLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueLedger")
            .field("requests", &self.requests)
            .field("numbering", &self.numbering)
            .field("last_issued", &self.last_issued)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}
