//! The dismissal context: one directory, one ledger and one activity feed
//! sharing a clock.

use pickup_config::{DEFAULT_TOTAL_ENROLLMENT, DismissalConfig, QueueNumbering};
use chrono::{DateTime, Utc};
use pickup_core::{SharedClock, SystemClock};
use pickup_models::{ActivityEntry, DismissalStats, PickupRequest, TeacherProfile};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::activity::ActivityLog;
use crate::directory::Directory;
use crate::error::DismissalError;
use crate::ledger::{CheckIn, QueueLedger};
use crate::roster::may_release;
use crate::sample::DEMO_PICKUPS;
use crate::session::TeacherSession;
use crate::tickets::{RandomTicketIssuer, TicketIssuer};

pub struct Dismissal {
    directory: Directory,
    ledger: QueueLedger,
    activity: ActivityLog,
    total_enrollment: u32,
    clock: SharedClock,
}

impl std::fmt::Debug for Dismissal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dismissal")
            .field("directory", &self.directory)
            .field("ledger", &self.ledger)
            .field("activity", &self.activity)
            .field("total_enrollment", &self.total_enrollment)
            .finish_non_exhaustive()
    }
}

pub struct DismissalBuilder {
    directory: Directory,
    clock: Option<SharedClock>,
    ticket_issuer: Option<Box<dyn TicketIssuer>>,
    queue_numbering: QueueNumbering,
    total_enrollment: u32,
}

impl DismissalBuilder {
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn ticket_issuer(mut self, issuer: impl TicketIssuer + 'static) -> Self {
        self.ticket_issuer = Some(Box::new(issuer));
        self
    }

    pub fn queue_numbering(mut self, numbering: QueueNumbering) -> Self {
        self.queue_numbering = numbering;
        self
    }

    pub fn total_enrollment(mut self, total: u32) -> Self {
        self.total_enrollment = total;
        self
    }

    pub fn build(self) -> Dismissal {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let tickets = self
            .ticket_issuer
            .unwrap_or_else(|| Box::new(RandomTicketIssuer::new()));

        Dismissal {
            directory: self.directory,
            ledger: QueueLedger::new(self.queue_numbering, clock.clone(), tickets),
            activity: ActivityLog::new(clock.clone()),
            total_enrollment: self.total_enrollment,
            clock,
        }
    }
}

impl Dismissal {
    pub fn builder(directory: Directory) -> DismissalBuilder {
        DismissalBuilder {
            directory,
            clock: None,
            ticket_issuer: None,
            queue_numbering: QueueNumbering::default(),
            total_enrollment: DEFAULT_TOTAL_ENROLLMENT,
        }
    }

    /// Builds a dismissal from environment-derived configuration, loading the
    /// directory file (or the sample fallback) and seeding the demo queue
    /// when requested.
    #[instrument(skip_all)]
    pub fn from_config(config: &DismissalConfig) -> Self {
        let directory = Directory::load_or_fallback(config.directory_path.as_deref());
        let mut dismissal = Self::builder(directory)
            .queue_numbering(config.queue_numbering)
            .total_enrollment(config.total_enrollment)
            .build();

        if config.seed_demo_queue {
            dismissal.seed_demo_queue();
        }

        info!(
            teachers = dismissal.directory.teacher_count(),
            students = dismissal.directory.student_count(),
            numbering = ?config.queue_numbering,
            total_enrollment = config.total_enrollment,
            "Dismissal ready"
        );
        dismissal
    }

    pub fn check_in(&mut self, check_in: CheckIn) -> PickupRequest {
        self.ledger
            .submit(check_in, &self.directory, &mut self.activity)
    }

    pub fn release(&mut self, position: u32) -> Option<PickupRequest> {
        self.ledger.release(position, &mut self.activity)
    }

    /// Releases `position` on behalf of `teacher`.
    ///
    /// `Ok(None)` when the position is not queued. A request assigned to a
    /// different teacher's class is refused with
    /// [`DismissalError::NotAssignedTeacher`] and nothing changes.
    pub fn release_as(
        &mut self,
        position: u32,
        teacher: &TeacherProfile,
    ) -> Result<Option<PickupRequest>, DismissalError> {
        let Some(request) = self.ledger.get(position) else {
            return Ok(None);
        };

        if !may_release(&request.assigned_teacher_label, &teacher.display_name) {
            warn!(
                position,
                teacher = %teacher.display_name,
                assigned = %request.assigned_teacher_label,
                "Release refused, pickup belongs to another class"
            );
            return Err(DismissalError::NotAssignedTeacher {
                position,
                assigned: request.assigned_teacher_label.clone(),
            });
        }

        Ok(self.release(position))
    }

    pub fn login(
        &mut self,
        session: &mut TeacherSession,
        credential: &str,
    ) -> Result<TeacherProfile, DismissalError> {
        session
            .login(credential, &self.directory, &mut self.activity)
            .cloned()
    }

    pub fn logout(&mut self, session: &mut TeacherSession) {
        session.logout(&mut self.activity);
    }

    pub fn my_queue(&self, session: &TeacherSession) -> Vec<PickupRequest> {
        session.my_queue(&self.ledger)
    }

    pub fn queue(&self) -> Vec<PickupRequest> {
        self.ledger.snapshot()
    }

    pub fn pickup(&self, position: u32) -> Option<&PickupRequest> {
        self.ledger.get(position)
    }

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.activity.list()
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn ledger(&self) -> &QueueLedger {
        &self.ledger
    }

    /// Current time on the dismissal's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn stats(&self) -> DismissalStats {
        let active_students = self.ledger.total_active_student_count();
        let active = u32::try_from(active_students).unwrap_or(u32::MAX);

        DismissalStats {
            active_pickups: self.ledger.len(),
            active_students,
            total_enrollment: self.total_enrollment,
            students_remaining: self.total_enrollment.saturating_sub(active),
            completed_pickups: self.ledger.completed_count(),
            average_wait_minutes: self.ledger.average_wait_minutes(),
        }
    }

    /// Queues the three reference pickups used for demos.
    pub fn seed_demo_queue(&mut self) -> Vec<PickupRequest> {
        DEMO_PICKUPS
            .iter()
            .filter_map(|(requester, students, method)| {
                CheckIn::new(requester, students.iter(), *method).ok()
            })
            .map(|check_in| self.check_in(check_in))
            .collect()
    }

    /// Ends the day, returning the final statistics.
    pub fn close(self) -> DismissalStats {
        let stats = self.stats();
        info!(
            completed = stats.completed_pickups,
            still_waiting = stats.active_pickups,
            average_wait_minutes = stats.average_wait_minutes.unwrap_or_default(),
            "Dismissal closed"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickup_core::{Clock, ManualClock};
    use pickup_models::{PickupMethod, PickupStatus};

    fn dismissal() -> (Dismissal, ManualClock) {
        let clock = ManualClock::default();
        let dismissal = Dismissal::builder(Directory::sample())
            .clock(Arc::new(clock.clone()))
            .ticket_issuer(RandomTicketIssuer::seeded(11))
            .build();
        (dismissal, clock)
    }

    fn check_in(requester: &str, students: &[&str], method: PickupMethod) -> CheckIn {
        CheckIn::new(requester, students.iter(), method).unwrap()
    }

    fn messages(dismissal: &Dismissal) -> Vec<String> {
        dismissal.activity().into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_single_teacher_check_in_scenario() {
        let (mut d, _) = dismissal();
        let request = d.check_in(check_in("Sarah Johnson", &["Emma Rodriguez"], PickupMethod::CarLine));

        assert_eq!(request.queue_position, 1);
        assert_eq!(request.assigned_teacher_label, "Mrs. Johnson");
        assert_eq!(
            messages(&d)[..2],
            [
                "Queue #1 assigned to Mrs. Johnson's class".to_string(),
                "Sarah Johnson joined queue #1 for Emma Rodriguez (Car Line)".to_string(),
            ]
        );
    }

    #[test]
    fn test_sibling_walk_up_scenario() {
        let (mut d, _) = dismissal();
        let request = d.check_in(check_in(
            "Michael Chen",
            &["Liam Chen", "Sophie Chen"],
            PickupMethod::WalkUp,
        ));
        assert_eq!(request.assigned_teacher_label, "Mr. Williams");
        assert!(messages(&d).contains(
            &"Michael Chen joined queue #1 for Liam Chen, Sophie Chen (Walk Up)".to_string()
        ));
    }

    #[test]
    fn test_mixed_and_unknown_scenarios() {
        let (mut d, _) = dismissal();
        let mixed = d.check_in(check_in("Pat", &["Ryan Lee", "Emma Davis"], PickupMethod::CarLine));
        let unknown = d.check_in(check_in("X", &["NotARealStudent"], PickupMethod::WalkUp));

        assert_eq!(mixed.assigned_teacher_label, "Mixed Classes");
        assert_eq!(unknown.assigned_teacher_label, "Unknown Teacher");
        assert_eq!(unknown.queue_position, 2);
    }

    #[test]
    fn test_teacher_release_scenario() {
        let (mut d, clock) = dismissal();
        d.check_in(check_in("Sarah Johnson", &["Emma Rodriguez"], PickupMethod::CarLine));

        let mut session = TeacherSession::new();
        let teacher = d.login(&mut session, "3333").unwrap();
        assert_eq!(teacher.display_name, "Mrs. Johnson");
        assert_eq!(d.my_queue(&session).len(), 1);

        clock.advance_minutes(4);
        let released = d.release(1).unwrap();
        assert_eq!(released.status, PickupStatus::Released);
        assert!(d.my_queue(&session).is_empty());

        let feed = messages(&d);
        assert_eq!(feed[0], "Queue #1 pickup completed (4.0 min wait time)");
        assert_eq!(
            feed[1],
            "Mrs. Johnson released Emma Rodriguez to parent Sarah Johnson"
        );
    }

    #[test]
    fn test_release_as_other_teacher_is_refused() {
        let (mut d, _) = dismissal();
        d.check_in(check_in("Sarah Johnson", &["Emma Rodriguez"], PickupMethod::CarLine));
        let brown = d.directory().teacher_by_credential("1111").unwrap().clone();
        let before = d.activity();

        let err = d.release_as(1, &brown).unwrap_err();
        assert!(matches!(
            err,
            DismissalError::NotAssignedTeacher { position: 1, ref assigned } if assigned == "Mrs. Johnson"
        ));
        assert_eq!(d.queue().len(), 1);
        assert_eq!(d.activity(), before);
        assert_eq!(d.stats().completed_pickups, 0);
    }

    #[test]
    fn test_release_as_own_and_unowned_requests() {
        let (mut d, clock) = dismissal();
        d.check_in(check_in("Sarah Johnson", &["Emma Rodriguez"], PickupMethod::CarLine));
        d.check_in(check_in("Pat", &["Ryan Lee", "Emma Davis"], PickupMethod::WalkUp));
        d.check_in(check_in("X", &["NotARealStudent"], PickupMethod::WalkUp));
        let johnson = d.directory().teacher_by_credential("3333").unwrap().clone();
        let brown = d.directory().teacher_by_credential("1111").unwrap().clone();

        clock.advance_minutes(2);
        let own = d.release_as(1, &johnson).unwrap().unwrap();
        assert_eq!(own.released_at, Some(clock.now()));
        assert!(d.release_as(2, &brown).unwrap().is_some());
        assert!(d.release_as(3, &brown).unwrap().is_some());
        assert!(d.queue().is_empty());
    }

    #[test]
    fn test_release_as_with_shared_queue_length_number() {
        let clock = ManualClock::default();
        let mut d = Dismissal::builder(Directory::sample())
            .clock(Arc::new(clock))
            .ticket_issuer(RandomTicketIssuer::seeded(11))
            .queue_numbering(QueueNumbering::QueueLength)
            .build();
        d.check_in(check_in("A", &["Ava Wilson"], PickupMethod::CarLine));
        d.check_in(check_in("B", &["Emma Rodriguez"], PickupMethod::CarLine));
        d.release(1).unwrap();
        // #2 is now held by B (Mrs. Johnson) and C (Mr. Brown).
        d.check_in(check_in("C", &["Emma Davis"], PickupMethod::CarLine));

        let brown = d.directory().teacher_by_credential("1111").unwrap().clone();
        let johnson = d.directory().teacher_by_credential("3333").unwrap().clone();

        assert!(d.release_as(2, &brown).is_err());
        let released = d.release_as(2, &johnson).unwrap().unwrap();
        assert_eq!(released.requester_name, "B");
        assert_eq!(d.pickup(2).unwrap().requester_name, "C");
        assert_eq!(d.release_as(2, &brown).unwrap().unwrap().requester_name, "C");
    }

    #[test]
    fn test_now_follows_the_shared_clock() {
        let (d, clock) = dismissal();
        clock.advance_minutes(30);
        assert_eq!(d.now(), clock.now());
    }

    #[test]
    fn test_release_as_missing_position() {
        let (mut d, _) = dismissal();
        let brown = d.directory().teacher_by_credential("1111").unwrap().clone();
        assert!(d.release_as(5, &brown).unwrap().is_none());
        assert!(d.activity().is_empty());
    }

    #[test]
    fn test_invalid_login_leaves_state_unchanged() {
        let (mut d, _) = dismissal();
        let mut session = TeacherSession::new();

        assert!(matches!(
            d.login(&mut session, "0000"),
            Err(DismissalError::InvalidCredential)
        ));
        assert!(!session.is_authenticated());
        assert!(d.activity().is_empty());
    }

    #[test]
    fn test_logout_scenario() {
        let (mut d, _) = dismissal();
        let mut session = TeacherSession::new();
        d.login(&mut session, "1111").unwrap();
        d.logout(&mut session);

        assert!(!session.is_authenticated());
        assert_eq!(
            messages(&d),
            vec![
                "Teacher Mr. Brown logged out of pickup portal",
                "Teacher Mr. Brown logged into pickup portal",
            ]
        );
    }

    #[test]
    fn test_release_missing_position() {
        let (mut d, _) = dismissal();
        d.check_in(check_in("Sarah Johnson", &["Emma Rodriguez"], PickupMethod::CarLine));
        let before = d.activity();

        assert!(d.release(99).is_none());
        assert_eq!(d.activity(), before);
        assert_eq!(d.queue().len(), 1);
    }

    #[test]
    fn test_feed_is_bounded_after_many_check_ins() {
        let (mut d, _) = dismissal();
        for i in 0..10 {
            d.check_in(check_in(&format!("Parent {i}"), &["Ava Wilson"], PickupMethod::CarLine));
        }
        let feed = d.activity();
        assert_eq!(feed.len(), crate::ACTIVITY_LOG_CAPACITY);
        assert_eq!(feed[0].message, "Queue #10 assigned to Ms. Davis's class");
    }

    #[test]
    fn test_stats() {
        let (mut d, clock) = dismissal();
        d.seed_demo_queue();

        let stats = d.stats();
        assert_eq!(stats.active_pickups, 3);
        assert_eq!(stats.active_students, 4);
        assert_eq!(stats.total_enrollment, 44);
        assert_eq!(stats.students_remaining, 40);
        assert_eq!(stats.completed_pickups, 0);
        assert_eq!(stats.average_wait_minutes, None);

        clock.advance_minutes(6);
        d.release(2);
        let stats = d.stats();
        assert_eq!(stats.active_students, 2);
        assert_eq!(stats.completed_pickups, 1);
        assert_eq!(stats.average_wait_minutes, Some(6.0));
    }

    #[test]
    fn test_students_remaining_saturates() {
        let mut d = Dismissal::builder(Directory::sample())
            .total_enrollment(1)
            .ticket_issuer(RandomTicketIssuer::seeded(1))
            .build();
        d.seed_demo_queue();
        assert_eq!(d.stats().students_remaining, 0);
    }

    #[test]
    fn test_seed_demo_queue() {
        let (mut d, _) = dismissal();
        let seeded = d.seed_demo_queue();

        let labels: Vec<&str> = seeded
            .iter()
            .map(|r| r.assigned_teacher_label.as_str())
            .collect();
        assert_eq!(labels, vec!["Mrs. Johnson", "Mr. Williams", "Ms. Davis"]);
        assert_eq!(d.activity().len(), 9);
    }

    #[test]
    fn test_from_config_seeds_when_enabled() {
        let config = DismissalConfig {
            seed_demo_queue: true,
            total_enrollment: 30,
            ..DismissalConfig::default()
        };
        let d = Dismissal::from_config(&config);
        assert_eq!(d.queue().len(), 3);
        assert_eq!(d.stats().total_enrollment, 30);
        assert_eq!(d.directory().teacher_count(), 5);
    }

    #[test]
    fn test_queue_length_numbering_via_builder() {
        let mut d = Dismissal::builder(Directory::sample())
            .queue_numbering(QueueNumbering::QueueLength)
            .ticket_issuer(RandomTicketIssuer::seeded(2))
            .build();
        d.check_in(check_in("A", &["Ava Wilson"], PickupMethod::CarLine));
        d.release(1);
        let next = d.check_in(check_in("B", &["Ava Wilson"], PickupMethod::CarLine));
        assert_eq!(next.queue_position, 1);
    }

    #[test]
    fn test_close_returns_final_stats() {
        let (mut d, clock) = dismissal();
        d.seed_demo_queue();
        clock.advance_minutes(3);
        d.release(1);
        d.release(3);

        let stats = d.close();
        assert_eq!(stats.completed_pickups, 2);
        assert_eq!(stats.active_pickups, 1);
        assert_eq!(stats.average_wait_minutes, Some(3.0));
    }
}
