//! Teacher portal authentication state.
//!
//! A session is either unauthenticated or holds exactly one teacher profile.
//! Failed logins leave it untouched.

use pickup_models::{PickupRequest, TeacherProfile};
use tracing::{info, warn};

use crate::activity::ActivityLog;
use crate::directory::Directory;
use crate::error::DismissalError;
use crate::ledger::QueueLedger;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherSession {
    teacher: Option<TeacherProfile>,
}

impl TeacherSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticates with `credential`.
    ///
    /// On success the session holds the matching profile and a login entry
    /// is appended to `log`. An unknown credential returns
    /// [`DismissalError::InvalidCredential`] without touching the session or
    /// the log.
    pub fn login(
        &mut self,
        credential: &str,
        directory: &Directory,
        log: &mut ActivityLog,
    ) -> Result<&TeacherProfile, DismissalError> {
        let Some(profile) = directory.teacher_by_credential(credential) else {
            warn!("Teacher login rejected: unknown PIN");
            return Err(DismissalError::InvalidCredential);
        };

        log.append(format!(
            "Teacher {} logged into pickup portal",
            profile.display_name
        ));
        info!(teacher = %profile.display_name, "Teacher logged in");

        Ok(self.teacher.insert(profile.clone()))
    }

    /// Ends the session. Logs the logout only when a teacher was signed in;
    /// calling it on an unauthenticated session is a no-op.
    pub fn logout(&mut self, log: &mut ActivityLog) {
        if let Some(profile) = self.teacher.take() {
            log.append(format!(
                "Teacher {} logged out of pickup portal",
                profile.display_name
            ));
            info!(teacher = %profile.display_name, "Teacher logged out");
        }
    }

    pub fn teacher(&self) -> Option<&TeacherProfile> {
        self.teacher.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.teacher.is_some()
    }

    /// Requests assigned to the signed-in teacher; empty when unauthenticated.
    pub fn my_queue(&self, ledger: &QueueLedger) -> Vec<PickupRequest> {
        match &self.teacher {
            Some(profile) => ledger.query_by_teacher(&profile.display_name),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CheckIn;
    use crate::tickets::RandomTicketIssuer;
    use pickup_config::QueueNumbering;
    use pickup_core::ManualClock;
    use pickup_models::PickupMethod;
    use std::sync::Arc;

    fn parts() -> (Directory, ActivityLog, QueueLedger) {
        let clock = Arc::new(ManualClock::default());
        (
            Directory::sample(),
            ActivityLog::new(clock.clone()),
            QueueLedger::new(
                QueueNumbering::Monotonic,
                clock,
                Box::new(RandomTicketIssuer::seeded(3)),
            ),
        )
    }

    #[test]
    fn test_starts_unauthenticated() {
        let session = TeacherSession::new();
        assert!(!session.is_authenticated());
        assert!(session.teacher().is_none());
    }

    #[test]
    fn test_login_success() {
        let (directory, mut log, _) = parts();
        let mut session = TeacherSession::new();

        let teacher = session.login("3333", &directory, &mut log).unwrap();
        assert_eq!(teacher.display_name, "Mrs. Johnson");
        assert!(session.is_authenticated());
        assert_eq!(
            log.latest().unwrap().message,
            "Teacher Mrs. Johnson logged into pickup portal"
        );
    }

    #[test]
    fn test_login_unknown_credential() {
        let (directory, mut log, _) = parts();
        let mut session = TeacherSession::new();

        let result = session.login("0000", &directory, &mut log);
        assert!(matches!(result, Err(DismissalError::InvalidCredential)));
        assert!(!session.is_authenticated());
        assert!(log.is_empty());
    }

    #[test]
    fn test_failed_login_keeps_existing_teacher() {
        let (directory, mut log, _) = parts();
        let mut session = TeacherSession::new();
        session.login("5555", &directory, &mut log).unwrap();
        let log_len = log.len();

        assert!(session.login("9999", &directory, &mut log).is_err());
        assert_eq!(session.teacher().unwrap().display_name, "Mr. Williams");
        assert_eq!(log.len(), log_len);
    }

    #[test]
    fn test_logout_logs_and_clears() {
        let (directory, mut log, _) = parts();
        let mut session = TeacherSession::new();
        session.login("2222", &directory, &mut log).unwrap();

        session.logout(&mut log);
        assert!(!session.is_authenticated());
        assert_eq!(
            log.latest().unwrap().message,
            "Teacher Ms. Davis logged out of pickup portal"
        );
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (_, mut log, _) = parts();
        let mut session = TeacherSession::new();
        session.logout(&mut log);
        session.logout(&mut log);
        assert!(log.is_empty());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_my_queue_filters_by_teacher() {
        let (directory, mut log, mut ledger) = parts();
        for (parent, students, method) in [
            ("Sarah Johnson", vec!["Emma Rodriguez"], PickupMethod::CarLine),
            ("Michael Chen", vec!["Liam Chen", "Sophie Chen"], PickupMethod::WalkUp),
            ("Tom Thompson", vec!["Michael Thompson"], PickupMethod::CarLine),
            ("Mixed Parent", vec!["Emma Rodriguez", "Ryan Lee"], PickupMethod::CarLine),
        ] {
            let check_in = CheckIn::new(parent, students, method).unwrap();
            ledger.submit(check_in, &directory, &mut log);
        }

        let mut session = TeacherSession::new();
        assert!(session.my_queue(&ledger).is_empty());

        session.login("3333", &directory, &mut log).unwrap();
        let queue = session.my_queue(&ledger);
        assert_eq!(queue.len(), 2);
        assert!(queue.iter().all(|r| r.assigned_teacher_label == "Mrs. Johnson"));

        session.logout(&mut log);
        assert!(session.my_queue(&ledger).is_empty());
    }
}
