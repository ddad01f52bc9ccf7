use chrono::{DateTime, Duration, Utc};
use pickup_config::{CorsConfig, DismissalConfig, PeerGovernorConfig, RateLimitConfig, SessionConfig};
use pickup_dismissal::{Dismissal, TeacherSession};
use pickup_models::TeacherProfile;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// A signed-in session and the instant its token stops being accepted.
#[derive(Debug)]
pub struct IssuedSession {
    pub session: TeacherSession,
    pub expires_at: DateTime<Utc>,
}

impl IssuedSession {
    fn belongs_to(&self, teacher: &TeacherProfile) -> bool {
        self.session
            .teacher()
            .is_some_and(|t| t.credential == teacher.credential)
    }
}

/// Everything that mutates: the dismissal itself and the signed-in teacher
/// sessions keyed by bearer token. Held behind a single lock so queue
/// numbering and feed truncation happen one writer at a time.
///
/// Tokens expire after the configured lifetime and each teacher holds at
/// most `max_per_teacher` of them, so the table stays bounded by the size
/// of the staff.
#[derive(Debug)]
pub struct Portal {
    pub dismissal: Dismissal,
    sessions: HashMap<Uuid, IssuedSession>,
    session_config: SessionConfig,
}

impl Portal {
    pub fn new(dismissal: Dismissal, session_config: SessionConfig) -> Self {
        Self {
            dismissal,
            sessions: HashMap::new(),
            session_config,
        }
    }

    /// Registers an authenticated `session` and returns its token.
    ///
    /// Expired tokens are pruned first. When the teacher is already at the
    /// cap, their oldest tokens are dropped to make room.
    pub fn open_session(&mut self, session: TeacherSession) -> Uuid {
        let now = self.dismissal.now();
        self.prune_expired(now);

        if let Some(teacher) = session.teacher() {
            let mut own: Vec<(Uuid, DateTime<Utc>)> = self
                .sessions
                .iter()
                .filter(|(_, issued)| issued.belongs_to(teacher))
                .map(|(token, issued)| (*token, issued.expires_at))
                .collect();
            own.sort_by_key(|(_, expires_at)| *expires_at);

            let excess = (own.len() + 1).saturating_sub(self.session_config.max_per_teacher.max(1));
            for (token, _) in own.into_iter().take(excess) {
                self.sessions.remove(&token);
                debug!(teacher = %teacher.display_name, "Oldest session dropped at cap");
            }
        }

        let token = Uuid::new_v4();
        self.sessions.insert(
            token,
            IssuedSession {
                session,
                expires_at: now + Duration::minutes(self.session_config.ttl_minutes),
            },
        );
        token
    }

    /// The live session behind `token`. An expired token is removed and
    /// treated as unknown.
    pub fn session(&mut self, token: &Uuid) -> Option<&TeacherSession> {
        let now = self.dismissal.now();
        if self.sessions.get(token)?.expires_at <= now {
            self.sessions.remove(token);
            debug!("Expired session rejected");
            return None;
        }
        self.sessions.get(token).map(|issued| &issued.session)
    }

    /// Removes `token`, returning its session when it was still live.
    pub fn close_session(&mut self, token: &Uuid) -> Option<TeacherSession> {
        let now = self.dismissal.now();
        self.sessions
            .remove(token)
            .filter(|issued| issued.expires_at > now)
            .map(|issued| issued.session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.sessions.retain(|_, issued| issued.expires_at > now);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<Mutex<Portal>>,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub general_governor: Arc<PeerGovernorConfig>,
    pub login_governor: Arc<PeerGovernorConfig>,
}

impl AppState {
    pub fn new(
        dismissal: Dismissal,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            portal: Arc::new(Mutex::new(Portal::new(dismissal, session_config))),
            general_governor: Arc::new(rate_limit_config.general_governor_config()),
            login_governor: Arc::new(rate_limit_config.auth_governor_config()),
            cors_config,
            rate_limit_config,
        }
    }
}

pub fn init_app_state() -> AppState {
    AppState::new(
        Dismissal::from_config(&DismissalConfig::from_env()),
        CorsConfig::from_env(),
        RateLimitConfig::from_env(),
        SessionConfig::from_env(),
    )
}

#[cfg(any(test, feature = "test-utils"))]
impl AppState {
    /// Sample directory, deterministic tickets and a clock the caller drives.
    pub fn for_tests(clock: pickup_core::ManualClock, rate_limit_config: RateLimitConfig) -> Self {
        Self::for_tests_with_sessions(clock, rate_limit_config, SessionConfig::default())
    }

    pub fn for_tests_with_sessions(
        clock: pickup_core::ManualClock,
        rate_limit_config: RateLimitConfig,
        session_config: SessionConfig,
    ) -> Self {
        let dismissal = Dismissal::builder(pickup_dismissal::Directory::sample())
            .clock(Arc::new(clock))
            .ticket_issuer(pickup_dismissal::RandomTicketIssuer::seeded(7))
            .build();
        Self::new(
            dismissal,
            CorsConfig::default(),
            rate_limit_config,
            session_config,
        )
    }
}
