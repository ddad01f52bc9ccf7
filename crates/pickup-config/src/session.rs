//! Lifetime of teacher portal sessions.
//!
//! # Environment Variables
//!
//! - `SESSION_TTL_MINUTES`: minutes a bearer token stays valid after login (default: 480)
//! - `SESSION_MAX_PER_TEACHER`: live tokens one teacher may hold; the oldest is
//!   dropped on the next login (default: 5)

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
    pub max_per_teacher: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: 480,
            max_per_teacher: 5,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_minutes: env_or("SESSION_TTL_MINUTES", defaults.ttl_minutes).max(1),
            max_per_teacher: env_or("SESSION_MAX_PER_TEACHER", defaults.max_per_teacher).max(1),
        }
    }
}
