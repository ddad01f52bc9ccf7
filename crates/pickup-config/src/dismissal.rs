//! Settings for the dismissal core.
//!
//! # Environment Variables
//!
//! - `TOTAL_ENROLLMENT`: students enrolled, used for "students remaining" (default: 44)
//! - `QUEUE_NUMBERING`: `monotonic` or `queue_length` (default: `monotonic`)
//! - `DIRECTORY_PATH`: JSON file with teachers and students; built-in sample data when unset
//! - `SEED_DEMO_QUEUE`: submit three sample pickups at start-up (default: false)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::env_or;

/// Default enrollment figure used when none is configured.
pub const DEFAULT_TOTAL_ENROLLMENT: u32 = 44;

/// How queue positions are allocated on check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueNumbering {
    /// Strictly increasing counter; positions are never reused in a session.
    #[default]
    Monotonic,
    /// `active requests + 1`. Reuses numbers after releases, matching the
    /// numbering parents saw on the original check-in screens.
    ///
    /// Two waiting requests can then share a number. Releasing that number
    /// removes only the earliest of them; the later one keeps its own owner
    /// check and stays queued. The legacy screens dropped every request
    /// carrying the number at once.
    QueueLength,
}

impl FromStr for QueueNumbering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" | "counter" => Ok(Self::Monotonic),
            "queue_length" | "length" | "legacy" => Ok(Self::QueueLength),
            other => Err(format!("unknown queue numbering '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DismissalConfig {
    pub total_enrollment: u32,
    pub queue_numbering: QueueNumbering,
    pub directory_path: Option<PathBuf>,
    pub seed_demo_queue: bool,
}

impl Default for DismissalConfig {
    fn default() -> Self {
        Self {
            total_enrollment: DEFAULT_TOTAL_ENROLLMENT,
            queue_numbering: QueueNumbering::default(),
            directory_path: None,
            seed_demo_queue: false,
        }
    }
}

impl DismissalConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            total_enrollment: env_or("TOTAL_ENROLLMENT", DEFAULT_TOTAL_ENROLLMENT),
            queue_numbering: env_or("QUEUE_NUMBERING", QueueNumbering::default()),
            directory_path: std::env::var("DIRECTORY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            seed_demo_queue: std::env::var("SEED_DEMO_QUEUE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
