//! # Pickup Models
//!
//! Records and DTOs shared by the dismissal core, the HTTP API and the CLI.
//!
//! # Modules
//!
//! - [`activity`]: Activity feed entries
//! - [`directory`]: Serialized directory data (teachers and student ownership)
//! - [`pickups`]: Pickup requests, methods and check-in DTOs
//! - [`stats`]: Aggregate dismissal counters
//! - [`teachers`]: Teacher profiles and portal login DTOs

pub mod activity;
pub mod directory;
pub mod pickups;
pub mod stats;
pub mod teachers;

pub use activity::ActivityEntry;
pub use directory::{DirectoryData, StudentEntry, TeacherRecord};
pub use pickups::{
    CheckInRequest, MIXED_CLASSES_LABEL, PickupMethod, PickupRequest, PickupStatus,
    UNKNOWN_TEACHER_LABEL,
};
pub use stats::DismissalStats;
pub use teachers::{TeacherLoginRequest, TeacherLoginResponse, TeacherProfile, TeacherSummary};
