use std::path::PathBuf;
use thiserror::Error;

/// Failures the dismissal core reports to its caller.
///
/// Releasing a position that is not in the queue is deliberately absent:
/// it is a no-op reported through `Option`, not an error.
#[derive(Debug, Error)]
pub enum DismissalError {
    #[error("Invalid PIN")]
    InvalidCredential,

    #[error("Queue #{position} belongs to {assigned}")]
    NotAssignedTeacher { position: u32, assigned: String },

    #[error("Requester name is required")]
    MissingRequester,

    #[error("At least one student name is required")]
    NoStudents,

    #[error("Unrecognized pickup method: {0}")]
    UnknownPickupMethod(String),

    #[error("Failed to read directory file {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse directory file {path}: {source}")]
    DirectoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
