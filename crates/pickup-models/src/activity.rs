use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One line of the activity feed.
///
/// Ids are assigned from a per-session counter, so they are unique and
/// ordered the same way as the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityEntry {
    pub id: u64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
