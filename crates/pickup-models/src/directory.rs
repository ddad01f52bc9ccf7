//! On-disk shape of the school directory.
//!
//! ```json
//! {
//!   "teachers": { "3333": { "name": "Mrs. Johnson", "grade": "3rd Grade", "room": "Room 2A" } },
//!   "students": { "Emma Rodriguez": "Mrs. Johnson" }
//! }
//! ```
//!
//! A student value may be either a teacher credential or a teacher's display
//! name; the directory resolves both.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub name: String,
    pub grade: String,
    pub room: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryData {
    /// Teacher credential to profile
    #[serde(default)]
    pub teachers: BTreeMap<String, TeacherRecord>,
    /// Student name to teacher credential or display name
    #[serde(default)]
    pub students: BTreeMap<String, String>,
}

/// A student and the teacher responsible for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentEntry {
    pub name: String,
    pub teacher: String,
}
