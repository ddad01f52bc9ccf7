//! Read-only mapping of teacher credentials to profiles and of students to
//! the teacher who owns them.

use pickup_models::{DirectoryData, StudentEntry, TeacherProfile};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::error::DismissalError;
use crate::sample::sample_directory_data;

#[derive(Debug, Clone, Default)]
pub struct Directory {
    teachers: BTreeMap<String, TeacherProfile>,
    students: BTreeMap<String, String>,
}

impl Directory {
    pub fn new(
        teachers: impl IntoIterator<Item = TeacherProfile>,
        students: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            teachers: teachers
                .into_iter()
                .map(|t| (t.credential.clone(), t))
                .collect(),
            students: students.into_iter().collect(),
        }
    }

    pub fn from_data(data: DirectoryData) -> Self {
        let teachers = data.teachers.into_iter().map(|(credential, record)| {
            TeacherProfile::new(credential, record.name, record.grade, record.room)
        });
        Self::new(teachers, data.students)
    }

    /// The built-in five-teacher, fifteen-student directory.
    pub fn sample() -> Self {
        Self::from_data(sample_directory_data())
    }

    /// Loads a directory from a JSON file shaped like [`DirectoryData`].
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, DismissalError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DismissalError::DirectoryRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data: DirectoryData =
            serde_json::from_str(&raw).map_err(|source| DismissalError::DirectoryParse {
                path: path.to_path_buf(),
                source,
            })?;

        let directory = Self::from_data(data);
        info!(
            teachers = directory.teacher_count(),
            students = directory.student_count(),
            "Directory loaded"
        );
        Ok(directory)
    }

    /// Loads from `path` when given, substituting the sample directory when
    /// there is no path or the load fails. Never returns an empty directory
    /// because of a load failure.
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                warn!(error = %e, "Directory load failed, using built-in sample data");
                Self::sample()
            }),
            None => {
                info!("No directory file configured, using built-in sample data");
                Self::sample()
            }
        }
    }

    /// Looks up the teacher responsible for `student_name` and returns that
    /// teacher's display name. `None` means the student is not recognized,
    /// which is a valid outcome rather than an error.
    ///
    /// A student may be recorded against a credential or a display name; a
    /// value matching a known credential is translated to the display name.
    pub fn resolve_teacher_for_student(&self, student_name: &str) -> Option<&str> {
        let owner = self.students.get(student_name)?;
        match self.teachers.get(owner) {
            Some(teacher) => Some(teacher.display_name.as_str()),
            None => Some(owner.as_str()),
        }
    }

    pub fn teacher_by_credential(&self, credential: &str) -> Option<&TeacherProfile> {
        self.teachers.get(credential)
    }

    /// Teachers ordered by credential.
    pub fn teachers(&self) -> impl Iterator<Item = &TeacherProfile> {
        self.teachers.values()
    }

    /// Every student with the resolved teacher label, ordered by student name.
    pub fn students(&self) -> Vec<StudentEntry> {
        self.students
            .keys()
            .filter_map(|name| {
                self.resolve_teacher_for_student(name)
                    .map(|teacher| StudentEntry {
                        name: name.clone(),
                        teacher: teacher.to_string(),
                    })
            })
            .collect()
    }

    /// Students owned by the teacher with `display_name`.
    pub fn students_of(&self, display_name: &str) -> Vec<&str> {
        self.students
            .keys()
            .filter(|name| self.resolve_teacher_for_student(name) == Some(display_name))
            .map(String::as_str)
            .collect()
    }

    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.students.is_empty()
    }
}
