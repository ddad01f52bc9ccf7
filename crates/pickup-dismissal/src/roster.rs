//! Resolution of a set of students to the teacher responsible for them.

use pickup_models::{MIXED_CLASSES_LABEL, UNKNOWN_TEACHER_LABEL};

use crate::directory::Directory;

/// Outcome of resolving a pickup's students against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Every student resolves to this teacher (display name).
    SingleTeacher(String),
    /// At least one student resolves to a teacher other than the first
    /// student's, or is unrecognized while the first is not.
    Mixed,
    /// The first student is not in the directory.
    Unrecognized,
}

impl Assignment {
    /// The label stored on the pickup request.
    pub fn label(&self) -> &str {
        match self {
            Self::SingleTeacher(teacher) => teacher,
            Self::Mixed => MIXED_CLASSES_LABEL,
            Self::Unrecognized => UNKNOWN_TEACHER_LABEL,
        }
    }

    /// Short name used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SingleTeacher(_) => "single_teacher",
            Self::Mixed => "mixed",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Metric/log kind for a label already stored on a request.
pub fn assignment_kind(label: &str) -> &'static str {
    match label {
        MIXED_CLASSES_LABEL => "mixed",
        UNKNOWN_TEACHER_LABEL => "unrecognized",
        _ => "single_teacher",
    }
}

/// Whether the teacher named `teacher` may release a request carrying
/// `label`. Teachers release their own class; the "Mixed Classes" and
/// "Unknown Teacher" buckets have no owner and any teacher may release them.
pub fn may_release(label: &str, teacher: &str) -> bool {
    label == teacher || matches!(label, MIXED_CLASSES_LABEL | UNKNOWN_TEACHER_LABEL)
}

/// Resolves `student_names` to an [`Assignment`].
///
/// Only the first student seeds the comparison: if it is unrecognized the
/// result is `Unrecognized` no matter what follows, otherwise every other
/// student must resolve to the same teacher. There is no majority vote.
///
/// An empty slice yields `Unrecognized`; callers construct requests through
/// [`crate::CheckIn`], which rejects empty rosters before they get here.
pub fn resolve_assignment<S: AsRef<str>>(directory: &Directory, student_names: &[S]) -> Assignment {
    let Some((first, rest)) = student_names.split_first() else {
        return Assignment::Unrecognized;
    };
    let Some(teacher) = directory.resolve_teacher_for_student(first.as_ref()) else {
        return Assignment::Unrecognized;
    };

    let all_same = rest
        .iter()
        .all(|name| directory.resolve_teacher_for_student(name.as_ref()) == Some(teacher));

    if all_same {
        Assignment::SingleTeacher(teacher.to_string())
    } else {
        Assignment::Mixed
    }
}
