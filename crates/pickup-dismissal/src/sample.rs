//! Built-in directory used when no directory file is configured or the
//! configured one cannot be loaded.

use pickup_models::{DirectoryData, TeacherRecord};

const TEACHERS: [(&str, &str, &str, &str); 5] = [
    ("3333", "Mrs. Johnson", "3rd Grade", "Room 2A"),
    ("5555", "Mr. Williams", "5th Grade", "Room 1B"),
    ("2222", "Ms. Davis", "2nd Grade", "Room 3C"),
    ("4444", "Mrs. Smith", "4th Grade", "Room 2B"),
    ("1111", "Mr. Brown", "1st Grade", "Room 1A"),
];

const STUDENTS: [(&str, &str); 15] = [
    ("Emma Rodriguez", "Mrs. Johnson"),
    ("Kohaan Callaway", "Mrs. Johnson"),
    ("Michael Thompson", "Mrs. Johnson"),
    ("Liam Chen", "Mr. Williams"),
    ("Sophie Chen", "Mr. Williams"),
    ("Alexander Park", "Mr. Williams"),
    ("Sofia Martinez", "Ms. Davis"),
    ("Ethan Brown", "Ms. Davis"),
    ("Ava Wilson", "Ms. Davis"),
    ("Grace Taylor", "Mrs. Smith"),
    ("Ryan Lee", "Mrs. Smith"),
    ("Chloe Anderson", "Mrs. Smith"),
    ("Emma Davis", "Mr. Brown"),
    ("Jake Williams", "Mr. Brown"),
    ("Lily Thompson", "Mr. Brown"),
];

/// Pickups submitted by [`crate::Dismissal::seed_demo_queue`]:
/// requester, students, method.
pub(crate) const DEMO_PICKUPS: [(&str, &[&str], pickup_models::PickupMethod); 3] = [
    (
        "Sarah Johnson",
        &["Emma Rodriguez"],
        pickup_models::PickupMethod::CarLine,
    ),
    (
        "Michael Chen",
        &["Liam Chen", "Sophie Chen"],
        pickup_models::PickupMethod::WalkUp,
    ),
    (
        "Maria Martinez",
        &["Sofia Martinez"],
        pickup_models::PickupMethod::CarLine,
    ),
];

pub fn sample_directory_data() -> DirectoryData {
    DirectoryData {
        teachers: TEACHERS
            .iter()
            .map(|(credential, name, grade, room)| {
                (
                    credential.to_string(),
                    TeacherRecord {
                        name: name.to_string(),
                        grade: grade.to_string(),
                        room: room.to_string(),
                    },
                )
            })
            .collect(),
        students: STUDENTS
            .iter()
            .map(|(student, teacher)| (student.to_string(), teacher.to_string()))
            .collect(),
    }
}
