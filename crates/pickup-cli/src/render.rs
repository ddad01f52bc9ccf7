//! Plain-text rendering of dismissal read models.

use chrono::Local;
use pickup_dismissal::Directory;
use pickup_models::{ActivityEntry, DismissalStats, PickupRequest};
use std::fmt::Write;

pub fn directory(directory: &Directory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "👩‍🏫 Teachers ({})", directory.teacher_count());
    for teacher in directory.teachers() {
        let _ = writeln!(
            out,
            "   {:<14} {:<10} {:<8} PIN {}",
            teacher.display_name, teacher.grade_label, teacher.room_label, teacher.credential
        );
    }

    let _ = writeln!(out, "\n🎒 Students ({})", directory.student_count());
    for student in directory.students() {
        let _ = writeln!(out, "   {:<20} → {}", student.name, student.teacher);
    }
    out
}

pub fn queue(requests: &[PickupRequest]) -> String {
    if requests.is_empty() {
        return "   (queue is empty)\n".to_string();
    }

    let mut out = String::new();
    for request in requests {
        let _ = writeln!(
            out,
            "   #{:<3} {:<6} {:<20} {:<8} {:<16} {}",
            request.queue_position,
            request.ticket,
            request.requester_name,
            request.pickup_method,
            request.assigned_teacher_label,
            request.students_text()
        );
    }
    out
}

pub fn activity(entries: &[ActivityEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "   {}  {}",
            entry.timestamp.with_timezone(&Local).format("%H:%M:%S"),
            entry.message
        );
    }
    out
}

pub fn stats(stats: &DismissalStats) -> String {
    let average = stats
        .average_wait_minutes
        .map(|m| format!("{m:.1} min"))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "   Active pickups:     {}\n   Students in queue:  {}\n   Students remaining: {} of {}\n   Completed pickups:  {}\n   Average wait:       {}\n",
        stats.active_pickups,
        stats.active_students,
        stats.students_remaining,
        stats.total_enrollment,
        stats.completed_pickups,
        average
    )
}
