//! Turns a finished run into the serializable views.

use crate::data::{BookingView, ConflictView, Metadata, SchedulingOutput};
use crate::model::{Booking, ConflictRecord, Course, SessionUnit, Timetable};
use itertools::Itertools;
use log::info;
use std::collections::BTreeMap;

/// `CS301 (CSE A Sem-I) - Lecture #2 - Faculty: Dr X`
pub fn describe_unit(courses: &[Course], unit: &SessionUnit) -> String {
    let course = &courses[unit.course];
    format!(
        "{} ({} {} {}) - {} #{} - Faculty: {}",
        course.code,
        course.branch,
        course.section.as_deref().unwrap_or(""),
        course.semester_half,
        unit.category,
        unit.ordinal,
        course.faculty
    )
}

pub fn booking_view(timetable: &Timetable, booking: &Booking) -> BookingView {
    let unit = timetable.unit(booking.unit);
    let course = timetable.course_of(booking.unit);
    let slot = timetable.catalog.get(booking.slot);
    let room = timetable.rooms.get(booking.room);
    BookingView {
        course_code: course.code.clone(),
        course_title: course.title.clone(),
        semester: course.semester,
        semester_half: course.semester_half.clone(),
        year: course.year(),
        branch: course.branch.clone(),
        section: course.section.clone(),
        is_elective: course.elective,
        basket: course.basket.clone(),
        session_type: unit.category.to_string(),
        session_number: unit.ordinal,
        day: slot.day.to_string(),
        start_time: slot.start.format("%H:%M").to_string(),
        end_time: slot.end.format("%H:%M").to_string(),
        room: room.id.clone(),
        room_capacity: room.capacity,
        faculty: unit.faculty.clone(),
        student_group: unit.group.clone(),
    }
}

fn conflict_view(timetable: &Timetable, record: &ConflictRecord) -> ConflictView {
    ConflictView {
        reason: record.reason,
        explanation: record.explanation.clone(),
        course_codes: record
            .units
            .iter()
            .map(|&id| timetable.course_of(id).code.clone())
            .collect(),
        sessions: record
            .units
            .iter()
            .map(|&id| describe_unit(&timetable.courses, timetable.unit(id)))
            .collect(),
    }
}

pub fn build_output(timetable: &Timetable) -> SchedulingOutput {
    let conflict_breakdown: BTreeMap<_, usize> = timetable
        .conflicts
        .iter()
        .map(|c| c.reason)
        .counts()
        .into_iter()
        .collect();

    let metadata = Metadata {
        total_sessions: timetable.units.len(),
        scheduled_sessions: timetable.bookings.len(),
        unplaced_sessions: timetable.unplaced_units(),
        total_conflicts: timetable.conflicts.len(),
        total_courses: timetable.courses.len(),
        elective_baskets: timetable.basket_count(),
        conflict_breakdown,
    };
    info!(
        "Report: {}/{} sessions scheduled, {} conflicts ({:?}).",
        metadata.scheduled_sessions,
        metadata.total_sessions,
        metadata.total_conflicts,
        metadata.conflict_breakdown
    );

    SchedulingOutput {
        metadata,
        conflicts: timetable
            .conflicts
            .iter()
            .map(|c| conflict_view(timetable, c))
            .collect(),
        schedule: timetable
            .bookings
            .iter()
            .map(|b| booking_view(timetable, b))
            .collect(),
    }
}

/// Bookings re-indexed by student group, each group in weekly order.
pub fn by_student_group(timetable: &Timetable) -> BTreeMap<String, Vec<BookingView>> {
    timetable
        .bookings
        .iter()
        .sorted_by_key(|b| {
            let slot = timetable.catalog.get(b.slot);
            (slot.day, slot.start, slot.end, b.unit)
        })
        .map(|b| (timetable.unit(b.unit).group.clone(), booking_view(timetable, b)))
        .into_group_map()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SchedulingInput;
    use crate::model::ConflictReason;
    use crate::solver::generate;
    use serde_json::json;

    fn timetable() -> Timetable {
        let input: SchedulingInput = serde_json::from_value(json!({
            "Courses": [
                {
                    "Course Code": "CS301", "Course Title": "Operating Systems",
                    "Lectures": 2, "Tutorials": 0, "Practicals": 1,
                    "Faculty": "Dr A", "Semester": 3, "Section": "A", "Branch": "CSE",
                    "Semester Half": "Sem-I"
                },
                {
                    "Course Code": "MA201", "Course Title": "Probability",
                    "Lectures": 1, "Tutorials": 1, "Practicals": 0,
                    "Faculty": "Dr B", "Semester": 3, "Section": "B", "Branch": "CSE",
                    "Semester Half": "Sem-I"
                }
            ],
            "Rooms": [{"Room": "C101", "Seating Capacity": 72}]
        }))
        .unwrap();
        generate(&input).unwrap()
    }

    #[test]
    fn metadata_counts_every_unit() {
        let output = build_output(&timetable());
        assert_eq!(output.metadata.total_sessions, 5);
        assert_eq!(output.metadata.scheduled_sessions, 4);
        assert_eq!(output.metadata.unplaced_sessions, 1);
        assert_eq!(output.metadata.total_conflicts, 1);
        assert_eq!(output.metadata.total_courses, 2);
        assert_eq!(output.metadata.elective_baskets, 0);
        assert_eq!(
            output.metadata.conflict_breakdown.get(&ConflictReason::CapacityMismatch),
            Some(&1)
        );
        assert_eq!(output.conflicts[0].course_codes, ["CS301"]);
        assert_eq!(
            output.conflicts[0].sessions,
            ["CS301 (CSE A Sem-I) - Practical #1 - Faculty: Dr A"]
        );
    }

    #[test]
    fn output_serializes_with_camel_case_and_reason_codes() {
        let value = serde_json::to_value(build_output(&timetable())).unwrap();
        assert_eq!(value["metadata"]["conflictBreakdown"]["capacity-mismatch"], 1);
        assert_eq!(value["conflicts"][0]["reason"], "capacity-mismatch");
        let first = &value["schedule"][0];
        assert_eq!(first["courseCode"], "CS301");
        assert_eq!(first["sessionType"], "Lecture");
        assert_eq!(first["day"], "Monday");
        assert_eq!(first["startTime"], "09:00");
        assert_eq!(first["room"], "C101");
    }

    #[test]
    fn student_view_groups_and_orders_by_week() {
        let view = by_student_group(&timetable());
        let keys: Vec<_> = view.keys().cloned().collect();
        assert_eq!(keys, ["CSE-A-S3-Sem-I", "CSE-B-S3-Sem-I"]);
        assert_eq!(view["CSE-A-S3-Sem-I"].len(), 2);
        assert_eq!(view["CSE-B-S3-Sem-I"].len(), 2);
        let times = |key: &str| -> Vec<(String, String, String)> {
            view[key]
                .iter()
                .map(|s| (s.day.clone(), s.start_time.clone(), s.session_type.clone()))
                .collect()
        };
        let t = |d: &str, h: &str, k: &str| (d.to_string(), h.to_string(), k.to_string());
        assert_eq!(
            times("CSE-A-S3-Sem-I"),
            [t("Monday", "09:00", "Lecture"), t("Tuesday", "09:00", "Lecture")]
        );
        assert_eq!(
            times("CSE-B-S3-Sem-I"),
            [t("Monday", "11:00", "Lecture"), t("Monday", "14:00", "Tutorial")]
        );
    }
}
