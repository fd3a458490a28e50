//! Named scenarios for baskets, the daily cap and lab exhaustion.

use serde_json::{Value, json};
use std::collections::HashSet;
use timetable_solver::catalog::{SessionCategory, SlotCatalog, default_week};
use timetable_solver::constraints::Checker;
use timetable_solver::model::SessionUnit;
use timetable_solver::rooms::{Room, RoomTier};
use timetable_solver::state::BookingState;
use timetable_solver::{ConflictReason, DailyLimitPolicy, SchedulingInput, generate};

fn course(code: &str, faculty: &str, semester: u32, branch: &str, ltp: (u32, u32, u32)) -> Value {
    json!({
        "Course Code": code,
        "Course Title": format!("{code} title"),
        "Lectures": ltp.0,
        "Tutorials": ltp.1,
        "Practicals": ltp.2,
        "Faculty": faculty,
        "Semester": semester,
        "Electives": "F",
        "Section": "A",
        "Branch": branch,
        "Semester Half": "Sem-II"
    })
}

fn input(courses: Vec<Value>, rooms: Value) -> SchedulingInput {
    serde_json::from_value(json!({ "Courses": courses, "Rooms": rooms })).unwrap()
}

#[test]
fn three_basket_electives_share_one_lecture_slot() {
    let courses = ["EL1", "EL2", "EL3"]
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let mut c = course(code, &format!("Dr {i}"), 5, "CSE", (1, 0, 0));
            c["Electives"] = json!("T");
            c["Combined"] = json!("Elective Basket 1");
            c
        })
        .collect();
    let timetable = generate(&input(
        courses,
        json!([
            {"Room": "C101", "Seating Capacity": 72},
            {"Room": "C102", "Seating Capacity": 72},
            {"Room": "C103", "Seating Capacity": 72}
        ]),
    ))
    .unwrap();

    assert!(timetable.conflicts.is_empty());
    assert_eq!(timetable.bookings.len(), 3);
    let slots: HashSet<_> = timetable.bookings.iter().map(|b| b.slot).collect();
    assert_eq!(slots.len(), 1);
    let rooms: HashSet<_> = timetable.bookings.iter().map(|b| b.room).collect();
    assert_eq!(rooms.len(), 3);
    let slot = timetable.catalog.get(timetable.bookings[0].slot);
    assert_eq!(slot.to_string(), "Monday 09:00-10:30");
}

#[test]
fn third_monday_session_is_rejected_by_the_daily_limit() {
    let catalog = SlotCatalog::new(&default_week()).unwrap();
    let policy = DailyLimitPolicy::default();
    let checker = Checker::new(&catalog, &policy, 100);
    let classroom = Room {
        id: "C101".to_string(),
        capacity: 72,
        tier: RoomTier::Regular,
    };
    let unit = |id: usize, category: SessionCategory| SessionUnit {
        id,
        course: 0,
        category,
        ordinal: 1,
        duration: category.duration(),
        required_capacity: 60,
        faculty: format!("Dr {id}"),
        group: format!("G{id}"),
        basket: None,
    };
    let monday = |start: &str, category: SessionCategory| {
        catalog
            .slots()
            .iter()
            .find(|s| {
                s.day.to_string() == "Monday"
                    && s.start.format("%H:%M").to_string() == start
                    && s.duration == category.duration()
            })
            .unwrap()
    };

    let mut state = BookingState::new();
    state.commit(&unit(0, SessionCategory::Lecture), monday("09:00", SessionCategory::Lecture), 0);
    state.commit(&unit(1, SessionCategory::Practical), monday("14:00", SessionCategory::Practical), 1);

    let candidate = unit(2, SessionCategory::Lecture);
    assert_eq!(
        checker.check(&candidate, monday("11:00", SessionCategory::Lecture), 2, &classroom, &state),
        Err(ConflictReason::DailyLimit)
    );
}

#[test]
fn exhausted_labs_block_only_the_practical() {
    let mut courses: Vec<Value> = (0..20)
        .map(|i| course(&format!("LAB{i:02}"), &format!("Dr L{i}"), 1, &format!("B{i}"), (0, 0, 1)))
        .collect();
    courses.push(course("CS301", "Dr Target", 3, "CSE", (1, 0, 1)));

    let timetable = generate(&input(
        courses,
        json!([
            {"Room": "L1", "Seating Capacity": 70},
            {"Room": "C101", "Seating Capacity": 72}
        ]),
    ))
    .unwrap();

    assert_eq!(timetable.conflicts.len(), 1);
    let record = &timetable.conflicts[0];
    assert_eq!(record.reason, ConflictReason::RoomConflict);
    let unit = timetable.unit(record.units[0]);
    assert_eq!(timetable.course_of(unit.id).code, "CS301");
    assert_eq!(unit.category, SessionCategory::Practical);

    let lecture = timetable
        .bookings
        .iter()
        .find(|b| timetable.course_of(b.unit).code == "CS301")
        .expect("the lecture is still placed");
    assert_eq!(timetable.unit(lecture.unit).category, SessionCategory::Lecture);
    assert_eq!(timetable.rooms.get(lecture.room).id, "C101");
}

#[test]
fn policy_can_forbid_lecture_and_tutorial_on_one_day() {
    let mut value = json!({
        "Courses": [course("CS101", "Dr A", 1, "CSE", (1, 1, 0))],
        "Rooms": [{"Room": "C101", "Seating Capacity": 72}],
        "config": {"dailyLimit": {"forbidLectureWithTutorial": true}}
    });
    let strict: SchedulingInput = serde_json::from_value(value.clone()).unwrap();
    let timetable = generate(&strict).unwrap();
    let days: Vec<_> = timetable
        .bookings
        .iter()
        .map(|b| timetable.catalog.get(b.slot).day)
        .collect();
    assert_eq!(days.len(), 2);
    assert_ne!(days[0], days[1]);

    value["config"] = json!({});
    let relaxed: SchedulingInput = serde_json::from_value(value).unwrap();
    let timetable = generate(&relaxed).unwrap();
    let days: Vec<_> = timetable
        .bookings
        .iter()
        .map(|b| timetable.catalog.get(b.slot).day)
        .collect();
    assert_eq!(days[0], days[1]);
}
