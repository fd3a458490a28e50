use crate::catalog::{DurationClass, SessionCategory, SlotCatalog, SlotIndex};
use crate::rooms::{RoomIndex, RoomPool};
use serde::Serialize;
use std::fmt;

pub type CourseIndex = usize;
pub type UnitId = usize;

/// A validated course record.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub code: String,
    pub title: String,
    pub branch: String,
    /// `None` means the course is taken by the whole year.
    pub section: Option<String>,
    pub semester: u32,
    pub semester_half: String,
    pub lectures: u32,
    pub tutorials: u32,
    pub practicals: u32,
    pub self_study: u32,
    pub credits: Option<f64>,
    pub faculty: String,
    pub classroom: Option<String>,
    pub elective: bool,
    /// Free-text label shared by electives offered in the same slot.
    pub combined: Option<String>,
    pub basket: Option<String>,
    pub class_size: u32,
}

impl Course {
    pub fn year(&self) -> u32 {
        self.semester.div_ceil(2)
    }

    pub fn total_sessions(&self) -> u32 {
        self.lectures + self.tutorials + self.practicals
    }

    pub fn sessions_of(&self, category: SessionCategory) -> u32 {
        match category {
            SessionCategory::Lecture => self.lectures,
            SessionCategory::Tutorial => self.tutorials,
            SessionCategory::Practical => self.practicals,
        }
    }

    /// Key of the students attending this course. Basket electives share one key per basket.
    pub fn student_group(&self) -> String {
        match &self.basket {
            Some(basket) => format!("basket:{basket}"),
            None => format!(
                "{}-{}-S{}-{}",
                self.branch,
                self.section.as_deref().unwrap_or("ALL"),
                self.semester,
                self.semester_half
            ),
        }
    }
}

/// One required weekly occurrence of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUnit {
    pub id: UnitId,
    pub course: CourseIndex,
    pub category: SessionCategory,
    /// 1-based occurrence number within the category.
    pub ordinal: u32,
    pub duration: DurationClass,
    pub required_capacity: u32,
    pub faculty: String,
    pub group: String,
    pub basket: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub unit: UnitId,
    pub slot: SlotIndex,
    pub room: RoomIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictReason {
    CategoryMismatch,
    CapacityMismatch,
    RoomConflict,
    FacultyConflict,
    StudentConflict,
    DailyLimit,
    SlotExhausted,
    BasketUnsatisfiable,
}

impl ConflictReason {
    /// Stable machine-readable code, identical to the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            ConflictReason::CategoryMismatch => "category-mismatch",
            ConflictReason::CapacityMismatch => "capacity-mismatch",
            ConflictReason::RoomConflict => "room-conflict",
            ConflictReason::FacultyConflict => "faculty-conflict",
            ConflictReason::StudentConflict => "student-conflict",
            ConflictReason::DailyLimit => "daily-limit",
            ConflictReason::SlotExhausted => "slot-exhausted",
            ConflictReason::BasketUnsatisfiable => "basket-unsatisfiable",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConflictReason::CategoryMismatch => "slot length does not fit the session",
            ConflictReason::CapacityMismatch => "no room of a suitable tier and size",
            ConflictReason::RoomConflict => "room occupied",
            ConflictReason::FacultyConflict => "faculty busy",
            ConflictReason::StudentConflict => "students busy",
            ConflictReason::DailyLimit => "daily session limit reached",
            ConflictReason::SlotExhausted => "no slot of the required length",
            ConflictReason::BasketUnsatisfiable => "no common slot for the whole basket",
        };
        f.write_str(text)
    }
}

/// A unit, or a whole basket round, that could not be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictRecord {
    pub units: Vec<UnitId>,
    pub reason: ConflictReason,
    pub explanation: String,
}

/// Final state of one scheduling run.
#[derive(Debug, Clone)]
pub struct Timetable {
    pub courses: Vec<Course>,
    /// Indexed by `UnitId`.
    pub units: Vec<SessionUnit>,
    pub catalog: SlotCatalog,
    pub rooms: RoomPool,
    pub bookings: Vec<Booking>,
    pub conflicts: Vec<ConflictRecord>,
}

impl Timetable {
    pub fn unit(&self, id: UnitId) -> &SessionUnit {
        &self.units[id]
    }

    pub fn course_of(&self, id: UnitId) -> &Course {
        &self.courses[self.units[id].course]
    }

    pub fn basket_count(&self) -> usize {
        let mut baskets: Vec<&str> = self
            .courses
            .iter()
            .filter_map(|c| c.basket.as_deref())
            .collect();
        baskets.sort_unstable();
        baskets.dedup();
        baskets.len()
    }

    pub fn unplaced_units(&self) -> usize {
        self.conflicts.iter().map(|c| c.units.len()).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::course;
    use super::ConflictReason;

    #[test]
    fn student_group_uses_section_or_whole_year() {
        let mut c = course("CS301", "Dr A");
        assert_eq!(c.student_group(), "CSE-A-S3-Sem-I");
        c.section = None;
        assert_eq!(c.student_group(), "CSE-ALL-S3-Sem-I");
        c.basket = Some("B1".to_string());
        assert_eq!(c.student_group(), "basket:B1");
    }

    #[test]
    fn reason_code_matches_serialized_form() {
        for reason in [ConflictReason::DailyLimit, ConflictReason::BasketUnsatisfiable] {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json.as_str(), Some(reason.code()));
        }
    }

    #[test]
    fn year_rounds_semester_up() {
        let mut c = course("CS101", "Dr A");
        c.semester = 1;
        assert_eq!(c.year(), 1);
        c.semester = 4;
        assert_eq!(c.year(), 2);
        c.semester = 5;
        assert_eq!(c.year(), 3);
    }
}
