use crate::config::SchedulerConfig;
use crate::model::ConflictReason;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of the course sheet, as exported.
///
/// Counts may arrive as numbers or numeric strings. They are kept as raw
/// [`Cell`]s and converted during validation so errors can name the course.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseRecord {
    #[serde(rename = "Course Code", default)]
    pub code: String,
    #[serde(rename = "Course Title", default)]
    pub title: String,
    #[serde(rename = "Lectures", default)]
    pub lectures: Option<Cell>,
    #[serde(rename = "Tutorials", default)]
    pub tutorials: Option<Cell>,
    #[serde(rename = "Practicals", default)]
    pub practicals: Option<Cell>,
    #[serde(rename = "Self Study", default)]
    pub self_study: Option<Cell>,
    #[serde(rename = "Credits", default)]
    pub credits: Option<Cell>,
    #[serde(rename = "Faculty", default)]
    pub faculty: String,
    #[serde(rename = "Classroom", default, deserialize_with = "opt_text")]
    pub classroom: Option<String>,
    #[serde(rename = "Semester", default)]
    pub semester: Option<Cell>,
    #[serde(rename = "Electives", default, deserialize_with = "opt_text")]
    pub electives: Option<String>,
    #[serde(rename = "Section", default, deserialize_with = "opt_text")]
    pub section: Option<String>,
    #[serde(rename = "Branch", default, deserialize_with = "opt_text")]
    pub branch: Option<String>,
    #[serde(rename = "Semester Half", default, deserialize_with = "opt_text")]
    pub semester_half: Option<String>,
    #[serde(rename = "Combined", alias = "Basket", default, deserialize_with = "opt_text")]
    pub combined: Option<String>,
    #[serde(rename = "Students", default)]
    pub students: Option<Cell>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomRecord {
    #[serde(rename = "Room", default, deserialize_with = "opt_text")]
    pub id: Option<String>,
    #[serde(rename = "Seating Capacity", default)]
    pub capacity: Option<Cell>,
    #[serde(rename = "Tier", default, deserialize_with = "opt_text")]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacultyRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department", default)]
    pub department: Option<String>,
}

/// The complete input for one scheduling run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulingInput {
    #[serde(rename = "Courses")]
    pub courses: Vec<CourseRecord>,
    #[serde(rename = "Rooms")]
    pub rooms: Vec<RoomRecord>,
    #[serde(rename = "Faculty", default)]
    pub faculty: Vec<FacultyRecord>,
    #[serde(default)]
    pub config: SchedulerConfig,
}

/// A committed session, resolved to names and times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub course_code: String,
    pub course_title: String,
    pub semester: u32,
    pub semester_half: String,
    pub year: u32,
    pub branch: String,
    pub section: Option<String>,
    pub is_elective: bool,
    pub basket: Option<String>,
    pub session_type: String,
    pub session_number: u32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub room_capacity: u32,
    pub faculty: String,
    pub student_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictView {
    pub reason: ConflictReason,
    pub explanation: String,
    pub course_codes: Vec<String>,
    pub sessions: Vec<String>,
}

impl fmt::Display for ConflictView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.reason.code(), self.explanation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Session units attempted, placed or not.
    pub total_sessions: usize,
    pub scheduled_sessions: usize,
    pub unplaced_sessions: usize,
    /// Number of conflict records; a failed basket round counts once.
    pub total_conflicts: usize,
    pub total_courses: usize,
    pub elective_baskets: usize,
    pub conflict_breakdown: BTreeMap<ConflictReason, usize>,
}

/// The final output of the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingOutput {
    pub metadata: Metadata,
    pub conflicts: Vec<ConflictView>,
    pub schedule: Vec<BookingView>,
}

/// A spreadsheet cell as exported: a number, or text that may hold one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Whole-number value, `None` for a blank cell. On failure returns the raw
    /// cell text for the error message.
    pub fn as_int(&self) -> Result<Option<i64>, String> {
        match self {
            Cell::Int(n) => Ok(Some(*n)),
            Cell::Float(x) if x.fract() == 0.0 => Ok(Some(*x as i64)),
            Cell::Float(x) => Err(x.to_string()),
            Cell::Text(s) if s.trim().is_empty() => Ok(None),
            Cell::Text(s) => s.trim().parse().map(Some).map_err(|_| s.clone()),
        }
    }

    pub fn as_float(&self) -> Result<Option<f64>, String> {
        match self {
            Cell::Int(n) => Ok(Some(*n as f64)),
            Cell::Float(x) => Ok(Some(*x)),
            Cell::Text(s) if s.trim().is_empty() => Ok(None),
            Cell::Text(s) => s.trim().parse().map(Some).map_err(|_| s.clone()),
        }
    }

    fn into_text(self) -> Option<String> {
        let text = self.to_string().trim().to_string();
        match text.as_str() {
            "" | "None" | "null" => None,
            _ => Some(text),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Cell>::deserialize(d)?.and_then(Cell::into_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_record_keeps_cells_raw() {
        let record: CourseRecord = serde_json::from_value(json!({
            "Course Code": "CS301",
            "Course Title": "Operating Systems",
            "Lectures": "3",
            "Tutorials": 1,
            "Practicals": 2.0,
            "Credits": "4",
            "Faculty": "Dr A",
            "Semester": "5",
            "Electives": "F",
            "Section": "None",
            "Branch": "CSE",
            "Semester Half": ""
        }))
        .unwrap();
        assert_eq!(record.lectures, Some(Cell::Text("3".to_string())));
        assert_eq!(record.tutorials, Some(Cell::Int(1)));
        assert_eq!(record.practicals, Some(Cell::Float(2.0)));
        assert_eq!(record.section, None);
        assert_eq!(record.semester_half, None);
        assert_eq!(record.students, None);
    }

    #[test]
    fn cells_convert_numbers_and_numeric_text() {
        assert_eq!(Cell::Text(" 3 ".to_string()).as_int(), Ok(Some(3)));
        assert_eq!(Cell::Float(2.0).as_int(), Ok(Some(2)));
        assert_eq!(Cell::Text(String::new()).as_int(), Ok(None));
        assert_eq!(Cell::Float(1.5).as_int(), Err("1.5".to_string()));
        assert_eq!(Cell::Text("three".to_string()).as_int(), Err("three".to_string()));
        assert_eq!(Cell::Text("4".to_string()).as_float(), Ok(Some(4.0)));
        assert_eq!(Cell::Int(3).as_float(), Ok(Some(3.0)));
    }

    #[test]
    fn room_ids_may_be_numeric() {
        let room: RoomRecord =
            serde_json::from_value(json!({"Room": 101, "Seating Capacity": "72"})).unwrap();
        assert_eq!(room.id.as_deref(), Some("101"));
        assert_eq!(room.capacity, Some(Cell::Text("72".to_string())));
    }
}
