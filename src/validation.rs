use crate::basket;
use crate::catalog::SlotCatalog;
use crate::config::SchedulerConfig;
use crate::data::{Cell, CourseRecord, RoomRecord, SchedulingInput};
use crate::error::ValidationError;
use crate::model::Course;
use crate::rooms::{Room, RoomPool, RoomTier};
use log::{debug, info, warn};
use std::collections::HashSet;

const DEFAULT_SEMESTER_HALF: &str = "Sem-II";
const PLACEHOLDER_ROOMS: [&str; 2] = ["-", "Online"];

/// Inputs checked and normalized, ready for a run.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub courses: Vec<Course>,
    pub rooms: RoomPool,
    pub catalog: SlotCatalog,
    pub config: SchedulerConfig,
}

pub fn validate(input: &SchedulingInput) -> Result<ValidatedInput, ValidationError> {
    let config = input.config.clone();
    let catalog = SlotCatalog::new(&config.slots)?;

    let mut courses = input
        .courses
        .iter()
        .enumerate()
        .map(|(i, record)| course_from(i, record, &config))
        .collect::<Result<Vec<_>, _>>()?;
    let baskets = basket::assign_baskets(&mut courses);

    let known_faculty: HashSet<&str> = input.faculty.iter().map(|f| f.name.trim()).collect();
    if !known_faculty.is_empty() {
        for course in &courses {
            if !known_faculty.contains(course.faculty.as_str()) {
                warn!(
                    "Course {} is taught by {:?}, who is not in the faculty list.",
                    course.code, course.faculty
                );
            }
        }
    }

    let mut rooms = Vec::with_capacity(input.rooms.len());
    let mut seen = HashSet::new();
    for record in &input.rooms {
        let Some(room) = room_from(record, &config)? else {
            continue;
        };
        if !seen.insert(room.id.clone()) {
            return Err(ValidationError::DuplicateRoom { room: room.id });
        }
        rooms.push(room);
    }
    let rooms = RoomPool::new(rooms);

    info!(
        "Loaded {} courses, {} rooms ({} large, {} regular, {} labs), {} slots, {} elective baskets.",
        courses.len(),
        rooms.len(),
        rooms.count_tier(RoomTier::Large),
        rooms.count_tier(RoomTier::Regular),
        rooms.count_tier(RoomTier::Lab),
        catalog.len(),
        baskets
    );

    Ok(ValidatedInput {
        courses,
        rooms,
        catalog,
        config,
    })
}

fn number(code: &str, field: &'static str, cell: Option<&Cell>) -> Result<Option<i64>, ValidationError> {
    match cell {
        Some(cell) => cell.as_int().map_err(|value| ValidationError::NotANumber {
            code: code.to_string(),
            field,
            value,
        }),
        None => Ok(None),
    }
}

fn count(code: &str, field: &'static str, cell: Option<&Cell>) -> Result<u32, ValidationError> {
    let value = number(code, field, cell)?.ok_or_else(|| ValidationError::MissingField {
        code: code.to_string(),
        field,
    })?;
    non_negative(code, field, value)
}

fn non_negative(code: &str, field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::NegativeCount {
        code: code.to_string(),
        field,
        value,
    })
}

fn course_from(
    index: usize,
    record: &CourseRecord,
    config: &SchedulerConfig,
) -> Result<Course, ValidationError> {
    let code = record.code.trim().to_string();
    if code.is_empty() {
        return Err(ValidationError::MissingCourseCode { index });
    }
    let required = |field: &'static str, value: &str| {
        let value = value.trim();
        if value.is_empty() {
            Err(ValidationError::MissingField {
                code: code.clone(),
                field,
            })
        } else {
            Ok(value.to_string())
        }
    };
    let title = required("Course Title", &record.title)?;
    let faculty = required("Faculty", &record.faculty)?;

    let semester = number(&code, "Semester", record.semester.as_ref())?.ok_or_else(|| {
        ValidationError::MissingField {
            code: code.clone(),
            field: "Semester",
        }
    })?;
    let semester = u32::try_from(semester)
        .ok()
        .filter(|s| *s >= 1)
        .ok_or_else(|| ValidationError::InvalidSemester {
            code: code.clone(),
            value: semester,
        })?;

    let elective = match record.electives.as_deref().map(str::to_ascii_uppercase).as_deref() {
        None | Some("F") => false,
        Some("T") => true,
        Some(_) => {
            return Err(ValidationError::InvalidElectiveFlag {
                code,
                value: record.electives.clone().unwrap_or_default(),
            });
        }
    };

    let credits = match &record.credits {
        Some(cell) => cell.as_float().map_err(|value| ValidationError::NotANumber {
            code: code.clone(),
            field: "Credits",
            value,
        })?,
        None => None,
    };

    let class_size = match number(&code, "Students", record.students.as_ref())? {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => config.default_class_size,
    };

    Ok(Course {
        title,
        faculty,
        branch: record.branch.clone().unwrap_or_default(),
        section: record.section.clone(),
        semester,
        semester_half: record
            .semester_half
            .clone()
            .unwrap_or_else(|| DEFAULT_SEMESTER_HALF.to_string()),
        lectures: count(&code, "Lectures", record.lectures.as_ref())?,
        tutorials: count(&code, "Tutorials", record.tutorials.as_ref())?,
        practicals: count(&code, "Practicals", record.practicals.as_ref())?,
        self_study: number(&code, "Self Study", record.self_study.as_ref())?
            .map(|value| non_negative(&code, "Self Study", value))
            .transpose()?
            .unwrap_or(0),
        credits,
        classroom: record.classroom.clone(),
        elective,
        combined: record.combined.clone().filter(|_| elective),
        basket: None,
        class_size,
        code,
    })
}

fn room_from(record: &RoomRecord, config: &SchedulerConfig) -> Result<Option<Room>, ValidationError> {
    let id = match record.id.as_deref() {
        Some(id) if !PLACEHOLDER_ROOMS.contains(&id) => id.to_string(),
        other => {
            debug!("Skipping placeholder room {:?}.", other);
            return Ok(None);
        }
    };
    let raw = record.capacity.as_ref();
    let capacity = raw
        .and_then(|cell| cell.as_int().ok().flatten())
        .and_then(|c| u32::try_from(c).ok())
        .filter(|c| *c > 0)
        .ok_or_else(|| ValidationError::InvalidCapacity {
            room: id.clone(),
            value: raw.map(ToString::to_string).unwrap_or_default(),
        })?;
    let tier = match record.tier.as_deref() {
        Some(raw) => RoomTier::parse(raw).ok_or_else(|| ValidationError::UnknownTier {
            room: id.clone(),
            tier: raw.to_string(),
        })?,
        None => RoomTier::classify(&id, capacity, config.large_room_threshold),
    };
    Ok(Some(Room { id, capacity, tier }))
}
