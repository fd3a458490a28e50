use crate::catalog::SessionCategory;
use crate::model::{Course, SessionUnit};
use log::{debug, warn};

const CATEGORIES: [SessionCategory; 3] = [
    SessionCategory::Lecture,
    SessionCategory::Tutorial,
    SessionCategory::Practical,
];

/// Expands every course into its weekly session units, in catalog order.
///
/// Unit ids are assigned sequentially, so `units[i].id == i`.
pub fn expand(courses: &[Course]) -> Vec<SessionUnit> {
    let mut units = Vec::new();
    for (course_index, course) in courses.iter().enumerate() {
        if course.total_sessions() == 0 {
            warn!(
                "Dropping course {} ({}): no lectures, tutorials or practicals required.",
                course.code, course.title
            );
            continue;
        }
        let group = course.student_group();
        for category in CATEGORIES {
            for ordinal in 1..=course.sessions_of(category) {
                units.push(SessionUnit {
                    id: units.len(),
                    course: course_index,
                    category,
                    ordinal,
                    duration: category.duration(),
                    required_capacity: course.class_size,
                    faculty: course.faculty.clone(),
                    group: group.clone(),
                    basket: course.basket.clone(),
                });
            }
        }
    }
    debug!("Expanded {} courses into {} session units.", courses.len(), units.len());
    units
}
