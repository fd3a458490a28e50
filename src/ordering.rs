use crate::catalog::SessionCategory;
use crate::model::{Course, SessionUnit};
use std::cmp::Reverse;

/// Sorts units into the order the scheduler attempts them:
/// lower semesters first, then practicals, then larger classes.
/// The sort is stable, so catalog order settles any remaining tie.
pub fn prioritize(units: &mut [SessionUnit], courses: &[Course]) {
    units.sort_by_key(|u| {
        (
            courses[u.course].semester,
            u.category != SessionCategory::Practical,
            Reverse(u.required_capacity),
        )
    });
}
