use crate::catalog::{Day, SessionCategory, Slot, SlotIndex};
use crate::model::{CourseIndex, SessionUnit};
use crate::rooms::RoomIndex;
use std::collections::{HashMap, HashSet};

/// Mutable occupancy for one run. Only the scheduler writes to it.
#[derive(Debug, Default, Clone)]
pub struct BookingState {
    rooms: HashMap<RoomIndex, HashSet<SlotIndex>>,
    faculty: HashMap<String, HashSet<SlotIndex>>,
    groups: HashMap<String, HashSet<SlotIndex>>,
    daily: HashMap<(CourseIndex, Day), Vec<SessionCategory>>,
}

fn any_taken(taken: Option<&HashSet<SlotIndex>>, slots: &[SlotIndex]) -> bool {
    taken.is_some_and(|set| slots.iter().any(|s| set.contains(s)))
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `slots` is the set of slot indices sharing time with the candidate.
    pub fn room_busy(&self, room: RoomIndex, slots: &[SlotIndex]) -> bool {
        any_taken(self.rooms.get(&room), slots)
    }

    pub fn faculty_busy(&self, faculty: &str, slots: &[SlotIndex]) -> bool {
        any_taken(self.faculty.get(faculty), slots)
    }

    pub fn group_busy(&self, group: &str, slots: &[SlotIndex]) -> bool {
        any_taken(self.groups.get(group), slots)
    }

    pub fn sessions_on(&self, course: CourseIndex, day: Day) -> &[SessionCategory] {
        self.daily
            .get(&(course, day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn commit(&mut self, unit: &SessionUnit, slot: &Slot, room: RoomIndex) {
        self.rooms.entry(room).or_default().insert(slot.index);
        self.faculty
            .entry(unit.faculty.clone())
            .or_default()
            .insert(slot.index);
        self.groups
            .entry(unit.group.clone())
            .or_default()
            .insert(slot.index);
        self.daily
            .entry((unit.course, slot.day))
            .or_default()
            .push(unit.category);
    }
}
