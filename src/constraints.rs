//! Legality check for a single candidate placement.

use crate::catalog::{Slot, SlotCatalog};
use crate::config::DailyLimitPolicy;
use crate::model::{ConflictReason, SessionUnit};
use crate::rooms::{Room, RoomIndex};
use crate::state::BookingState;

/// Read-only view of the run policy used to judge candidates.
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    pub catalog: &'a SlotCatalog,
    pub policy: &'a DailyLimitPolicy,
    pub large_room_threshold: u32,
}

impl<'a> Checker<'a> {
    pub fn new(catalog: &'a SlotCatalog, policy: &'a DailyLimitPolicy, large_room_threshold: u32) -> Self {
        Self {
            catalog,
            policy,
            large_room_threshold,
        }
    }

    /// Checks run in a fixed order; the first failing one is reported.
    pub fn check(
        &self,
        unit: &SessionUnit,
        slot: &Slot,
        room_index: RoomIndex,
        room: &Room,
        state: &BookingState,
    ) -> Result<(), ConflictReason> {
        if slot.duration != unit.duration {
            return Err(ConflictReason::CategoryMismatch);
        }
        if !room.can_host(unit.category, unit.required_capacity, self.large_room_threshold) {
            return Err(ConflictReason::CapacityMismatch);
        }

        let overlapping = self.catalog.overlapping(slot.index);
        if state.room_busy(room_index, overlapping) {
            return Err(ConflictReason::RoomConflict);
        }
        if state.faculty_busy(&unit.faculty, overlapping) {
            return Err(ConflictReason::FacultyConflict);
        }
        if state.group_busy(&unit.group, overlapping) {
            return Err(ConflictReason::StudentConflict);
        }
        if !self
            .policy
            .admits(state.sessions_on(unit.course, slot.day), unit.category)
        {
            return Err(ConflictReason::DailyLimit);
        }
        Ok(())
    }
}
