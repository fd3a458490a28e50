use crate::basket::{self, BasketCoordinator};
use crate::constraints::Checker;
use crate::data::{SchedulingInput, SchedulingOutput};
use crate::error::ValidationError;
use crate::expander;
use crate::model::{Booking, ConflictReason, ConflictRecord, SessionUnit, Timetable, UnitId};
use crate::ordering;
use crate::report;
use crate::state::BookingState;
use crate::validation::{self, ValidatedInput};
use log::{debug, info, trace};
use std::time::Instant;

/// Validates the input, runs the greedy pass and builds the report.
pub fn solve(input: &SchedulingInput) -> Result<SchedulingOutput, ValidationError> {
    let timetable = generate(input)?;
    Ok(report::build_output(&timetable))
}

/// Validates the input and runs the greedy pass.
pub fn generate(input: &SchedulingInput) -> Result<Timetable, ValidationError> {
    let validated = validation::validate(input)?;
    Ok(Scheduler::new(validated).run())
}

fn checker(input: &ValidatedInput) -> Checker<'_> {
    Checker::new(
        &input.catalog,
        &input.config.daily_limit,
        input.config.large_room_threshold,
    )
}

/// One scheduling run. Owns all booking state for its lifetime.
pub struct Scheduler {
    input: ValidatedInput,
    units: Vec<SessionUnit>,
    state: BookingState,
    bookings: Vec<Booking>,
    conflicts: Vec<ConflictRecord>,
}

impl Scheduler {
    pub fn new(input: ValidatedInput) -> Self {
        let units = expander::expand(&input.courses);
        Self {
            input,
            units,
            state: BookingState::new(),
            bookings: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn run(mut self) -> Timetable {
        let start_time = Instant::now();
        let mut ordered = self.units.clone();
        ordering::prioritize(&mut ordered, &self.input.courses);
        let mut coordinator = BasketCoordinator::new(&ordered);
        info!(
            "Scheduling {} session units ({} basket rounds) over {} slots and {} rooms...",
            ordered.len(),
            coordinator.round_count(),
            self.input.catalog.len(),
            self.input.rooms.len()
        );

        for unit in &ordered {
            if unit.basket.is_some() {
                if let Some(members) = coordinator.claim(unit) {
                    self.schedule_round(&members);
                }
            } else {
                self.schedule_unit(unit.id);
            }
        }

        info!(
            "Placed {} of {} session units in {:.2?}; {} conflicts.",
            self.bookings.len(),
            self.units.len(),
            start_time.elapsed(),
            self.conflicts.len()
        );

        let ValidatedInput {
            courses,
            rooms,
            catalog,
            ..
        } = self.input;
        Timetable {
            courses,
            units: self.units,
            catalog,
            rooms,
            bookings: self.bookings,
            conflicts: self.conflicts,
        }
    }

    fn schedule_unit(&mut self, id: UnitId) {
        match self.place_unit(id) {
            Ok(booking) => {
                self.state.commit(
                    &self.units[id],
                    self.input.catalog.get(booking.slot),
                    booking.room,
                );
                debug!(
                    "Unit {} -> {} in {}.",
                    report::describe_unit(&self.input.courses, &self.units[id]),
                    self.input.catalog.get(booking.slot),
                    self.input.rooms.get(booking.room).id
                );
                self.bookings.push(booking);
            }
            Err(reason) => {
                let unit = &self.units[id];
                let explanation = format!(
                    "{}: {}",
                    report::describe_unit(&self.input.courses, unit),
                    reason
                );
                debug!("Unplaced {}.", explanation);
                self.conflicts.push(ConflictRecord {
                    units: vec![id],
                    reason,
                    explanation,
                });
            }
        }
    }

    // check phase for a single unit; commit happens in schedule_unit
    fn place_unit(&self, id: UnitId) -> Result<Booking, ConflictReason> {
        let unit = &self.units[id];
        let checker = checker(&self.input);
        let rooms = self.input.rooms.candidates(
            unit.category,
            unit.required_capacity,
            checker.large_room_threshold,
        );
        if rooms.is_empty() {
            return Err(ConflictReason::CapacityMismatch);
        }

        let mut last = ConflictReason::SlotExhausted;
        for slot in self.input.catalog.eligible(unit.duration) {
            for &room in &rooms {
                match checker.check(unit, slot, room, self.input.rooms.get(room), &self.state) {
                    Ok(()) => {
                        return Ok(Booking {
                            unit: id,
                            slot: slot.index,
                            room,
                        });
                    }
                    Err(reason) => {
                        trace!("Unit {} rejected at {} in room {}: {}.", id, slot, room, reason);
                        last = reason;
                    }
                }
            }
        }
        Err(last)
    }

    fn schedule_round(&mut self, member_ids: &[UnitId]) {
        let checker = checker(&self.input);
        let members: Vec<&SessionUnit> = member_ids.iter().map(|&id| &self.units[id]).collect();
        match basket::place_round(&members, &checker, &self.input.rooms, &mut self.state) {
            Ok(bookings) => self.bookings.extend(bookings),
            Err(blocking) => {
                let first = members[0];
                let course = &self.input.courses[first.course];
                let codes: Vec<&str> = members
                    .iter()
                    .map(|m| self.input.courses[m.course].code.as_str())
                    .collect();
                let explanation = format!(
                    "Basket {} {} #{} ({}): {}; last blocked by {}",
                    course.basket.as_deref().unwrap_or_default(),
                    first.category,
                    first.ordinal,
                    codes.join(", "),
                    ConflictReason::BasketUnsatisfiable,
                    blocking
                );
                debug!("Unplaced {}.", explanation);
                self.conflicts.push(ConflictRecord {
                    units: member_ids.to_vec(),
                    reason: ConflictReason::BasketUnsatisfiable,
                    explanation,
                });
            }
        }
    }
}
