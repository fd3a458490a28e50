//! Elective baskets.
//!
//! A basket is a set of elective courses that students choose between, so the
//! n-th lecture (tutorial, practical) of every member must share one slot. Each
//! such group of units is a *round*, placed as a single atomic step: every
//! member is checked against the committed state first, and only when all of
//! them fit is anything committed.

use crate::catalog::{SessionCategory, SlotIndex};
use crate::constraints::Checker;
use crate::model::{Booking, ConflictReason, Course, SessionUnit, UnitId};
use crate::rooms::{RoomIndex, RoomPool};
use crate::state::BookingState;
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Fills in `basket` for elective courses.
///
/// An elective with a combined label joins the basket of that name.
/// Unlabelled electives are grouped by semester, branch and semester half;
/// groups of two or more become baskets `B1`, `B2`, ... in order of first
/// appearance, skipping any id already used as a label. Returns the number of
/// distinct baskets.
pub fn assign_baskets(courses: &mut [Course]) -> usize {
    let mut unlabelled: Vec<((u32, String, String), usize)> = Vec::new();
    for (i, course) in courses.iter_mut().enumerate() {
        if !course.elective {
            course.basket = None;
            continue;
        }
        match course.combined.clone() {
            Some(label) => course.basket = Some(label),
            None => unlabelled.push((
                (course.semester, course.branch.clone(), course.semester_half.clone()),
                i,
            )),
        }
    }

    let groups = unlabelled.into_iter().into_group_map();
    let mut groups: Vec<Vec<usize>> = groups.into_values().filter(|g| g.len() > 1).collect();
    groups.sort_by_key(|g| g[0]);
    let taken: HashSet<String> = courses.iter().filter_map(|c| c.basket.clone()).collect();
    let mut ids = (1..)
        .map(|n| format!("B{n}"))
        .filter(|id| !taken.contains(id));
    for (members, id) in groups.iter().zip(&mut ids) {
        for &i in members {
            courses[i].basket = Some(id.clone());
        }
    }

    courses
        .iter()
        .filter_map(|c| c.basket.as_deref())
        .unique()
        .count()
}

type RoundKey = (String, SessionCategory, u32);

fn round_key(unit: &SessionUnit) -> Option<RoundKey> {
    unit.basket
        .as_ref()
        .map(|b| (b.clone(), unit.category, unit.ordinal))
}

/// Tracks basket rounds and which of them have been resolved.
#[derive(Debug, Default)]
pub struct BasketCoordinator {
    rounds: HashMap<RoundKey, Vec<UnitId>>,
    resolved: HashSet<RoundKey>,
}

impl BasketCoordinator {
    /// `ordered` must already be in priority order; members keep that order.
    pub fn new(ordered: &[SessionUnit]) -> Self {
        let rounds = ordered
            .iter()
            .filter_map(|u| round_key(u).map(|k| (k, u.id)))
            .into_group_map();
        Self {
            rounds,
            resolved: HashSet::new(),
        }
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Members of the unit's round, or `None` if the round was already handled.
    pub fn claim(&mut self, unit: &SessionUnit) -> Option<Vec<UnitId>> {
        let key = round_key(unit)?;
        if !self.resolved.insert(key.clone()) {
            return None;
        }
        self.rounds.get(&key).cloned()
    }
}

/// Finds the first slot where every member fits and commits them all there.
pub fn place_round(
    members: &[&SessionUnit],
    checker: &Checker<'_>,
    pool: &RoomPool,
    state: &mut BookingState,
) -> Result<Vec<Booking>, ConflictReason> {
    let Some(first) = members.first() else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::with_capacity(members.len());
    for member in members {
        let rooms = pool.candidates(
            member.category,
            member.required_capacity,
            checker.large_room_threshold,
        );
        if rooms.is_empty() {
            return Err(ConflictReason::CapacityMismatch);
        }
        candidates.push(rooms);
    }

    let mut blocking = ConflictReason::SlotExhausted;
    for slot in checker.catalog.eligible(first.duration) {
        match pick_rooms(members, &candidates, slot.index, checker, pool, state) {
            Ok(picks) => {
                let mut bookings = Vec::with_capacity(picks.len());
                for (member, room) in members.iter().zip(picks) {
                    state.commit(member, slot, room);
                    bookings.push(Booking {
                        unit: member.id,
                        slot: slot.index,
                        room,
                    });
                }
                debug!(
                    "Basket {} committed {} members at {}.",
                    first.basket.as_deref().unwrap_or("?"),
                    members.len(),
                    slot
                );
                return Ok(bookings);
            }
            Err(reason) => blocking = reason,
        }
    }
    Err(blocking)
}

// check phase only: nothing in `state` changes here
fn pick_rooms(
    members: &[&SessionUnit],
    candidates: &[Vec<RoomIndex>],
    slot: SlotIndex,
    checker: &Checker<'_>,
    pool: &RoomPool,
    state: &BookingState,
) -> Result<Vec<RoomIndex>, ConflictReason> {
    let slot = checker.catalog.get(slot);
    let mut picks: Vec<RoomIndex> = Vec::with_capacity(members.len());
    for (i, member) in members.iter().enumerate() {
        if members[..i].iter().any(|m| m.faculty == member.faculty) {
            trace!("Basket member {} shares a lecturer at {}.", member.id, slot);
            return Err(ConflictReason::FacultyConflict);
        }
        let mut last = ConflictReason::RoomConflict;
        let mut chosen = None;
        for &room in &candidates[i] {
            if let Err(reason) = checker.check(member, slot, room, pool.get(room), state) {
                last = reason;
                continue;
            }
            if picks.contains(&room) {
                last = ConflictReason::RoomConflict;
                continue;
            }
            chosen = Some(room);
            break;
        }
        match chosen {
            Some(room) => picks.push(room),
            None => {
                trace!("Basket member {} blocked at {}: {}.", member.id, slot, last);
                return Err(last);
            }
        }
    }
    Ok(picks)
}
