//! Weekly slot catalog.
//!
//! Slots are kept sorted by (day, start, end) so that a slot's index is also
//! its position in the scan order used by the scheduler.

use crate::error::ValidationError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type SlotIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Length class of a slot; each session category needs exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum DurationClass {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1.5h")]
    NinetyMinutes,
    #[serde(rename = "2h")]
    TwoHours,
}

impl DurationClass {
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        match minutes {
            60 => Some(DurationClass::OneHour),
            90 => Some(DurationClass::NinetyMinutes),
            120 => Some(DurationClass::TwoHours),
            _ => None,
        }
    }
}

/// Session category, as required by a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum SessionCategory {
    Lecture,
    Tutorial,
    Practical,
}

impl SessionCategory {
    pub fn duration(self) -> DurationClass {
        match self {
            SessionCategory::Lecture => DurationClass::NinetyMinutes,
            SessionCategory::Tutorial => DurationClass::OneHour,
            SessionCategory::Practical => DurationClass::TwoHours,
        }
    }

    pub fn is_theory(self) -> bool {
        self != SessionCategory::Practical
    }
}

impl fmt::Display for SessionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One configured weekly interval, as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlotSpec {
    pub day: Day,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl SlotSpec {
    pub fn new(day: Day, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            day,
            start: at(start.0, start.1),
            end: at(end.0, end.1),
        }
    }
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: SlotIndex,
    pub day: Day,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration: DurationClass,
}

impl Slot {
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time_range())
    }
}

#[derive(Debug, Clone)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
    // overlapping[i] lists every slot sharing time with slot i, i included
    overlapping: Vec<Vec<SlotIndex>>,
}

impl SlotCatalog {
    pub fn new(specs: &[SlotSpec]) -> Result<Self, ValidationError> {
        let mut ordered = specs.to_vec();
        ordered.sort_by_key(|s| (s.day, s.start, s.end));
        ordered.dedup();

        let mut slots = Vec::with_capacity(ordered.len());
        for spec in ordered {
            let minutes = (spec.end - spec.start).num_minutes();
            let duration =
                DurationClass::from_minutes(minutes).ok_or_else(|| ValidationError::InvalidSlot {
                    day: spec.day.to_string(),
                    start: spec.start.format("%H:%M").to_string(),
                    end: spec.end.format("%H:%M").to_string(),
                    minutes,
                })?;
            slots.push(Slot {
                index: slots.len(),
                day: spec.day,
                start: spec.start,
                end: spec.end,
                duration,
            });
        }

        let overlapping = slots
            .iter()
            .map(|a| {
                slots
                    .iter()
                    .filter(|b| a.overlaps(b))
                    .map(|b| b.index)
                    .collect()
            })
            .collect();

        Ok(Self { slots, overlapping })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: SlotIndex) -> &Slot {
        &self.slots[index]
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots that can host the given duration class, in scan order.
    pub fn eligible(&self, duration: DurationClass) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |s| s.duration == duration)
    }

    pub fn overlapping(&self, index: SlotIndex) -> &[SlotIndex] {
        &self.overlapping[index]
    }
}

/// The standard teaching week: Monday to Friday, 14 slots per day.
pub fn default_week() -> Vec<SlotSpec> {
    let days = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];
    let lectures = [((9, 0), (10, 30)), ((11, 0), (12, 30)), ((14, 0), (15, 30)), ((16, 0), (17, 30))];
    let tutorials = [
        ((9, 0), (10, 0)),
        ((10, 30), (11, 30)),
        ((11, 30), (12, 30)),
        ((14, 0), (15, 0)),
        ((15, 30), (16, 30)),
        ((16, 30), (17, 30)),
    ];
    let practicals = [((9, 0), (11, 0)), ((11, 0), (13, 0)), ((14, 0), (16, 0)), ((16, 0), (18, 0))];

    days.iter()
        .flat_map(|&day| {
            lectures
                .iter()
                .chain(tutorials.iter())
                .chain(practicals.iter())
                .map(move |&(start, end)| SlotSpec::new(day, start, end))
        })
        .collect()
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(serde::de::Error::custom)
    }
}
