use crate::catalog::SessionCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RoomIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomTier {
    Large,
    Regular,
    Lab,
}

impl RoomTier {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "large" | "big" => Some(RoomTier::Large),
            "regular" | "classroom" => Some(RoomTier::Regular),
            "lab" | "laboratory" => Some(RoomTier::Lab),
            _ => None,
        }
    }

    /// Tier guessed from the room id and size when the catalog gives none.
    pub fn classify(id: &str, capacity: u32, large_threshold: u32) -> Self {
        let upper = id.to_ascii_uppercase();
        if upper.starts_with('L') || upper.contains("LAB") {
            RoomTier::Lab
        } else if capacity >= large_threshold {
            RoomTier::Large
        } else {
            RoomTier::Regular
        }
    }
}

impl fmt::Display for RoomTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomTier::Large => "large",
            RoomTier::Regular => "regular",
            RoomTier::Lab => "lab",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub capacity: u32,
    pub tier: RoomTier,
}

impl Room {
    /// Tier and size rule: practicals go to labs, large classes to large rooms,
    /// everything else to any non-lab room big enough.
    pub fn can_host(&self, category: SessionCategory, required: u32, large_threshold: u32) -> bool {
        let tier_ok = match category {
            SessionCategory::Practical => self.tier == RoomTier::Lab,
            _ if required >= large_threshold => self.tier == RoomTier::Large,
            _ => self.tier != RoomTier::Lab,
        };
        tier_ok && self.capacity >= required
    }
}

/// Rooms ordered smallest first, ties by id.
#[derive(Debug, Clone)]
pub struct RoomPool {
    rooms: Vec<Room>,
}

impl RoomPool {
    pub fn new(mut rooms: Vec<Room>) -> Self {
        rooms.sort_by(|a, b| a.capacity.cmp(&b.capacity).then_with(|| a.id.cmp(&b.id)));
        Self { rooms }
    }

    pub fn get(&self, index: RoomIndex) -> &Room {
        &self.rooms[index]
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn count_tier(&self, tier: RoomTier) -> usize {
        self.rooms.iter().filter(|r| r.tier == tier).count()
    }

    /// Rooms able to host the session, in selection order.
    pub fn candidates(
        &self,
        category: SessionCategory,
        required: u32,
        large_threshold: u32,
    ) -> Vec<RoomIndex> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.can_host(category, required, large_threshold))
            .map(|(i, _)| i)
            .collect()
    }
}
