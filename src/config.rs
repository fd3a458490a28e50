use crate::catalog::{self, SessionCategory, SlotSpec};
use serde::{Deserialize, Serialize};

/// Tunable policy for one scheduling run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    pub slots: Vec<SlotSpec>,
    pub daily_limit: DailyLimitPolicy,
    /// Units at or above this size need a large-tier room.
    pub large_room_threshold: u32,
    pub default_class_size: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            slots: catalog::default_week(),
            daily_limit: DailyLimitPolicy::default(),
            large_room_threshold: 100,
            default_class_size: 60,
        }
    }
}

/// How many sessions of one course may share a day, and which mixes are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyLimitPolicy {
    pub max_sessions_per_day: usize,
    pub forbid_repeated_category: bool,
    pub forbid_lecture_with_tutorial: bool,
}

impl Default for DailyLimitPolicy {
    fn default() -> Self {
        Self {
            max_sessions_per_day: 2,
            forbid_repeated_category: true,
            forbid_lecture_with_tutorial: false,
        }
    }
}

impl DailyLimitPolicy {
    /// Whether a course already holding `existing` sessions on a day may take `candidate` too.
    pub fn admits(&self, existing: &[SessionCategory], candidate: SessionCategory) -> bool {
        if existing.len() >= self.max_sessions_per_day {
            return false;
        }
        if self.forbid_repeated_category && existing.contains(&candidate) {
            return false;
        }
        if self.forbid_lecture_with_tutorial
            && candidate.is_theory()
            && existing.iter().any(|c| c.is_theory() && *c != candidate)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionCategory::*;

    #[test]
    fn default_policy_allows_two_distinct_categories() {
        let policy = DailyLimitPolicy::default();
        assert!(policy.admits(&[], Lecture));
        assert!(policy.admits(&[Lecture], Practical));
        assert!(policy.admits(&[Lecture], Tutorial));
        assert!(!policy.admits(&[Lecture], Lecture));
        assert!(!policy.admits(&[Lecture, Practical], Tutorial));
        assert!(!policy.admits(&[Lecture, Practical], Lecture));
    }

    #[test]
    fn strict_policy_keeps_theory_sessions_apart() {
        let policy = DailyLimitPolicy {
            forbid_lecture_with_tutorial: true,
            ..DailyLimitPolicy::default()
        };
        assert!(!policy.admits(&[Lecture], Tutorial));
        assert!(!policy.admits(&[Tutorial], Lecture));
        assert!(policy.admits(&[Tutorial], Practical));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{"dailyLimit":{"maxSessionsPerDay":3},"largeRoomThreshold":120}"#)
                .unwrap();
        assert_eq!(config.daily_limit.max_sessions_per_day, 3);
        assert!(config.daily_limit.forbid_repeated_category);
        assert_eq!(config.large_room_threshold, 120);
        assert_eq!(config.default_class_size, 60);
        assert_eq!(config.slots.len(), 70);
    }
}
