//! Weekly university timetable generation.
//!
//! Courses are expanded into session units, ordered by priority and placed
//! greedily into (slot, room) pairs in a single deterministic pass. Elective
//! baskets are placed as atomic rounds. Anything that cannot be placed is
//! reported as a conflict rather than failing the run.

pub mod basket;
pub mod catalog;
pub mod config;
pub mod constraints;
pub mod data;
pub mod error;
pub mod expander;
pub mod model;
pub mod ordering;
pub mod report;
pub mod rooms;
pub mod server;
pub mod solver;
pub mod state;
pub mod validation;

pub use config::{DailyLimitPolicy, SchedulerConfig};
pub use data::{SchedulingInput, SchedulingOutput};
pub use error::ValidationError;
pub use model::{Booking, ConflictReason, ConflictRecord, Timetable};
pub use solver::{generate, solve};
