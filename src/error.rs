use thiserror::Error;

/// Reasons a scheduling input is rejected before the run starts.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("course #{index} has no course code")]
    MissingCourseCode { index: usize },

    #[error("course {code}: missing required field `{field}`")]
    MissingField { code: String, field: &'static str },

    #[error("course {code}: `{field}` must not be negative, got {value}")]
    NegativeCount {
        code: String,
        field: &'static str,
        value: i64,
    },

    #[error("course {code}: `{field}` is not a valid number: {value:?}")]
    NotANumber {
        code: String,
        field: &'static str,
        value: String,
    },

    #[error("course {code}: semester must be at least 1, got {value}")]
    InvalidSemester { code: String, value: i64 },

    #[error("course {code}: elective flag must be \"T\" or \"F\", got {value:?}")]
    InvalidElectiveFlag { code: String, value: String },

    #[error("room {room}: seating capacity must be a positive whole number, got {value:?}")]
    InvalidCapacity { room: String, value: String },

    #[error("room {room} is listed more than once")]
    DuplicateRoom { room: String },

    #[error("room {room}: unknown tier {tier:?}")]
    UnknownTier { room: String, tier: String },

    #[error("slot {day} {start}-{end}: {minutes} minutes matches no session category")]
    InvalidSlot {
        day: String,
        start: String,
        end: String,
        minutes: i64,
    },

    #[error("malformed input: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Malformed(err.to_string())
    }
}
