//! Error types for meeting-engine operations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error("Invalid working hours: start {start} must be before end {end}")]
    InvalidWorkingHours { start: NaiveTime, end: NaiveTime },

    #[error("Invalid granularity: must be at least 1 minute")]
    InvalidGranularity,

    #[error("Invalid busy interval for '{participant}': end {end} is before start {start}")]
    InvalidBusyInterval {
        participant: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Participant '{0}' appears more than once")]
    DuplicateParticipant(String),

    #[error("Selected day {day} for '{participant}' is not a candidate day")]
    DayNotCandidate { participant: String, day: NaiveDate },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid request JSON: {0}")]
    RequestJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
