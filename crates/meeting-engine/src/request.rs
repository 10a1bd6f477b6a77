//! Serde-friendly request shapes for callers that speak JSON.
//!
//! Dates and datetimes travel as strings. [`AvailabilityRequest::prepare`] parses
//! them into engine inputs, converting offset-qualified datetimes into the
//! configured timezone's wall time.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::{build_schedules, compute_availability, AvailabilityResult, ParticipantSelection};
use crate::error::{EngineError, Result};
use crate::schedule::{BusyInterval, ParticipantSchedule};
use crate::selector::OutputMode;

/// A meeting's availability question, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// `YYYY-MM-DD` dates the meeting could take place on.
    pub candidate_days: Vec<String>,
    pub duration_minutes: i64,
    /// Participants who have answered, with their selected days and busy time.
    #[serde(default)]
    pub participants: Vec<ParticipantInput>,
    /// Invited participants who have not answered yet.
    #[serde(default)]
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInput {
    pub id: String,
    pub selected_days: Vec<String>,
    #[serde(default)]
    pub busy: Vec<BusyInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInput {
    pub start: String,
    pub end: String,
}

/// A request with every string parsed, ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub candidate_days: Vec<NaiveDate>,
    pub selections: Vec<ParticipantSelection>,
    pub busy: HashMap<String, Vec<BusyInterval>>,
    pub duration_minutes: i64,
    pub has_pending: bool,
}

impl AvailabilityRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse every date and datetime.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidDate` / `InvalidDateTime` for unparsable
    /// values, `EngineError::InvalidTimezone` for a bad configured zone and
    /// `EngineError::DuplicateParticipant` when two entries share an `id`.
    pub fn prepare(&self, config: &EngineConfig) -> Result<PreparedRequest> {
        let tz = config.tz()?;

        let candidate_days = self
            .candidate_days
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>>>()?;

        let mut selections = Vec::with_capacity(self.participants.len());
        let mut busy = HashMap::with_capacity(self.participants.len());
        for p in &self.participants {
            let selected_days = p
                .selected_days
                .iter()
                .map(|d| parse_date(d))
                .collect::<Result<Vec<_>>>()?;
            let intervals = p
                .busy
                .iter()
                .map(|b| {
                    Ok(BusyInterval::new(
                        parse_datetime(&b.start, tz)?,
                        parse_datetime(&b.end, tz)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;

            if busy.insert(p.id.clone(), intervals).is_some() {
                return Err(EngineError::DuplicateParticipant(p.id.clone()));
            }
            selections.push(ParticipantSelection::new(p.id.clone(), selected_days));
        }

        Ok(PreparedRequest {
            candidate_days,
            selections,
            busy,
            duration_minutes: self.duration_minutes,
            has_pending: !self.pending.is_empty(),
        })
    }
}

impl PreparedRequest {
    pub fn compute(&self, config: &EngineConfig, mode: OutputMode) -> Result<AvailabilityResult> {
        compute_availability(
            config,
            &self.candidate_days,
            &self.selections,
            self.duration_minutes,
            &self.busy,
            mode,
        )
        .map(|r| r.with_pending(self.has_pending))
    }

    pub fn schedules(&self, config: &EngineConfig) -> Result<Vec<ParticipantSchedule>> {
        build_schedules(
            config,
            &self.candidate_days,
            &self.selections,
            self.duration_minutes,
            &self.busy,
        )
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse a datetime into wall-clock time.
///
/// RFC 3339 strings with an offset are converted into `tz`'s local time, or UTC
/// when no zone is given. Naive strings (`2026-03-16T14:00` or
/// `2026-03-16T14:00:00`) are taken as wall time unchanged.
pub fn parse_datetime(s: &str, tz: Option<Tz>) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(match tz {
            Some(tz) => dt.with_timezone(&tz).naive_local(),
            None => dt.naive_utc(),
        });
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| EngineError::InvalidDateTime(format!("'{}': {}", s, e)))
}
