//! The availability computation entry point.
//!
//! Validates the caller's inputs, builds each participant's free schedule, sweeps
//! every candidate day, and selects the best times per day. The whole pipeline is
//! a pure function of its arguments: nothing is cached or shared between calls.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::schedule::{build_schedule, BusySource, ParticipantSchedule};
use crate::selector::{select_day, BestTimes, DayAvailability, OutputMode};
use crate::sweep::sweep_day;

/// The days one participant said they could make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSelection {
    pub participant: String,
    pub selected_days: Vec<NaiveDate>,
}

impl ParticipantSelection {
    pub fn new(participant: impl Into<String>, selected_days: Vec<NaiveDate>) -> Self {
        Self {
            participant: participant.into(),
            selected_days,
        }
    }
}

/// Per-day best meeting times for one computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityResult {
    /// One entry per distinct candidate day, in date order.
    pub days: Vec<DayAvailability>,
    pub required_duration_minutes: i64,
    pub granularity_minutes: u32,
    pub mode: OutputMode,
    /// Whether some invited participants have not answered yet. Their time is
    /// not part of the counts.
    pub has_pending: bool,
}

impl AvailabilityResult {
    pub fn day(&self, date: NaiveDate) -> Option<&DayAvailability> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Highest count over all days.
    pub fn global_max_count(&self) -> usize {
        self.days.iter().map(|d| d.max_count).max().unwrap_or(0)
    }

    /// Every start moment, across all days, that reaches the global maximum.
    pub fn global_best_moments(&self) -> Vec<NaiveDateTime> {
        let max = self.global_max_count();
        if max == 0 {
            return Vec::new();
        }

        self.days
            .iter()
            .filter(|d| d.max_count == max)
            .flat_map(|d| {
                let moments: Vec<NaiveTime> = match &d.best {
                    BestTimes::Counts(counts) => counts
                        .iter()
                        .filter(|(_, count)| **count == max)
                        .map(|(moment, _)| *moment)
                        .collect(),
                    BestTimes::Moments(moments) => moments.clone(),
                    BestTimes::Intervals(intervals) => intervals
                        .iter()
                        .flat_map(|i| i.moments(self.granularity_minutes))
                        .collect(),
                };
                moments.into_iter().map(move |m| d.date.and_time(m))
            })
            .collect()
    }

    pub fn with_pending(mut self, has_pending: bool) -> Self {
        self.has_pending = has_pending;
        self
    }
}

/// Build every participant's free schedule over the candidate days.
///
/// # Errors
/// Returns `EngineError::DuplicateParticipant` when two selections share an id,
/// `EngineError::DayNotCandidate` when a participant selected a day that is not
/// a candidate, plus any error from [`build_schedule`].
pub fn build_schedules<S>(
    config: &EngineConfig,
    candidate_days: &[NaiveDate],
    selections: &[ParticipantSelection],
    required_duration_minutes: i64,
    source: &S,
) -> Result<Vec<ParticipantSchedule>>
where
    S: BusySource + ?Sized,
{
    config.validate()?;
    if required_duration_minutes <= 0 {
        return Err(EngineError::InvalidDuration(required_duration_minutes));
    }

    let candidates: BTreeSet<NaiveDate> = candidate_days.iter().copied().collect();
    let mut seen = BTreeSet::new();
    for selection in selections {
        if !seen.insert(selection.participant.as_str()) {
            return Err(EngineError::DuplicateParticipant(selection.participant.clone()));
        }
        if let Some(day) = selection
            .selected_days
            .iter()
            .find(|d| !candidates.contains(d))
        {
            return Err(EngineError::DayNotCandidate {
                participant: selection.participant.clone(),
                day: *day,
            });
        }
    }

    selections
        .iter()
        .map(|s| {
            build_schedule(
                config,
                &s.participant,
                &s.selected_days,
                required_duration_minutes,
                source,
            )
        })
        .collect()
}

/// Find, for every candidate day, when the most participants can meet.
///
/// `source` supplies each participant's busy intervals. Days nobody can attend
/// are still reported, with `max_count == 0` and no best times.
///
/// # Errors
/// Returns `EngineError::InvalidDuration` for a non-positive duration,
/// `EngineError::InvalidWorkingHours` / `InvalidGranularity` / `InvalidTimezone`
/// for a bad config, `EngineError::InvalidBusyInterval` for a busy interval that
/// ends before it starts, `EngineError::DuplicateParticipant` for a repeated
/// participant id, and `EngineError::DayNotCandidate` when a selection strays
/// outside `candidate_days`.
pub fn compute_availability<S>(
    config: &EngineConfig,
    candidate_days: &[NaiveDate],
    selections: &[ParticipantSelection],
    required_duration_minutes: i64,
    source: &S,
    mode: OutputMode,
) -> Result<AvailabilityResult>
where
    S: BusySource + ?Sized,
{
    let schedules = build_schedules(
        config,
        candidate_days,
        selections,
        required_duration_minutes,
        source,
    )?;
    let days: BTreeSet<NaiveDate> = candidate_days.iter().copied().collect();

    debug!(
        days = days.len(),
        participants = schedules.len(),
        duration = required_duration_minutes,
        ?mode,
        "computing availability"
    );

    let days: Vec<DayAvailability> = days
        .into_iter()
        .map(|day| {
            let counts = sweep_day(config, day, &schedules, required_duration_minutes);
            let selected = select_day(day, counts, mode, config.granularity_minutes);
            debug!(%day, max_count = selected.max_count, "day selected");
            selected
        })
        .collect();

    Ok(AvailabilityResult {
        days,
        required_duration_minutes,
        granularity_minutes: config.granularity_minutes,
        mode,
        has_pending: false,
    })
}
