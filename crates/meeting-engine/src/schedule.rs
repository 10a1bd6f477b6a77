//! Build per-day free schedules for a single participant.
//!
//! Busy intervals arrive as absolute date-times and may run across midnight.
//! Each one is cut at day boundaries, clamped to the working-hours window, and
//! subtracted from that day's window. Free intervals too short to host the
//! meeting are dropped.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::interval::{ceil_minute, clamp_to_window, floor_minute, subtract, TimeInterval};

/// An existing commitment for one participant. May span several days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whether any part of this interval falls on `day`.
    ///
    /// An inverted interval touches every date between its two endpoints, so it
    /// still reaches [`build_schedule`] and is rejected there.
    pub fn touches(&self, day: NaiveDate) -> bool {
        let (first, last) = if self.start <= self.end {
            (self.start.date(), self.end.date())
        } else {
            (self.end.date(), self.start.date())
        };
        first <= day && day <= last
    }
}

/// Supplies a participant's busy intervals for a set of days.
///
/// The engine never fetches anything itself; implementations hand over data that
/// is already materialized. Returned intervals may overlap and may extend past
/// the requested days.
pub trait BusySource {
    fn busy_intervals(&self, participant: &str, days: &[NaiveDate]) -> Vec<BusyInterval>;
}

impl BusySource for HashMap<String, Vec<BusyInterval>> {
    fn busy_intervals(&self, participant: &str, days: &[NaiveDate]) -> Vec<BusyInterval> {
        self.get(participant)
            .map(|intervals| {
                intervals
                    .iter()
                    .filter(|b| days.iter().any(|d| b.touches(*d)))
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One participant's free time on each of their selected days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantSchedule {
    pub participant: String,
    pub selected_days: BTreeSet<NaiveDate>,
    /// Free intervals per selected day, sorted and disjoint, each at least the
    /// required duration long. A selected day with no usable time maps to an
    /// empty list; days that were not selected are absent.
    pub availability: BTreeMap<NaiveDate, Vec<TimeInterval>>,
}

impl ParticipantSchedule {
    pub fn selects(&self, day: NaiveDate) -> bool {
        self.selected_days.contains(&day)
    }

    /// Free intervals on `day`, or `None` if the day was not selected.
    pub fn free_on(&self, day: NaiveDate) -> Option<&[TimeInterval]> {
        self.availability.get(&day).map(Vec::as_slice)
    }
}

/// Build a [`ParticipantSchedule`] from the participant's busy intervals.
///
/// `days` is deduplicated and becomes the schedule's domain. Busy time on days
/// outside it is ignored.
///
/// # Errors
/// Returns `EngineError::InvalidDuration` if `required_duration_minutes <= 0`,
/// `EngineError::InvalidBusyInterval` if the source yields an interval that
/// ends before it starts, and any error from [`EngineConfig::validate`].
pub fn build_schedule<S>(
    config: &EngineConfig,
    participant: &str,
    days: &[NaiveDate],
    required_duration_minutes: i64,
    source: &S,
) -> Result<ParticipantSchedule>
where
    S: BusySource + ?Sized,
{
    config.validate()?;
    if required_duration_minutes <= 0 {
        return Err(EngineError::InvalidDuration(required_duration_minutes));
    }

    let window = config.working_hours;
    let selected_days: BTreeSet<NaiveDate> = days.iter().copied().collect();
    let domain: Vec<NaiveDate> = selected_days.iter().copied().collect();

    let mut busy_by_day: BTreeMap<NaiveDate, Vec<TimeInterval>> = BTreeMap::new();
    for busy in source.busy_intervals(participant, &domain) {
        if busy.end < busy.start {
            return Err(EngineError::InvalidBusyInterval {
                participant: participant.to_string(),
                start: busy.start,
                end: busy.end,
            });
        }
        for (day, piece) in split_by_day(&busy, window, &selected_days) {
            busy_by_day.entry(day).or_default().push(piece);
        }
    }

    let availability: BTreeMap<NaiveDate, Vec<TimeInterval>> = selected_days
        .iter()
        .map(|day| {
            let busy = busy_by_day.get(day).map(Vec::as_slice).unwrap_or(&[]);
            let free: Vec<TimeInterval> = subtract(window, busy)
                .into_iter()
                .filter(|f| f.duration_minutes() >= required_duration_minutes)
                .collect();
            trace!(participant, %day, busy = busy.len(), free = free.len(), "built day schedule");
            (*day, free)
        })
        .collect();

    Ok(ParticipantSchedule {
        participant: participant.to_string(),
        selected_days,
        availability,
    })
}

/// Cut a busy interval into per-day pieces clamped to the working window.
///
/// The first day runs from the busy start, the last day up to the busy end, and
/// any day in between is blocked for the whole window. Only days in `domain`
/// produce pieces. Partial minutes widen outward.
fn split_by_day(
    busy: &BusyInterval,
    window: TimeInterval,
    domain: &BTreeSet<NaiveDate>,
) -> Vec<(NaiveDate, TimeInterval)> {
    let first = busy.start.date();
    let last = busy.end.date();

    domain
        .range(first..=last)
        .filter_map(|&day| {
            let start = if day == first { busy.start.time() } else { window.start };
            let end = if day == last { busy.end.time() } else { window.end };
            clamp_to_window(TimeInterval::new(start, end), window).map(|piece| {
                (
                    day,
                    TimeInterval::new(floor_minute(piece.start), ceil_minute(piece.end)),
                )
            })
        })
        .collect()
}
