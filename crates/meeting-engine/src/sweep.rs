//! Per-day sweep line over participants' free intervals.
//!
//! A free interval `[s, e)` can host a meeting of length `d` starting anywhere in
//! `[s, e - d]`. The sweep turns each such start-window into a START event at `s`
//! and an END event one minute after `e - d`, then walks the events in time order
//! keeping a running count. Between two consecutive event times the count is
//! constant, and it equals the number of participants free for the whole
//! `[t, t + d)` at every `t` in that segment. Grid moments inside each segment
//! are recorded with that count.
//!
//! At equal timestamps END events are processed before START events, so two
//! windows that merely touch are never counted together.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::trace;

use crate::config::EngineConfig;
use crate::interval::{clamp_to_window, minute_of_day, TimeInterval};
use crate::schedule::ParticipantSchedule;

/// Start moment → number of participants free for the whole meeting from there.
/// Moments nobody can attend are absent.
pub type DayCounts = BTreeMap<NaiveTime, usize>;

/// Sweep-line marker kind. `End` orders before `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    End,
    Start,
}

/// A single sweep-line marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeEvent {
    pub time: NaiveTime,
    pub kind: EventKind,
}

/// Count, for every grid moment of `day`, how many participants could attend a
/// meeting of `required_duration_minutes` starting then.
///
/// Only schedules that selected `day` contribute. The result covers moments in
/// `[work_start, work_end - duration]` aligned to the configured granularity.
/// A day with no usable free time yields an empty map.
pub fn sweep_day(
    config: &EngineConfig,
    day: NaiveDate,
    schedules: &[ParticipantSchedule],
    required_duration_minutes: i64,
) -> DayCounts {
    let window = config.working_hours;
    let mut counts = DayCounts::new();

    if required_duration_minutes <= 0 || window.duration_minutes() < required_duration_minutes {
        return counts;
    }

    let events = collect_events(window, day, schedules, required_duration_minutes);
    let grid = Grid {
        origin: window.start,
        step: i64::from(config.granularity_minutes.max(1)),
        latest: window.end - Duration::minutes(required_duration_minutes),
    };

    let mut available = 0usize;
    let mut cursor = window.start;

    for event in &events {
        if event.time > window.end {
            break;
        }
        if event.time > cursor {
            grid.record(cursor, event.time, available, &mut counts);
            cursor = event.time;
        }
        match event.kind {
            EventKind::Start => available += 1,
            EventKind::End => available = available.saturating_sub(1),
        }
    }
    grid.record(cursor, window.end, available, &mut counts);

    trace!(%day, events = events.len(), moments = counts.len(), "swept day");
    counts
}

/// Build the sorted START/END events for every selected participant's
/// start-windows on `day`.
fn collect_events(
    window: TimeInterval,
    day: NaiveDate,
    schedules: &[ParticipantSchedule],
    required_duration_minutes: i64,
) -> Vec<TimeEvent> {
    let duration = Duration::minutes(required_duration_minutes);
    let one_minute = Duration::minutes(1);

    let mut events: Vec<TimeEvent> = schedules
        .iter()
        .filter(|s| s.selects(day))
        .flat_map(|s| s.free_on(day).unwrap_or(&[]).iter())
        .filter_map(|free| clamp_to_window(*free, window))
        .filter(|free| free.duration_minutes() >= required_duration_minutes)
        .flat_map(|free| {
            [
                TimeEvent { time: free.start, kind: EventKind::Start },
                TimeEvent { time: free.end - duration + one_minute, kind: EventKind::End },
            ]
        })
        .collect();

    events.sort();
    events
}

/// Candidate start moments: `origin + k * step`, never later than `latest`.
struct Grid {
    origin: NaiveTime,
    step: i64,
    latest: NaiveTime,
}

impl Grid {
    /// Record `count` for every grid moment in `[from, to)`.
    fn record(&self, from: NaiveTime, to: NaiveTime, count: usize, counts: &mut DayCounts) {
        if count == 0 || from >= to {
            return;
        }
        let origin = minute_of_day(self.origin);
        let end = minute_of_day(to);
        let latest = minute_of_day(self.latest);
        let first_k = (minute_of_day(from) - origin + self.step - 1)
            .div_euclid(self.step)
            .max(0);

        let mut minute = origin + first_k * self.step;
        while minute < end && minute <= latest {
            counts.insert(self.origin + Duration::minutes(minute - origin), count);
            minute += self.step;
        }
    }
}
