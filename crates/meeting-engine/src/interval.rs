//! Half-open time-of-day interval arithmetic within a single day.
//!
//! Every operation here treats an interval as `[start, end)`. Subtraction walks a
//! cursor across the window the same way free-slot computation walks a calendar:
//! sort the busy blocks, emit the gap before each one, and advance past it.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range of wall-clock time within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeInterval {
    #[serde(deserialize_with = "crate::config::deserialize_time")]
    pub start: NaiveTime,
    #[serde(deserialize_with = "crate::config::deserialize_time")]
    pub end: NaiveTime,
}

impl TimeInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Length of the interval in whole minutes. Zero for degenerate intervals.
    pub fn duration_minutes(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_minutes()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `time` falls inside `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Subtract busy intervals from a window, returning the free remainder.
///
/// `busy` should already be clamped into `window` (see [`clamp_to_window`]); it
/// may be unsorted and may overlap. Degenerate busy intervals are skipped, and
/// overlapping ones merge implicitly as the cursor only ever moves forward.
/// The result is sorted, disjoint and contains no empty intervals.
pub fn subtract(window: TimeInterval, busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted: Vec<TimeInterval> = busy.iter().copied().filter(|b| !b.is_empty()).collect();
    sorted.sort_by_key(|b| (b.start, b.end));

    let mut free = Vec::new();
    let mut cursor = window.start;

    for b in &sorted {
        if b.start > cursor {
            free.push(TimeInterval::new(cursor, b.start.min(window.end)));
        }
        cursor = cursor.max(b.end);
        if cursor >= window.end {
            break;
        }
    }

    if cursor < window.end {
        free.push(TimeInterval::new(cursor, window.end));
    }

    free.retain(|f| !f.is_empty());
    free
}

/// Intersect `interval` with `window`. Returns `None` when nothing overlaps.
pub fn clamp_to_window(interval: TimeInterval, window: TimeInterval) -> Option<TimeInterval> {
    let clamped = TimeInterval::new(interval.start.max(window.start), interval.end.min(window.end));
    if clamped.is_empty() {
        None
    } else {
        Some(clamped)
    }
}

/// Merge overlapping or adjacent intervals into a sorted, disjoint list.
pub fn merge(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted: Vec<TimeInterval> =
        intervals.iter().copied().filter(|i| !i.is_empty()).collect();
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }
    merged
}

/// Minutes elapsed since midnight, dropping seconds.
pub(crate) fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

/// Round down to the start of the minute.
pub(crate) fn floor_minute(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(time)
}

/// Round up to the next whole minute. Callers keep `time` at or below a
/// whole-minute bound no later than 23:59, so this never wraps past midnight.
pub(crate) fn ceil_minute(time: NaiveTime) -> NaiveTime {
    let floored = floor_minute(time);
    if floored == time {
        time
    } else {
        floored + Duration::minutes(1)
    }
}

/// Whether `time` sits exactly on a minute boundary.
pub(crate) fn is_whole_minute(time: NaiveTime) -> bool {
    floor_minute(time) == time
}
