//! Pick the best meeting times out of a day's moment counts.
//!
//! The sweep produces a count for every grid moment. Selection reduces that to
//! the highest count and the moments that reach it, and can further fold those
//! moments into contiguous intervals.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::interval::minute_of_day;
use crate::sweep::DayCounts;

/// Which shape of result the caller wants per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Every moment with a non-zero count.
    Counts,
    /// Only the moments reaching the day's highest count.
    Moments,
    /// Best moments folded into contiguous intervals.
    #[default]
    Intervals,
}

/// A contiguous run of best start moments.
///
/// `end` is the *last valid meeting start*, inclusive. The meeting booked at
/// `end` finishes at [`BestInterval::covered_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BestInterval {
    /// The last instant covered by a meeting that starts at `end`.
    pub fn covered_until(&self, duration_minutes: i64) -> NaiveTime {
        self.end + Duration::minutes(duration_minutes)
    }

    /// Every grid moment in the interval.
    pub fn moments(&self, granularity_minutes: u32) -> Vec<NaiveTime> {
        let step = i64::from(granularity_minutes.max(1));
        let span = minute_of_day(self.end) - minute_of_day(self.start);
        (0..=span / step)
            .map(|k| self.start + Duration::minutes(k * step))
            .collect()
    }
}

/// The best times on one day, in the shape chosen by [`OutputMode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum BestTimes {
    Counts(DayCounts),
    Moments(Vec<NaiveTime>),
    Intervals(Vec<BestInterval>),
}

impl BestTimes {
    pub fn is_empty(&self) -> bool {
        match self {
            BestTimes::Counts(c) => c.is_empty(),
            BestTimes::Moments(m) => m.is_empty(),
            BestTimes::Intervals(i) => i.is_empty(),
        }
    }
}

/// Availability for a single candidate day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// Highest number of participants who can all attend; 0 when nobody can.
    pub max_count: usize,
    pub best: BestTimes,
}

/// Highest count across the day, or 0 for an empty day.
pub fn max_count(counts: &DayCounts) -> usize {
    counts.values().copied().max().unwrap_or(0)
}

/// The day's highest count and every moment reaching it, in ascending order.
pub fn best_moments(counts: &DayCounts) -> (usize, Vec<NaiveTime>) {
    let max = max_count(counts);
    if max == 0 {
        return (0, Vec::new());
    }
    let moments = counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(&moment, _)| moment)
        .collect();
    (max, moments)
}

/// Fold moments into maximal contiguous intervals.
///
/// A new interval starts whenever consecutive moments are more than one
/// granularity step apart. Input order does not matter.
pub fn compress(moments: &[NaiveTime], granularity_minutes: u32) -> Vec<BestInterval> {
    let step = i64::from(granularity_minutes.max(1));
    let mut sorted = moments.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut intervals: Vec<BestInterval> = Vec::new();
    for moment in sorted {
        if let Some(last) = intervals.last_mut() {
            if minute_of_day(moment) - minute_of_day(last.end) <= step {
                last.end = moment;
                continue;
            }
        }
        intervals.push(BestInterval { start: moment, end: moment });
    }
    intervals
}

/// Reduce one day's counts to the requested output shape.
pub fn select_day(
    date: NaiveDate,
    counts: DayCounts,
    mode: OutputMode,
    granularity_minutes: u32,
) -> DayAvailability {
    let (max_count, moments) = best_moments(&counts);
    let best = match mode {
        OutputMode::Counts => BestTimes::Counts(counts),
        OutputMode::Moments => BestTimes::Moments(moments),
        OutputMode::Intervals => BestTimes::Intervals(compress(&moments, granularity_minutes)),
    };
    DayAvailability { date, max_count, best }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn interval_moments_follow_granularity() {
        let interval = BestInterval { start: t(9, 0), end: t(10, 0) };
        assert_eq!(interval.moments(30), vec![t(9, 0), t(9, 30), t(10, 0)]);
        assert_eq!(interval.moments(1).len(), 61);
    }

    #[test]
    fn covered_until_adds_duration() {
        let interval = BestInterval { start: t(9, 0), end: t(17, 0) };
        assert_eq!(interval.covered_until(60), t(18, 0));
    }

    #[test]
    fn empty_best_times() {
        assert!(BestTimes::Moments(vec![]).is_empty());
        assert!(!BestTimes::Intervals(vec![BestInterval { start: t(9, 0), end: t(9, 0) }])
            .is_empty());
    }
}
