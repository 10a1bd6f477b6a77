//! Tests for half-open interval arithmetic: subtract, clamp, merge.

use chrono::NaiveTime;
use meeting_engine::interval::{clamp_to_window, merge, subtract, TimeInterval};

/// Helper to build a time of day.
fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Helper to build an interval from hour/minute pairs.
fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
    TimeInterval::new(t(sh, sm), t(eh, em))
}

fn working_day() -> TimeInterval {
    iv(9, 0, 18, 0)
}

// ── subtract ────────────────────────────────────────────────────────────────

#[test]
fn busy_in_the_middle_leaves_two_pieces() {
    let free = subtract(working_day(), &[iv(12, 0, 13, 0)]);

    assert_eq!(free, vec![iv(9, 0, 12, 0), iv(13, 0, 18, 0)]);
}

#[test]
fn busy_touching_window_start_leaves_one_piece() {
    let free = subtract(working_day(), &[iv(9, 0, 10, 0)]);

    assert_eq!(free, vec![iv(10, 0, 18, 0)]);
}

#[test]
fn busy_touching_window_end_leaves_one_piece() {
    let free = subtract(working_day(), &[iv(17, 0, 18, 0)]);

    assert_eq!(free, vec![iv(9, 0, 17, 0)]);
}

#[test]
fn busy_covering_window_leaves_nothing() {
    assert!(subtract(working_day(), &[working_day()]).is_empty());
}

#[test]
fn no_busy_returns_window_unchanged() {
    assert_eq!(subtract(working_day(), &[]), vec![working_day()]);
}

#[test]
fn unsorted_overlapping_busy_merges_implicitly() {
    // 10:00-11:30 and 11:00-12:00 overlap, 13:00-14:00 arrives first.
    let busy = vec![iv(13, 0, 14, 0), iv(10, 0, 11, 30), iv(11, 0, 12, 0)];

    let free = subtract(working_day(), &busy);

    assert_eq!(
        free,
        vec![iv(9, 0, 10, 0), iv(12, 0, 13, 0), iv(14, 0, 18, 0)]
    );
}

#[test]
fn nested_busy_does_not_move_cursor_back() {
    let busy = vec![iv(10, 0, 15, 0), iv(11, 0, 12, 0)];

    let free = subtract(working_day(), &busy);

    assert_eq!(free, vec![iv(9, 0, 10, 0), iv(15, 0, 18, 0)]);
}

#[test]
fn degenerate_busy_is_skipped() {
    // Zero-length and inverted intervals block nothing.
    let busy = vec![iv(11, 0, 11, 0), iv(14, 0, 13, 0)];

    assert_eq!(subtract(working_day(), &busy), vec![working_day()]);
}

#[test]
fn adjacent_busy_leaves_no_zero_length_gap() {
    let busy = vec![iv(10, 0, 11, 0), iv(11, 0, 12, 0)];

    let free = subtract(working_day(), &busy);

    assert_eq!(free, vec![iv(9, 0, 10, 0), iv(12, 0, 18, 0)]);
}

// ── clamp_to_window ─────────────────────────────────────────────────────────

#[test]
fn clamp_inside_is_unchanged() {
    assert_eq!(
        clamp_to_window(iv(10, 0, 11, 0), working_day()),
        Some(iv(10, 0, 11, 0))
    );
}

#[test]
fn clamp_trims_overhang_on_both_sides() {
    assert_eq!(
        clamp_to_window(iv(7, 0, 20, 0), working_day()),
        Some(working_day())
    );
    assert_eq!(
        clamp_to_window(iv(8, 0, 9, 30), working_day()),
        Some(iv(9, 0, 9, 30))
    );
}

#[test]
fn clamp_disjoint_is_none() {
    assert_eq!(clamp_to_window(iv(19, 0, 20, 0), working_day()), None);
    // Touching the window edge is still disjoint for half-open intervals.
    assert_eq!(clamp_to_window(iv(8, 0, 9, 0), working_day()), None);
}

// ── merge ───────────────────────────────────────────────────────────────────

#[test]
fn merge_joins_overlapping_and_adjacent() {
    let merged = merge(&[
        iv(13, 0, 14, 0),
        iv(9, 0, 10, 0),
        iv(9, 30, 11, 0),
        iv(11, 0, 11, 30),
    ]);

    assert_eq!(merged, vec![iv(9, 0, 11, 30), iv(13, 0, 14, 0)]);
}

#[test]
fn merge_drops_empty_intervals() {
    assert!(merge(&[iv(10, 0, 10, 0)]).is_empty());
}

// ── TimeInterval ────────────────────────────────────────────────────────────

#[test]
fn duration_in_whole_minutes() {
    assert_eq!(working_day().duration_minutes(), 540);
    assert_eq!(iv(10, 0, 9, 0).duration_minutes(), 0);
}

#[test]
fn contains_is_half_open() {
    let interval = iv(10, 0, 11, 0);
    assert!(interval.contains(t(10, 0)));
    assert!(interval.contains(t(10, 59)));
    assert!(!interval.contains(t(11, 0)));
}
