//! # meeting-engine
//!
//! Find the meeting times that the most participants can attend.
//!
//! Each participant brings the candidate days they picked and their existing
//! commitments. The engine subtracts those commitments from a working-hours
//! window, sweeps the resulting free intervals day by day, and reports for every
//! day the highest attendance and the start times (or contiguous ranges of start
//! times) that achieve it. Every call is a pure function of its inputs.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open time-of-day arithmetic (subtract, clamp, merge)
//! - [`schedule`] — Busy intervals → per-day free schedule for one participant
//! - [`sweep`] — Sweep line counting participants per candidate start moment
//! - [`selector`] — Best moments and contiguous best intervals for a day
//! - [`engine`] — `compute_availability` entry point
//! - [`config`] — Working hours, granularity and timezone
//! - [`request`] — JSON request shapes for CLI and WASM callers
//! - [`error`] — Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod interval;
pub mod request;
pub mod schedule;
pub mod selector;
pub mod sweep;

pub use config::EngineConfig;
pub use engine::{build_schedules, compute_availability, AvailabilityResult, ParticipantSelection};
pub use error::EngineError;
pub use interval::{clamp_to_window, merge, subtract, TimeInterval};
pub use request::AvailabilityRequest;
pub use schedule::{build_schedule, BusyInterval, BusySource, ParticipantSchedule};
pub use selector::{BestInterval, BestTimes, DayAvailability, OutputMode};
pub use sweep::{sweep_day, DayCounts};
