//! Engine configuration: working hours, enumeration granularity, timezone.
//!
//! The working-hours window is passed into every computation rather than baked
//! in, so one process can serve callers with different policies. Configs load
//! from TOML:
//!
//! ```toml
//! granularity_minutes = 15
//! timezone = "Europe/Berlin"
//!
//! [working_hours]
//! start = "08:30"
//! end = "17:00"
//! ```

use std::path::Path;

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::{is_whole_minute, TimeInterval};

/// Parameters shared by every availability computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Daily window considered eligible for scheduling, applied to every
    /// participant and every day.
    pub working_hours: TimeInterval,
    /// Spacing of candidate start moments, aligned to the window start.
    pub granularity_minutes: u32,
    /// IANA timezone that offset-qualified input datetimes are converted into.
    /// Naive datetimes are always taken as wall time.
    pub timezone: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_hours: TimeInterval::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            ),
            granularity_minutes: 1,
            timezone: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_working_hours(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.working_hours = TimeInterval::new(start, end);
        self
    }

    pub fn with_granularity(mut self, minutes: u32) -> Self {
        self.granularity_minutes = minutes;
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Check the window, granularity and timezone.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidWorkingHours` when the window is empty or its
    /// bounds are not whole minutes, `EngineError::InvalidGranularity` when the
    /// granularity is zero, and `EngineError::InvalidTimezone` for an unknown
    /// IANA name.
    pub fn validate(&self) -> Result<()> {
        let window = self.working_hours;
        if window.start >= window.end
            || !is_whole_minute(window.start)
            || !is_whole_minute(window.end)
        {
            return Err(EngineError::InvalidWorkingHours {
                start: window.start,
                end: window.end,
            });
        }
        if self.granularity_minutes == 0 {
            return Err(EngineError::InvalidGranularity);
        }
        self.tz()?;
        Ok(())
    }

    /// The configured timezone, parsed.
    pub fn tz(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
            })
            .transpose()
    }
}

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(s.to_string()))
}

pub(crate) fn deserialize_time<'de, D>(deserializer: D) -> std::result::Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time_of_day(&raw).map_err(serde::de::Error::custom)
}
