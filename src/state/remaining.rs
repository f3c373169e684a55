//! Remaining time decomposition

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Time left until the target, split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingDuration {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl RemainingDuration {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decompose a millisecond difference. Returns `None` once the target
    /// has been reached (`millis <= 0`).
    pub fn from_millis(millis: i64) -> Option<Self> {
        if millis <= 0 {
            return None;
        }

        Some(Self {
            days: (millis / MS_PER_DAY) as u64,
            hours: ((millis % MS_PER_DAY) / MS_PER_HOUR) as u32,
            minutes: ((millis % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((millis % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        })
    }

    /// Remaining time from `now` until `target`
    pub fn between<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> Option<Self> {
        Self::from_millis(target.clone().signed_duration_since(now.clone()).num_milliseconds())
    }

    /// Format each unit as zero-padded text
    pub fn display_fields(&self) -> DisplayFields {
        DisplayFields::new(self.days, self.hours, self.minutes, self.seconds)
    }
}

/// The four rendered display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl DisplayFields {
    /// Pad each value to at least two digits. Days are never truncated.
    pub fn new(days: u64, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            days: format!("{:02}", days),
            hours: format!("{:02}", hours),
            minutes: format!("{:02}", minutes),
            seconds: format!("{:02}", seconds),
        }
    }

    pub fn zeroed() -> Self {
        RemainingDuration::ZERO.display_fields()
    }
}

impl Default for DisplayFields {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Display for DisplayFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.days, self.hours, self.minutes, self.seconds)
    }
}
