//! Target instant parsing and formatting

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::controller::StartError;

/// Format used by the target input field (`YYYY-MM-DDTHH:mm`)
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DATETIME_LOCAL_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The absolute point in time the countdown runs towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInstant(DateTime<Local>);

impl TargetInstant {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self(instant)
    }

    /// Parse the target input field.
    ///
    /// Accepts local `YYYY-MM-DDTHH:mm`, local `YYYY-MM-DDTHH:mm:ss`, or an
    /// RFC 3339 timestamp with an explicit offset. Anything else, including
    /// local times skipped by a DST transition, is reported as a missing
    /// target.
    pub fn parse(input: &str) -> Result<Self, StartError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(StartError::MissingTarget);
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self(instant.with_timezone(&Local)));
        }

        [DATETIME_LOCAL_FORMAT, DATETIME_LOCAL_SECONDS_FORMAT]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .map(Self)
            .ok_or(StartError::MissingTarget)
    }

    pub fn instant(&self) -> &DateTime<Local> {
        &self.0
    }
}

/// Render an instant the way the target input field displays it
pub fn format_datetime_local(instant: &DateTime<Local>) -> String {
    instant.format(DATETIME_LOCAL_FORMAT).to_string()
}
