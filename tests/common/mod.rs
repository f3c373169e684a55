use chrono::{DateTime, Local, TimeDelta, TimeZone};
use countdown_widget::controller::Clock;
use tokio::time::Instant;

/// Wall clock that follows tokio's (pausable) time
#[derive(Debug, Clone)]
pub struct PausedClock {
    wall: DateTime<Local>,
    anchor: Instant,
}

impl PausedClock {
    /// Must be called inside a runtime with paused time
    pub fn at_base_time() -> Self {
        Self {
            wall: base_time(),
            anchor: Instant::now(),
        }
    }
}

impl Clock for PausedClock {
    fn now(&self) -> DateTime<Local> {
        let elapsed = TimeDelta::from_std(self.anchor.elapsed()).expect("elapsed fits");
        self.wall + elapsed
    }
}

/// 2025-01-15 10:00:00 local time
pub fn base_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
}
