//! Capabilities the countdown controller is driven through

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::state::{DisplayFields, MessageCategory};

/// The widget's input field, display fields, status message and start
/// trigger label.
pub trait UiPort {
    fn target_input(&self) -> String;
    fn set_target_input(&mut self, value: &str);
    fn set_display(&mut self, fields: &DisplayFields);
    fn set_message(&mut self, text: &str, category: MessageCategory);
    fn set_start_label(&mut self, label: &str);
}

/// Identifies one periodic tick registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Periodic tick source. Ticks are delivered back to the controller via
/// `CountdownController::on_tick` with the handle returned here.
pub trait TickScheduler {
    fn schedule(&mut self, every: Duration) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
