//! Countdown controller module
//!
//! The controller owns the countdown lifecycle and talks to the outside world
//! only through the ports defined here.

pub mod countdown;
pub mod error;
pub mod ports;

// Re-export main types
pub use countdown::{
    CountdownController, COMPLETE_MESSAGE, IDLE_MESSAGE, RESTART_LABEL, RUNNING_MESSAGE,
    START_LABEL, STOPPED_MESSAGE,
};
pub use error::StartError;
pub use ports::{Clock, SystemClock, TickHandle, TickScheduler, UiPort};
