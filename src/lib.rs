//! Countdown Widget - a countdown timer with terminal and HTTP front-ends
//!
//! A user picks a target date and time; the widget shows the remaining days,
//! hours, minutes and seconds, refreshing once per second until the target
//! is reached.

pub mod api;
pub mod config;
pub mod controller;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::{CountdownController, StartError, SystemClock};
pub use state::{AppState, WidgetView};
pub use tasks::{spawn_widget, WidgetHandle};
pub use utils::signals::shutdown_signal;
