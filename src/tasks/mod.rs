//! Background tasks module
//!
//! The widget task that owns the countdown controller and the interval tasks
//! that feed it ticks.

pub mod ticker;
pub mod widget;

// Re-export main types
pub use ticker::TokioTickScheduler;
pub use widget::{spawn_widget, WidgetCommand, WidgetError, WidgetHandle};
