//! Front-ends for the countdown widget
//!
//! The controller writes to a `WatchedView`; the terminal renderer and the
//! HTTP API read the resulting `WidgetView` snapshots.

pub mod terminal;
pub mod watched;

// Re-export main types
pub use terminal::{render_line, run_terminal};
pub use watched::WatchedView;
