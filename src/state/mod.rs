//! Countdown state types
//!
//! Lifecycle, remaining time, target parsing, the view model the
//! front-ends render, and the HTTP server's shared state.

pub mod app_state;
pub mod remaining;
pub mod run_state;
pub mod target;
pub mod view;

// Re-export main types
pub use app_state::AppState;
pub use remaining::{DisplayFields, RemainingDuration};
pub use run_state::{MessageCategory, RunState};
pub use target::{format_datetime_local, TargetInstant};
pub use view::WidgetView;
