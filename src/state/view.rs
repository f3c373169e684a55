//! Widget view model shared with the front-ends

use serde::{Deserialize, Serialize};

use super::{DisplayFields, MessageCategory, RunState};

/// Everything a front-end needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetView {
    /// Contents of the target date/time input
    pub target_input: String,
    pub display: DisplayFields,
    pub message: String,
    pub message_category: MessageCategory,
    /// Label of the start/restart trigger
    pub start_label: String,
    pub run_state: RunState,
}
