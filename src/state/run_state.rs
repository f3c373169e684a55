//! Countdown lifecycle and message categories

use serde::{Deserialize, Serialize};

/// Where the countdown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Stopped,
    Expired,
}

/// Visual category of the status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    #[default]
    None,
    Active,
    Expired,
}
