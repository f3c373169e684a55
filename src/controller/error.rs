//! Start validation errors

use thiserror::Error;

/// Reasons a start trigger is rejected. The display text is what the
/// message area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// Empty or unparseable target input
    #[error("Please select a target date and time")]
    MissingTarget,
    /// Target not strictly after the current time
    #[error("Target date must be in the future")]
    TargetInPast,
}
