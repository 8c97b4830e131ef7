//! Error types for event normalization.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::duration::DurationError;

/// Reasons an event cannot be normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A recurring event has no start to take its time of day from.
    #[error("recurring event {title:?} has no start time")]
    MissingStart { title: String },

    /// A recurring event has no occurrence length.
    #[error("recurring event {title:?} has no duration")]
    MissingDuration { title: String },

    /// The occurrence length could not be parsed.
    #[error("recurring event {title:?} has an invalid duration: {source}")]
    Duration {
        title: String,
        #[source]
        source: DurationError,
    },

    /// The resolved start falls in a daylight-saving gap.
    #[error("recurring event {title:?} resolves to nonexistent local time {local}")]
    NonexistentLocalTime { title: String, local: NaiveDateTime },

    /// Adding the duration overflowed the representable range.
    #[error("recurring event {title:?} ends out of range")]
    OutOfRange { title: String },
}

impl NormalizeError {
    /// Returns the title of the event that was rejected.
    pub fn title(&self) -> &str {
        match self {
            Self::MissingStart { title }
            | Self::MissingDuration { title }
            | Self::Duration { title, .. }
            | Self::NonexistentLocalTime { title, .. }
            | Self::OutOfRange { title } => title,
        }
    }
}
