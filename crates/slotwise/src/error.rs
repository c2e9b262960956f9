//! Error types for availability computations.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Boxed error produced by [`CalendarSource`](crate::CalendarSource)
/// implementations. Sources own their own failure taxonomy (HTTP, auth,
/// parse); the engine wraps whatever they return in
/// [`SlotError::Source`] without inspecting it.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while computing availability.
#[derive(Error, Debug)]
pub enum SlotError {
    /// Requested meeting duration is zero minutes.
    #[error("Invalid duration: must be at least one minute")]
    InvalidDuration,

    /// The scheduling window is empty or inverted.
    #[error("Invalid window: {start} is not before {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The timezone name is not a known IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A wall-clock boundary falls inside a DST gap and names no instant.
    #[error("Local time {local} does not exist in {timezone} (DST gap)")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },

    /// A blocking calendar event reports an end at or before its start.
    #[error("Invalid busy interval: {start} is not before {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// An event status tag was not recognised.
    #[error("Unknown event status: {0}")]
    UnknownStatus(String),

    /// The calendar source failed while fetching events for an identity.
    #[error("Calendar source failed for {identity}")]
    Source {
        identity: String,
        #[source]
        source: SourceError,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, SlotError>;
