//! Calendar event model at the source boundary.
//!
//! Events arrive from an external calendar backend (Microsoft Graph, Google,
//! a fixture file) and are deserialised once into a concrete tagged shape
//! before any scheduling math looks at them. Provider status strings are
//! folded into [`EventStatus`] here; nothing downstream ever matches on a
//! raw string.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;

/// Free/busy status of a calendar event.
///
/// `Busy`, `Tentative`, and `OutOfOffice` block new bookings; `Free` events
/// (shown as "transparent" by some providers) occupy calendar space without
/// claiming the attendee's time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventStatus {
    /// Confirmed commitment.
    #[default]
    Busy,
    /// Unconfirmed invitation; treated as blocking so a proposed slot never
    /// collides with a meeting the attendee may yet accept.
    Tentative,
    /// Out of office. Graph reports this as `oof` on the wire.
    #[serde(alias = "oof")]
    OutOfOffice,
    /// Non-blocking placeholder.
    #[serde(alias = "transparent")]
    Free,
}

impl EventStatus {
    /// Whether an event with this status blocks new bookings.
    pub fn is_blocking(self) -> bool {
        !matches!(self, EventStatus::Free)
    }
}

impl FromStr for EventStatus {
    type Err = SlotError;

    /// Parse a provider status tag, case-insensitively.
    ///
    /// Accepts the canonical names plus the spellings seen on real wires:
    /// `oof` and `out-of-office` for [`EventStatus::OutOfOffice`],
    /// `transparent` for [`EventStatus::Free`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "busy" => Ok(EventStatus::Busy),
            "tentative" => Ok(EventStatus::Tentative),
            "oof" | "outofoffice" | "out-of-office" => Ok(EventStatus::OutOfOffice),
            "free" | "transparent" => Ok(EventStatus::Free),
            _ => Err(SlotError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventStatus::Busy => "busy",
            EventStatus::Tentative => "tentative",
            EventStatus::OutOfOffice => "oof",
            EventStatus::Free => "free",
        };
        f.write_str(name)
    }
}

/// A calendar event as reported by a [`CalendarSource`](crate::CalendarSource).
///
/// Timestamps are absolute UTC instants. Providers deliver events in
/// whatever zone they like; sources normalise before handing them over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Provider-assigned identifier. Opaque, may be empty for synthetic
    /// events.
    #[serde(default)]
    pub id: String,
    /// Human-readable subject line.
    #[serde(default)]
    pub subject: String,
    /// Start instant, inclusive.
    pub start: DateTime<Utc>,
    /// End instant, exclusive.
    pub end: DateTime<Utc>,
    /// Free/busy status. Providers that omit it mean `Busy`.
    #[serde(default)]
    pub status: EventStatus,
}
