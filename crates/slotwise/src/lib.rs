//! # slotwise
//!
//! Calendar availability engine: turn one day of raw calendar events into
//! ranked free slots, and find the meeting windows an attendee list shares.
//!
//! The engine owns no network client. Callers inject a [`CalendarSource`]
//! (anything that can list events for an identity and a window) and get two
//! operations back: [`AvailabilityEngine::find_available_slots`] ranks one
//! attendee's candidate slots for a working day by a time-of-day heuristic,
//! and [`AvailabilityEngine::find_common_slots`] intersects several
//! attendees' candidates, capped at five results.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slotwise::{AvailabilityEngine, Preferences, StaticSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> slotwise::Result<()> {
//! let engine = AvailabilityEngine::new(StaticSource::new());
//! let prefs = Preferences::default();
//!
//! // An empty calendar yields a single candidate at the start of the
//! // working day.
//! let slots = engine
//!     .find_available_slots(
//!         "pat@example.com",
//!         NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
//!         prefs.default_duration_minutes,
//!         prefs.working_hours_start,
//!         prefs.working_hours_end,
//!         prefs.buffer_before_minutes,
//!         prefs.buffer_after_minutes,
//!         &prefs.timezone,
//!     )
//!     .await?;
//!
//! assert_eq!(slots.len(), 1);
//! assert_eq!(slots[0].reason, "Early-morning slot");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`event`] - calendar events and validated status tags at the boundary
//! - [`interval`] - busy intervals and buffer padding
//! - [`finder`] - the single-calendar sweep and scoring heuristic
//! - [`engine`] - the source trait, the engine, and multi-attendee intersection
//! - [`prefs`] - per-user scheduling defaults
//! - [`error`] - error types

pub mod engine;
pub mod error;
pub mod event;
pub mod finder;
pub mod interval;
pub mod prefs;

pub use engine::{
    parse_timezone, AvailabilityEngine, CalendarSource, CommonSlot, StaticSource, MAX_COMMON_SLOTS,
};
pub use error::{Result, SlotError, SourceError};
pub use event::{CalendarEvent, EventStatus};
pub use finder::{find_slots, TimeSlot};
pub use interval::{padded_busy_intervals, BusyInterval};
pub use prefs::Preferences;
