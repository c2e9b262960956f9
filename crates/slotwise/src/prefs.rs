//! Per-user scheduling preferences.
//!
//! The preference store itself lives outside this crate (keyed by user
//! identity, fetched however the host application likes); this is the value
//! shape the engine understands, with the firm-wide defaults applied when a
//! user has saved nothing.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Scheduling defaults for one identity.
///
/// All fields have sensible defaults, and `#[serde(default)]` lets stored
/// preference documents carry only the fields a user actually changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Start of the working day, wall clock.
    pub working_hours_start: NaiveTime,
    /// End of the working day, wall clock.
    pub working_hours_end: NaiveTime,
    /// IANA timezone the working hours are expressed in.
    pub timezone: String,
    /// Minutes kept free before an existing commitment.
    pub buffer_before_minutes: u32,
    /// Minutes kept free after an existing commitment.
    pub buffer_after_minutes: u32,
    /// Meeting length assumed when a request does not specify one.
    pub default_duration_minutes: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            working_hours_start: NaiveTime::from_hms_opt(8, 0, 0).expect("08:00 is a valid time"),
            working_hours_end: NaiveTime::from_hms_opt(18, 0, 0).expect("18:00 is a valid time"),
            timezone: "America/New_York".to_string(),
            buffer_before_minutes: 15,
            buffer_after_minutes: 10,
            default_duration_minutes: 60,
        }
    }
}
