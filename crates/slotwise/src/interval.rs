//! Busy intervals and buffer padding.
//!
//! A busy interval is the padded footprint of one blocking calendar event:
//! the event itself plus the travel/decompression buffers around it. The
//! slot finder sweeps a sorted list of these; it never inspects raw events.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::CalendarEvent;

/// A half-open time range `[start, end)` during which an attendee cannot
/// take a new booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Build an interval, rejecting `start >= end`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidInterval`] for empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// The interval grown by the scheduling buffers: `buffer_before`
    /// minutes earlier and `buffer_after` minutes later.
    ///
    /// Padding only widens the range, so the result is always valid.
    pub fn padded(&self, buffer_before: u32, buffer_after: u32) -> BusyInterval {
        BusyInterval {
            start: self.start - Duration::minutes(i64::from(buffer_before)),
            end: self.end + Duration::minutes(i64::from(buffer_after)),
        }
    }

    /// Whether this interval overlaps `[start, end)`.
    ///
    /// Two half-open ranges overlap iff each starts before the other ends;
    /// touching endpoints do not count.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

/// Collect the padded busy intervals that constrain scheduling within
/// `[day_start, day_end)`.
///
/// Keeps only events whose status blocks bookings, pads each by the
/// buffers, discards padded intervals that never overlap the window (they
/// cannot constrain any in-window slot), and sorts by `(start, end)` so
/// ties on start time break deterministically.
///
/// # Errors
///
/// Returns [`SlotError::InvalidInterval`] if a blocking event reports
/// `start >= end`. Malformed source data is rejected loudly rather than
/// silently skipped; non-blocking events are never validated because they
/// are never read.
pub fn padded_busy_intervals(
    events: &[CalendarEvent],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    buffer_before: u32,
    buffer_after: u32,
) -> Result<Vec<BusyInterval>> {
    let mut intervals = Vec::new();

    for event in events {
        if !event.status.is_blocking() {
            continue;
        }
        let padded = BusyInterval::new(event.start, event.end)?.padded(buffer_before, buffer_after);
        if padded.overlaps(day_start, day_end) {
            intervals.push(padded);
        }
    }

    intervals.sort_by_key(|interval| (interval.start, interval.end));
    Ok(intervals)
}
