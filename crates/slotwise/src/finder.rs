//! Single-calendar slot finding.
//!
//! Sweeps the padded busy intervals of one working day with a cursor and
//! emits one duration-sized candidate at the left edge of each gap that
//! fits, then ranks the candidates by a time-of-day heuristic. The sweep is
//! a pure function of its inputs; fetching events and resolving working
//! hours to instants happen upstream in [`engine`](crate::engine).

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::CalendarEvent;
use crate::interval::padded_busy_intervals;

/// A candidate meeting slot of exactly the requested duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start instant, inclusive.
    pub start: DateTime<Utc>,
    /// End instant, exclusive. Always `start + duration`.
    pub end: DateTime<Utc>,
    /// Heuristic desirability in `[0.0, 1.0]`, higher is better.
    pub score: f64,
    /// Human-readable label for why the heuristic likes (or merely
    /// tolerates) this start time.
    pub reason: String,
}

/// Find candidate slots of `duration_minutes` within one working day.
///
/// Only events whose status blocks bookings participate; each is padded by
/// `buffer_before`/`buffer_after` minutes. The cursor starts at `day_start`
/// and advances monotonically over the sorted intervals, emitting at most
/// one candidate per gap, anchored at the gap's left edge. A trailing
/// candidate covers the gap after the last busy interval.
///
/// `tz` affects scoring only: the heuristic reads the candidate's start
/// hour on the attendee's wall clock. `day_start` and `day_end` are already
/// absolute instants and are not reinterpreted.
///
/// The returned list is sorted by score descending; equal scores keep
/// chronological order. Callers wanting a time-ordered list can re-sort by
/// `start`.
///
/// # Arguments
///
/// * `events` - the attendee's raw calendar covering at least the window
/// * `day_start` - start of the scheduling window, inclusive
/// * `day_end` - end of the scheduling window, exclusive
/// * `duration_minutes` - meeting length, must be nonzero
/// * `buffer_before` - minutes kept free before each commitment
/// * `buffer_after` - minutes kept free after each commitment
/// * `tz` - timezone of the attendee's wall clock, for scoring
///
/// # Errors
///
/// * [`SlotError::InvalidDuration`] if `duration_minutes` is zero
/// * [`SlotError::InvalidWindow`] if `day_start >= day_end`
/// * [`SlotError::InvalidInterval`] if a blocking event is empty or
///   inverted
pub fn find_slots(
    events: &[CalendarEvent],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    duration_minutes: u32,
    buffer_before: u32,
    buffer_after: u32,
    tz: Tz,
) -> Result<Vec<TimeSlot>> {
    if duration_minutes == 0 {
        return Err(SlotError::InvalidDuration);
    }
    if day_start >= day_end {
        return Err(SlotError::InvalidWindow {
            start: day_start,
            end: day_end,
        });
    }

    let busy = padded_busy_intervals(events, day_start, day_end, buffer_before, buffer_after)?;
    let duration = Duration::minutes(i64::from(duration_minutes));

    let mut slots = Vec::new();
    let mut cursor = day_start;

    for interval in &busy {
        if cursor + duration <= interval.start {
            slots.push(slot_at(cursor, duration, tz));
        }
        // Padded intervals may overlap each other; the cursor never moves
        // backward.
        cursor = cursor.max(interval.end);
    }

    // Trailing gap between the last busy interval and the end of the day.
    if cursor + duration <= day_end {
        slots.push(slot_at(cursor, duration, tz));
    }

    // Best first. The sort is stable, so equal scores keep the
    // chronological order the sweep produced.
    slots.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(slots)
}

fn slot_at(start: DateTime<Utc>, duration: Duration, tz: Tz) -> TimeSlot {
    let hour = start.with_timezone(&tz).hour();
    TimeSlot {
        start,
        end: start + duration,
        score: score_for_hour(hour),
        reason: reason_for_hour(hour).to_string(),
    }
}

/// Numeric desirability of a start hour on the attendee's wall clock.
///
/// Mid-morning beats mid-afternoon beats the shoulders of the day. Kept
/// separate from [`reason_for_hour`]: the two band tables overlap but do
/// not align (hour 13 scores 0.7 yet reads as a generic slot), and that
/// mismatch is part of the contract.
fn score_for_hour(hour: u32) -> f64 {
    if (9..=11).contains(&hour) {
        1.0
    } else if (14..=16).contains(&hour) {
        0.9
    } else if hour == 8 || hour == 13 {
        0.7
    } else {
        0.5
    }
}

/// Human-readable label for a start hour on the attendee's wall clock.
fn reason_for_hour(hour: u32) -> &'static str {
    if (9..=11).contains(&hour) {
        "Prime morning focus time"
    } else if (14..=16).contains(&hour) {
        "Productive afternoon window"
    } else if hour < 9 {
        "Early-morning slot"
    } else {
        "Available slot"
    }
}
