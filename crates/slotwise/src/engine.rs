//! The availability engine and its calendar source boundary.
//!
//! [`AvailabilityEngine`] owns nothing but an injected [`CalendarSource`]
//! and exposes the two scheduling operations: ranked candidate slots for
//! one identity, and the slots a whole attendee list shares. Working hours
//! arrive as wall-clock times and are resolved to UTC instants here, so the
//! pure sweep in [`finder`](crate::finder) never touches timezone rules.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SlotError, SourceError};
use crate::event::CalendarEvent;
use crate::finder::{find_slots, TimeSlot};
use crate::prefs::Preferences;

/// Maximum number of results returned by
/// [`AvailabilityEngine::find_common_slots`].
pub const MAX_COMMON_SLOTS: usize = 5;

/// Read access to one identity's calendar.
///
/// Implementations own connection and auth lifecycle; the engine never
/// constructs clients itself. Failures are boxed and surface unmodified
/// through [`SlotError::Source`].
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Events for `identity` overlapping `[start, end)`.
    ///
    /// Sources may return events that merely straddle the window; the
    /// engine clips and filters on its side. They should not return events
    /// entirely outside it.
    async fn get_events(
        &self,
        identity: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<CalendarEvent>, SourceError>;
}

/// In-memory [`CalendarSource`] over fixed per-identity event lists.
///
/// Serves the events overlapping the requested window; identities that were
/// never registered have empty calendars. Useful for tests and file-backed
/// tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    calendars: HashMap<String, Vec<CalendarEvent>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the calendar for `identity`.
    pub fn insert(&mut self, identity: impl Into<String>, events: Vec<CalendarEvent>) {
        self.calendars.insert(identity.into(), events);
    }
}

#[async_trait]
impl CalendarSource for StaticSource {
    async fn get_events(
        &self,
        identity: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<CalendarEvent>, SourceError> {
        let events = self
            .calendars
            .get(identity)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| event.start < end && event.end > start)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(events)
    }
}

/// A meeting window that works for every requested attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonSlot {
    /// Start instant, inclusive.
    pub start: DateTime<Utc>,
    /// End instant, exclusive.
    pub end: DateTime<Utc>,
}

/// The availability engine.
///
/// Generic over its [`CalendarSource`] so call sites pick the backend:
/// a Graph client in production, [`StaticSource`] in tests and tooling.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    source: S,
}

impl<S: CalendarSource> AvailabilityEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the injected source, e.g. to reach backend-specific calls.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Ranked candidate slots for one identity on one working day.
    ///
    /// `working_start` and `working_end` are wall-clock times on `day` in
    /// `timezone`; they are resolved to UTC instants here, so callers hand
    /// over preferences exactly as stored. The full ranked list is
    /// returned; capping is the caller's policy.
    ///
    /// # Arguments
    ///
    /// * `identity` - whose calendar to consult, e.g. an email address
    /// * `day` - the calendar day, in `timezone`
    /// * `duration_minutes` - meeting length, must be nonzero
    /// * `working_start` - start of the working day, wall clock
    /// * `working_end` - end of the working day, wall clock
    /// * `buffer_before` - minutes kept free before each commitment
    /// * `buffer_after` - minutes kept free after each commitment
    /// * `timezone` - IANA name, e.g. `"America/New_York"`
    ///
    /// # Errors
    ///
    /// * [`SlotError::InvalidDuration`] if `duration_minutes` is zero
    /// * [`SlotError::InvalidTimezone`] if `timezone` is not an IANA name
    /// * [`SlotError::NonexistentLocalTime`] if a working-hour boundary
    ///   falls in a DST gap on `day`
    /// * [`SlotError::InvalidWindow`] if the resolved window is empty or
    ///   inverted
    /// * [`SlotError::Source`] if the calendar source fails
    /// * [`SlotError::InvalidInterval`] if the source returns a blocking
    ///   event with `start >= end`
    #[allow(clippy::too_many_arguments)]
    pub async fn find_available_slots(
        &self,
        identity: &str,
        day: NaiveDate,
        duration_minutes: u32,
        working_start: NaiveTime,
        working_end: NaiveTime,
        buffer_before: u32,
        buffer_after: u32,
        timezone: &str,
    ) -> Result<Vec<TimeSlot>> {
        if duration_minutes == 0 {
            return Err(SlotError::InvalidDuration);
        }

        let tz = parse_timezone(timezone)?;
        let day_start = resolve_local(day, working_start, tz, timezone)?;
        let day_end = resolve_local(day, working_end, tz, timezone)?;
        if day_start >= day_end {
            return Err(SlotError::InvalidWindow {
                start: day_start,
                end: day_end,
            });
        }

        let events = self
            .source
            .get_events(identity, day_start, day_end)
            .await
            .map_err(|source| SlotError::Source {
                identity: identity.to_string(),
                source,
            })?;
        debug!("fetched {} events for {}", events.len(), identity);

        find_slots(
            &events,
            day_start,
            day_end,
            duration_minutes,
            buffer_before,
            buffer_after,
            tz,
        )
    }

    /// Meeting windows free for every attendee on `day`, capped at
    /// [`MAX_COMMON_SLOTS`].
    ///
    /// Each attendee's candidates are computed with the default working
    /// window and buffers ([`Preferences::default`]) in the request
    /// `timezone`, then intersected on slot start times. The result keeps
    /// the first attendee's ranking order, and the cap drops that ranking's
    /// tail; which slots survive the intersection does not depend on
    /// attendee order. An empty attendee list has nothing to intersect and
    /// yields no slots.
    ///
    /// Attendee calendars are independent, so the lookups run concurrently.
    /// Any attendee's failure fails the whole call: a partial attendee set
    /// cannot prove a slot works for everyone.
    ///
    /// # Errors
    ///
    /// Everything [`find_available_slots`](Self::find_available_slots) can
    /// return, for whichever attendee fails first.
    pub async fn find_common_slots(
        &self,
        identities: &[&str],
        day: NaiveDate,
        duration_minutes: u32,
        timezone: &str,
    ) -> Result<Vec<CommonSlot>> {
        if identities.is_empty() {
            return Ok(Vec::new());
        }

        let prefs = Preferences::default();
        let lookups = identities.iter().map(|identity| {
            self.find_available_slots(
                identity,
                day,
                duration_minutes,
                prefs.working_hours_start,
                prefs.working_hours_end,
                prefs.buffer_before_minutes,
                prefs.buffer_after_minutes,
                timezone,
            )
        });
        let per_attendee = try_join_all(lookups).await?;

        let mut common: Vec<CommonSlot> = per_attendee[0]
            .iter()
            .map(|slot| CommonSlot {
                start: slot.start,
                end: slot.end,
            })
            .collect();

        for slots in &per_attendee[1..] {
            let starts: HashSet<DateTime<Utc>> = slots.iter().map(|slot| slot.start).collect();
            common.retain(|candidate| starts.contains(&candidate.start));
        }

        common.truncate(MAX_COMMON_SLOTS);
        debug!(
            "found {} common slots for {} attendees",
            common.len(),
            identities.len()
        );
        Ok(common)
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
///
/// Returns [`SlotError::InvalidTimezone`] when the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Resolve a wall-clock time on `day` in `tz` to a UTC instant.
///
/// Ambiguous local times (clocks falling back) take the earlier offset.
/// Nonexistent local times (clocks springing forward) name no instant and
/// are an error.
fn resolve_local(day: NaiveDate, time: NaiveTime, tz: Tz, name: &str) -> Result<DateTime<Utc>> {
    let local = day.and_time(time);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|resolved| resolved.with_timezone(&Utc))
        .ok_or_else(|| SlotError::NonexistentLocalTime {
            local,
            timezone: name.to_string(),
        })
}
