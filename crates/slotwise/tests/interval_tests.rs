//! Tests for busy-interval construction, padding, and collection.

use chrono::{DateTime, TimeZone, Utc};
use slotwise::error::SlotError;
use slotwise::event::{CalendarEvent, EventStatus};
use slotwise::interval::{padded_busy_intervals, BusyInterval};

/// Helper to build an instant on the reference day (2026-03-16, a Monday).
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

/// Helper to build an event with the given status.
fn event(start: DateTime<Utc>, end: DateTime<Utc>, status: EventStatus) -> CalendarEvent {
    CalendarEvent {
        id: String::new(),
        subject: "test event".to_string(),
        start,
        end,
        status,
    }
}

#[test]
fn padding_grows_both_sides() {
    let interval = BusyInterval::new(at(10, 0), at(11, 0)).unwrap();
    let padded = interval.padded(15, 10);

    assert_eq!(padded.start, at(9, 45), "15 min of padding before");
    assert_eq!(padded.end, at(11, 10), "10 min of padding after");
}

#[test]
fn zero_padding_is_identity() {
    let interval = BusyInterval::new(at(10, 0), at(11, 0)).unwrap();

    assert_eq!(interval.padded(0, 0), interval);
}

#[test]
fn inverted_interval_rejected() {
    let result = BusyInterval::new(at(11, 0), at(10, 0));

    assert!(
        matches!(result, Err(SlotError::InvalidInterval { .. })),
        "end before start must be rejected"
    );
}

#[test]
fn zero_length_interval_rejected() {
    let result = BusyInterval::new(at(10, 0), at(10, 0));

    assert!(
        matches!(result, Err(SlotError::InvalidInterval { .. })),
        "start == end must be rejected"
    );
}

#[test]
fn overlap_is_half_open() {
    let interval = BusyInterval::new(at(10, 0), at(11, 0)).unwrap();

    assert!(interval.overlaps(at(10, 30), at(10, 40)), "contained range");
    assert!(interval.overlaps(at(9, 0), at(10, 1)), "straddles the start");
    assert!(
        !interval.overlaps(at(11, 0), at(12, 0)),
        "range starting exactly at the end does not overlap"
    );
    assert!(
        !interval.overlaps(at(9, 0), at(10, 0)),
        "range ending exactly at the start does not overlap"
    );
}

#[test]
fn only_blocking_statuses_collected() {
    // One event per status; only busy, tentative, and oof should survive.
    let events = vec![
        event(at(9, 0), at(9, 30), EventStatus::Busy),
        event(at(10, 0), at(10, 30), EventStatus::Tentative),
        event(at(11, 0), at(11, 30), EventStatus::OutOfOffice),
        event(at(12, 0), at(12, 30), EventStatus::Free),
    ];

    let intervals = padded_busy_intervals(&events, at(8, 0), at(18, 0), 0, 0).unwrap();

    assert_eq!(intervals.len(), 3, "free events must not block");
    assert_eq!(intervals[0].start, at(9, 0));
    assert_eq!(intervals[1].start, at(10, 0));
    assert_eq!(intervals[2].start, at(11, 0));
}

#[test]
fn collection_sorts_by_start_then_end() {
    // Delivered out of order, including two intervals sharing a start.
    let events = vec![
        event(at(14, 0), at(15, 0), EventStatus::Busy),
        event(at(9, 0), at(12, 0), EventStatus::Busy),
        event(at(9, 0), at(9, 30), EventStatus::Busy),
    ];

    let intervals = padded_busy_intervals(&events, at(8, 0), at(18, 0), 0, 0).unwrap();

    let ranges: Vec<_> = intervals
        .iter()
        .map(|interval| (interval.start, interval.end))
        .collect();
    assert_eq!(
        ranges,
        vec![
            (at(9, 0), at(9, 30)),
            (at(9, 0), at(12, 0)),
            (at(14, 0), at(15, 0)),
        ],
        "sorted by start with end as tiebreak"
    );
}

#[test]
fn events_outside_window_are_discarded() {
    // Window 09:00-17:00. The 07:00 event stays out even after padding;
    // the 18:00 event starts after the window closes.
    let events = vec![
        event(at(7, 0), at(7, 30), EventStatus::Busy),
        event(at(18, 0), at(19, 0), EventStatus::Busy),
        event(at(10, 0), at(11, 0), EventStatus::Busy),
    ];

    let intervals = padded_busy_intervals(&events, at(9, 0), at(17, 0), 15, 10).unwrap();

    assert_eq!(intervals.len(), 1, "out-of-window events cannot constrain");
    assert_eq!(intervals[0].start, at(9, 45));
    assert_eq!(intervals[0].end, at(11, 10));
}

#[test]
fn padding_can_pull_an_event_into_the_window() {
    // The raw event ends at 08:55, before the 09:00 window opens, but 10
    // minutes of trailing padding reach inside.
    let events = vec![event(at(8, 0), at(8, 55), EventStatus::Busy)];

    let intervals = padded_busy_intervals(&events, at(9, 0), at(17, 0), 15, 10).unwrap();

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].end, at(9, 5), "padding crosses the boundary");
}

#[test]
fn malformed_blocking_event_is_an_error() {
    let events = vec![event(at(11, 0), at(10, 0), EventStatus::Busy)];

    let result = padded_busy_intervals(&events, at(8, 0), at(18, 0), 0, 0);

    assert!(
        matches!(result, Err(SlotError::InvalidInterval { .. })),
        "an inverted blocking event must fail loudly"
    );
}

#[test]
fn malformed_free_event_is_ignored() {
    // Free events never participate, so they are not validated either.
    let events = vec![event(at(11, 0), at(10, 0), EventStatus::Free)];

    let intervals = padded_busy_intervals(&events, at(8, 0), at(18, 0), 0, 0).unwrap();

    assert!(intervals.is_empty());
}
