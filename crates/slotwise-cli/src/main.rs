//! `slotwise` CLI: rank free calendar slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Ranked candidate slots for one calendar on a given day
//! slotwise slots --events alice.json --date 2026-03-16 --duration 30
//!
//! # Same, as JSON, with explicit working hours and buffers
//! slotwise slots --events alice.json --date 2026-03-16 --duration 30 \
//!     --working-start 09:00 --working-end 17:00 \
//!     --buffer-before 15 --buffer-after 10 --json
//!
//! # Slots every attendee can make (at most 5)
//! slotwise common --attendee alice=alice.json --attendee bob=bob.json \
//!     --date 2026-03-16 --duration 60 --timezone America/New_York
//! ```
//!
//! Event files are JSON arrays of `{id, subject, start, end, status}`
//! objects with RFC 3339 timestamps; `status` is one of `busy`,
//! `tentative`, `oof`, or `free` and defaults to `busy` when omitted.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use slotwise::{AvailabilityEngine, CalendarEvent, Preferences, StaticSource};

#[derive(Parser)]
#[command(name = "slotwise", version, about = "Calendar availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank one calendar's free slots for a working day
    Slots {
        /// JSON file with the calendar's events
        #[arg(long)]
        events: String,
        /// Day to search, e.g. 2026-03-16
        #[arg(long)]
        date: NaiveDate,
        /// Meeting length in minutes
        #[arg(long, default_value_t = Preferences::default().default_duration_minutes)]
        duration: u32,
        /// Start of the working day, e.g. 08:00
        #[arg(long, value_parser = parse_wall_time,
              default_value_t = Preferences::default().working_hours_start)]
        working_start: NaiveTime,
        /// End of the working day, e.g. 18:00
        #[arg(long, value_parser = parse_wall_time,
              default_value_t = Preferences::default().working_hours_end)]
        working_end: NaiveTime,
        /// Minutes kept free before each commitment
        #[arg(long, default_value_t = Preferences::default().buffer_before_minutes)]
        buffer_before: u32,
        /// Minutes kept free after each commitment
        #[arg(long, default_value_t = Preferences::default().buffer_after_minutes)]
        buffer_after: u32,
        /// IANA timezone for working hours and scoring
        #[arg(long, default_value_t = Preferences::default().timezone)]
        timezone: String,
        /// Print the blocking events before the candidates
        #[arg(long)]
        show_busy: bool,
        /// Emit JSON instead of a human-readable list
        #[arg(long)]
        json: bool,
    },
    /// Find slots every attendee can make (at most 5)
    Common {
        /// Attendee calendar as NAME=FILE (repeatable; NAME defaults to
        /// the file stem)
        #[arg(long = "attendee", value_parser = parse_attendee, required = true)]
        attendees: Vec<AttendeeSpec>,
        /// Day to search, e.g. 2026-03-16
        #[arg(long)]
        date: NaiveDate,
        /// Meeting length in minutes
        #[arg(long, default_value_t = Preferences::default().default_duration_minutes)]
        duration: u32,
        /// IANA timezone for the shared working window
        #[arg(long, default_value_t = Preferences::default().timezone)]
        timezone: String,
        /// Emit JSON instead of a human-readable list
        #[arg(long)]
        json: bool,
    },
}

/// One `--attendee NAME=FILE` occurrence.
#[derive(Clone)]
struct AttendeeSpec {
    identity: String,
    path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Slots {
            events,
            date,
            duration,
            working_start,
            working_end,
            buffer_before,
            buffer_after,
            timezone,
            show_busy,
            json,
        } => {
            let calendar = read_events(&events)?;
            let tz = slotwise::parse_timezone(&timezone)?;
            let identity = identity_from_path(&events);

            if show_busy {
                print_busy(&calendar, tz);
            }

            let mut source = StaticSource::new();
            source.insert(identity.clone(), calendar);
            let engine = AvailabilityEngine::new(source);

            let slots = engine
                .find_available_slots(
                    &identity,
                    date,
                    duration,
                    working_start,
                    working_end,
                    buffer_before,
                    buffer_after,
                    &timezone,
                )
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else if slots.is_empty() {
                println!("No slots available on {date} ({timezone}).");
            } else {
                println!("{} candidate slots on {date} ({timezone}):", slots.len());
                println!();
                for (rank, slot) in slots.iter().enumerate() {
                    let start = slot.start.with_timezone(&tz);
                    let end = slot.end.with_timezone(&tz);
                    println!(
                        "  {}. {} - {}  [{:.2}]  {}",
                        rank + 1,
                        start.format("%H:%M"),
                        end.format("%H:%M"),
                        slot.score,
                        slot.reason
                    );
                }
            }
        }
        Commands::Common {
            attendees,
            date,
            duration,
            timezone,
            json,
        } => {
            let tz = slotwise::parse_timezone(&timezone)?;

            let mut source = StaticSource::new();
            let mut identities = Vec::with_capacity(attendees.len());
            for attendee in &attendees {
                source.insert(attendee.identity.clone(), read_events(&attendee.path)?);
                identities.push(attendee.identity.clone());
            }
            let engine = AvailabilityEngine::new(source);

            let identity_refs: Vec<&str> = identities.iter().map(String::as_str).collect();
            let common = engine
                .find_common_slots(&identity_refs, date, duration, &timezone)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&common)?);
            } else if common.is_empty() {
                println!(
                    "No common slots for {} attendees on {date} ({timezone}).",
                    identities.len()
                );
            } else {
                println!(
                    "{} common slots for {} attendees on {date} ({timezone}):",
                    common.len(),
                    identities.len()
                );
                println!();
                for (rank, slot) in common.iter().enumerate() {
                    let start = slot.start.with_timezone(&tz);
                    let end = slot.end.with_timezone(&tz);
                    println!(
                        "  {}. {} - {}",
                        rank + 1,
                        start.format("%H:%M"),
                        end.format("%H:%M")
                    );
                }
            }
        }
    }

    Ok(())
}

/// Parse a wall-clock argument, accepting `HH:MM` or `HH:MM:SS`.
fn parse_wall_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))
}

/// Parse an `--attendee` occurrence. `alice=cal.json` maps explicitly;
/// a bare `cal.json` uses the file stem as the attendee name.
fn parse_attendee(raw: &str) -> Result<AttendeeSpec, String> {
    if let Some((identity, path)) = raw.split_once('=') {
        if identity.is_empty() || path.is_empty() {
            return Err(format!("expected NAME=FILE, got '{raw}'"));
        }
        return Ok(AttendeeSpec {
            identity: identity.to_string(),
            path: path.to_string(),
        });
    }
    match Path::new(raw).file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) if !stem.is_empty() => Ok(AttendeeSpec {
            identity: stem.to_string(),
            path: raw.to_string(),
        }),
        _ => Err(format!("cannot derive an attendee name from '{raw}'")),
    }
}

/// Attendee name used when `slots` runs on a bare events file.
fn identity_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("calendar")
        .to_string()
}

fn read_events(path: &str) -> Result<Vec<CalendarEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse events file: {}", path))
}

/// Print the blocking events, soonest first.
fn print_busy(events: &[CalendarEvent], tz: chrono_tz::Tz) {
    let mut blocking: Vec<_> = events
        .iter()
        .filter(|event| event.status.is_blocking())
        .collect();
    blocking.sort_by_key(|event| (event.start, event.end));

    if blocking.is_empty() {
        println!("No blocking events.");
        println!();
        return;
    }

    println!("Blocking events:");
    for event in blocking {
        let subject = if event.subject.is_empty() {
            "(no subject)"
        } else {
            &event.subject
        };
        println!(
            "  {} - {}  {} ({})",
            event.start.with_timezone(&tz).format("%H:%M"),
            event.end.with_timezone(&tz).format("%H:%M"),
            subject,
            event.status
        );
    }
    println!();
}
