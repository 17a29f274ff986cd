//! Per-room summaries of a computed report, relative to a reference instant.
//!
//! The reference instant is always passed in by the caller; nothing here reads
//! the clock.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityReport;
use crate::interval::LabeledInterval;

/// How many upcoming bookings and free slots a summary lists by default.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Status of a single room at a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room: String,
    /// The label with any leading "Room " prefix removed.
    pub room_number: String,
    /// First character of the room number, e.g. `2` for room 214.
    pub floor: Option<char>,
    pub available_now: bool,
    pub current_booking: Option<LabeledInterval>,
    pub upcoming_bookings: Vec<LabeledInterval>,
    pub upcoming_availability: Vec<LabeledInterval>,
    pub available_minutes_today: i64,
}

/// Summarize `room` as of `now`.
///
/// Upcoming lists contain at most `limit` intervals that end after `now`,
/// ordered by start. "Today" is `now.date()`.
pub fn summarize_room(
    report: &AvailabilityReport,
    room: &str,
    now: NaiveDateTime,
    limit: usize,
) -> RoomSummary {
    let mut slices: Vec<&LabeledInterval> = report.for_room(room).collect();
    slices.sort_by_key(|i| i.start);

    let current_booking = slices
        .iter()
        .find(|i| !i.is_available && i.contains(now))
        .map(|i| (*i).clone());

    let upcoming = |available: bool| -> Vec<LabeledInterval> {
        slices
            .iter()
            .filter(|i| i.is_available == available && i.end > now)
            .take(limit)
            .map(|i| (*i).clone())
            .collect()
    };

    let today = now.date();
    let available_minutes_today = slices
        .iter()
        .filter(|i| i.is_available && i.day == today)
        .map(|i| i.duration_minutes())
        .sum();

    let room_number = strip_room_prefix(room).to_string();
    let floor = room_number.chars().next();

    RoomSummary {
        room: room.to_string(),
        floor,
        available_now: current_booking.is_none(),
        current_booking,
        upcoming_bookings: upcoming(false),
        upcoming_availability: upcoming(true),
        available_minutes_today,
        room_number,
    }
}

/// The first free slot of `room` that still has `min_minutes` left after `after`.
///
/// The returned slice starts no earlier than `after`; its id and title are
/// those of the available slice it was cut from.
pub fn first_available(
    report: &AvailabilityReport,
    room: &str,
    after: NaiveDateTime,
    min_minutes: u32,
) -> Option<LabeledInterval> {
    let min_duration = Duration::minutes(i64::from(min_minutes));
    let mut free: Vec<&LabeledInterval> = report
        .for_room(room)
        .filter(|i| i.is_available && i.end > after)
        .collect();
    free.sort_by_key(|i| i.start);

    free.into_iter().find_map(|slot| {
        let start = slot.start.max(after);
        if slot.end - start >= min_duration {
            Some(LabeledInterval {
                start,
                ..slot.clone()
            })
        } else {
            None
        }
    })
}

fn strip_room_prefix(label: &str) -> &str {
    let trimmed = label.trim();
    match trimmed.get(..4) {
        Some(prefix)
            if prefix.eq_ignore_ascii_case("room") && trimmed[4..].starts_with(char::is_whitespace) =>
        {
            trimmed[4..].trim_start()
        }
        _ => trimmed,
    }
}
