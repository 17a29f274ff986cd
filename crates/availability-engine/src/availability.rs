//! Date-range driver: enumerate rooms, then build every room's timeline for
//! every day in range.
//!
//! The result is a flat, deterministic list of labeled intervals ordered by
//! room (see [`crate::rooms::compare_rooms`]), then day, then start. Nothing is
//! cached between calls; navigating to a different range means calling again.

use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::interval::{BookedInterval, LabeledInterval};
use crate::rooms::enumerate_rooms;
use crate::timeline::fill_day;
use crate::window::{DateRange, OperatingWindow};

/// Everything the rendering layer needs for one visible range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub intervals: Vec<LabeledInterval>,
    pub rooms: Vec<String>,
    pub range: DateRange,
    pub window: OperatingWindow,
    /// Ids of malformed bookings (`end <= start`) that were left out.
    pub skipped: Vec<String>,
}

/// Which rooms a caller wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomFilter {
    #[default]
    All,
    Room(String),
}

impl RoomFilter {
    pub fn matches(&self, room: &str) -> bool {
        match self {
            RoomFilter::All => true,
            RoomFilter::Room(r) => r == room,
        }
    }
}

impl FromStr for RoomFilter {
    type Err = Infallible;

    /// `"all"` (any case) selects every room; anything else names one room.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(RoomFilter::All)
        } else {
            Ok(RoomFilter::Room(s.to_string()))
        }
    }
}

impl AvailabilityReport {
    pub fn for_room<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a LabeledInterval> + 'a {
        self.intervals.iter().filter(move |i| i.room == room)
    }

    /// A copy of the report keeping only intervals matching `filter`.
    ///
    /// The room list is left intact so a room picker can still offer every room.
    pub fn filter(&self, filter: &RoomFilter) -> AvailabilityReport {
        AvailabilityReport {
            intervals: self
                .intervals
                .iter()
                .filter(|i| filter.matches(&i.room))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn available_count(&self) -> usize {
        self.intervals.iter().filter(|i| i.is_available).count()
    }
}

/// Compute labeled availability for every room and every day of `range`.
///
/// # Errors
/// Returns an error if `config` is invalid (see [`EngineConfig::validate`]).
pub fn compute_availability(
    bookings: &[BookedInterval],
    range: DateRange,
    config: &EngineConfig,
) -> Result<AvailabilityReport> {
    config.validate()?;

    let mut skipped = Vec::new();
    let mut by_room: HashMap<&str, Vec<&BookedInterval>> = HashMap::new();
    for booking in bookings {
        if booking.is_malformed() {
            warn!(
                booking_id = %booking.id,
                start = %booking.start,
                end = %booking.end,
                "Skipping booking that ends before it starts"
            );
            skipped.push(booking.id.clone());
            continue;
        }
        by_room.entry(booking.room.as_str()).or_default().push(booking);
    }

    let rooms = enumerate_rooms(bookings, config);

    let mut intervals = Vec::new();
    for room in &rooms {
        let room_bookings = by_room.get(room.as_str()).map(Vec::as_slice).unwrap_or(&[]);
        for day in range.days() {
            intervals.extend(fill_day(room, day, room_bookings.iter().copied(), &config.window));
        }
    }

    debug!(
        rooms = rooms.len(),
        days = range.day_count(),
        bookings = bookings.len(),
        skipped = skipped.len(),
        intervals = intervals.len(),
        "Computed availability"
    );

    Ok(AvailabilityReport {
        intervals,
        rooms,
        range,
        window: config.window,
        skipped,
    })
}

/// Resolve optional caller bounds against `today`, then compute availability.
///
/// With no bounds the range is `today` through `today + config.default_span_days`.
///
/// # Errors
/// Returns [`crate::EngineError::InvalidRange`] if the resolved end date precedes
/// the start date, or a config error if `config` is invalid.
pub fn compute_for_request(
    bookings: &[BookedInterval],
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<AvailabilityReport> {
    let range = DateRange::resolve(start, end, today, config.default_span_days)?;
    compute_availability(bookings, range, config)
}
