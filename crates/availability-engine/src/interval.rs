//! Booked input intervals and the labeled intervals the engine emits.
//!
//! All timestamps are local wall-clock `NaiveDateTime`s. The feed supplier is
//! expected to have decoded its source format and extracted the room label
//! before handing intervals over.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format used for the start timestamp inside synthesized available ids.
const ID_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An externally sourced reservation of a single room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub room: String,
}

impl BookedInterval {
    /// A booking whose end does not come after its start covers no time.
    pub fn is_malformed(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the booking touches `day`, counting every date between its
    /// start date and end date inclusive.
    pub fn touches(&self, day: NaiveDate) -> bool {
        self.start.date() <= day && day <= self.end.date()
    }
}

/// One slice of a room's day, either free or taken by a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledInterval {
    /// Booking id for booked slices, `available_{room}_{start}` for free ones.
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub room: String,
    /// The calendar day this slice belongs to. A multi-day booking yields one
    /// slice per day, all sharing the booking id.
    pub day: NaiveDate,
    pub is_available: bool,
    /// Unclipped start of the booking behind a booked slice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_start: Option<NaiveDateTime>,
    /// Unclipped end of the booking behind a booked slice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_end: Option<NaiveDateTime>,
}

impl LabeledInterval {
    pub(crate) fn available(room: &str, day: NaiveDate, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: format!("available_{}_{}", room, start.format(ID_TIMESTAMP_FORMAT)),
            title: format!("Available: {}", room),
            start,
            end,
            room: room.to_string(),
            day,
            is_available: true,
            booking_start: None,
            booking_end: None,
        }
    }

    pub(crate) fn booked(
        booking: &BookedInterval,
        day: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: booking.id.clone(),
            title: booking.title.clone(),
            start,
            end,
            room: booking.room.clone(),
            day,
            is_available: false,
            booking_start: Some(booking.start),
            booking_end: Some(booking.end),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `at` falls within the slice, both ends inclusive.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}
