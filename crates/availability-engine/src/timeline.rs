//! Gap-filling merge of one room's bookings into a day timeline.
//!
//! Bookings touching the day are sorted by start and walked with a cursor that
//! begins at opening time. Gaps in front of the cursor become available slices,
//! each booking becomes a booked slice, and whatever is left before closing
//! becomes a final available slice. Overlapping bookings are kept as separate
//! booked slices; only the available slices account for their union.

use chrono::{NaiveDate, NaiveDateTime};

use crate::interval::{BookedInterval, LabeledInterval};
use crate::window::OperatingWindow;

/// Build the labeled timeline of `room` for `day`.
///
/// `bookings` may contain bookings for other rooms or days; only those of
/// `room` touching `day` are used, in stable start order. Booked slices are
/// clipped to the operating window and dropped if nothing remains after
/// clipping. Malformed bookings (`end <= start`) contribute nothing.
///
/// The available slices together with the union of the booked slices cover
/// `[opening, closing)` exactly, and no slice has zero or negative length.
pub fn fill_day<'a, I>(
    room: &str,
    day: NaiveDate,
    bookings: I,
    window: &OperatingWindow,
) -> Vec<LabeledInterval>
where
    I: IntoIterator<Item = &'a BookedInterval>,
{
    let opening = window.opening_on(day);
    let closing = window.closing_on(day);

    let mut touching: Vec<(NaiveDateTime, NaiveDateTime, &BookedInterval)> = bookings
        .into_iter()
        .filter(|b| b.room == room && !b.is_malformed() && b.touches(day))
        .map(|b| (b.start.max(opening), b.end.min(closing), b))
        .filter(|(start, end, _)| start < end)
        .collect();

    // Stable: equal starts keep feed order.
    touching.sort_by_key(|&(start, _, _)| start);

    let mut slices = Vec::with_capacity(touching.len() * 2 + 1);
    let mut cursor = opening;

    for (start, end, booking) in touching {
        if cursor < start {
            slices.push(LabeledInterval::available(room, day, cursor, start));
        }
        slices.push(LabeledInterval::booked(booking, day, start, end));
        cursor = cursor.max(end);
    }

    // Trailing availability, or the whole window when nothing was booked.
    if cursor < closing {
        slices.push(LabeledInterval::available(room, day, cursor, closing));
    }

    slices
}
