//! Room enumeration: the distinct, ordered room labels seen in a feed.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::interval::BookedInterval;

/// Collect the distinct room labels from `bookings`, ordered by room number.
///
/// The unknown-room sentinel from `config` never appears in the result. If no
/// other label remains, `config.default_rooms` is returned (ordered the same
/// way) so callers always have at least one room to show.
pub fn enumerate_rooms(bookings: &[BookedInterval], config: &EngineConfig) -> Vec<String> {
    let distinct: BTreeSet<&str> = bookings
        .iter()
        .map(|b| b.room.as_str())
        .filter(|room| *room != config.unknown_room)
        .collect();

    let mut rooms: Vec<String> = if distinct.is_empty() {
        config.default_rooms.clone()
    } else {
        distinct.into_iter().map(str::to_string).collect()
    };
    rooms.sort_by(|a, b| compare_rooms(a, b));
    rooms.dedup();
    rooms
}

/// Order two room labels: numbered rooms first by number, then by label.
pub fn compare_rooms(a: &str, b: &str) -> Ordering {
    match (room_number(a), room_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// The first run of ASCII digits in `label`, as a number.
///
/// Runs too long to fit in a `u64` are treated as absent.
pub fn room_number(label: &str) -> Option<u64> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let digits = &label[start..];
    let len = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..len].parse().ok()
}
