//! The daily operating window and the caller's normalized date range.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const DEFAULT_OPENING: NaiveTime = hms(9, 0, 0, 0);
const DEFAULT_CLOSING: NaiveTime = hms(21, 0, 0, 0);
const END_OF_DAY: NaiveTime = hms(23, 59, 59, 999);

const fn hms(hour: u32, min: u32, sec: u32, milli: u32) -> NaiveTime {
    match NaiveTime::from_hms_milli_opt(hour, min, sec, milli) {
        Some(time) => time,
        None => panic!("invalid wall-clock constant"),
    }
}

/// Opening and closing wall-clock times applied to every day and room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
}

impl Default for OperatingWindow {
    /// 09:00 to 21:00.
    fn default() -> Self {
        Self {
            opening: DEFAULT_OPENING,
            closing: DEFAULT_CLOSING,
        }
    }
}

impl OperatingWindow {
    /// Build a window, rejecting one that does not open before it closes.
    pub fn new(opening: NaiveTime, closing: NaiveTime) -> Result<Self> {
        let window = Self { opening, closing };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.opening >= self.closing {
            return Err(EngineError::InvalidWindow {
                opening: self.opening,
                closing: self.closing,
            });
        }
        Ok(())
    }

    pub fn opening_on(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(self.opening)
    }

    pub fn closing_on(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(self.closing)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.closing - self.opening).num_minutes()
    }
}

/// An inclusive range of whole calendar days. `start <= end` always holds,
/// including for ranges read back from JSON.
///
/// The range is stored as dates; [`DateRange::start_datetime`] and
/// [`DateRange::end_datetime`] give the normalized 00:00:00.000 and
/// 23:59:59.999 boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// # Errors
    /// Returns [`EngineError::InvalidRange`] if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Normalize optional caller bounds to whole days.
    ///
    /// A missing start falls back to `today`; a missing end falls back to
    /// `today + span_days`. Time-of-day components are discarded, which floors
    /// the start and ceils the end to day boundaries.
    pub fn resolve(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        today: NaiveDate,
        span_days: u32,
    ) -> Result<Self> {
        let start = start.map(|s| s.date()).unwrap_or(today);
        let end = match end {
            Some(e) => e.date(),
            None => today
                .checked_add_days(Days::new(u64::from(span_days)))
                .ok_or_else(|| {
                    EngineError::Config(format!("default span of {} days overflows", span_days))
                })?,
        };
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end.and_time(END_OF_DAY)
    }

    /// Number of days in the range, both endpoints included.
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).num_days()).map_or(0, |n| n + 1)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.day_count())
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}
