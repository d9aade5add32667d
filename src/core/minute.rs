//! Minute-resolution time marks.
//!
//! Truncation works on the decomposed calendar fields so the rounding rules
//! stay independent of how a timestamp happens to be stored.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A point in time truncated to the minute.
///
/// Field order gives the derived `Ord` chronological meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteMark {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl MinuteMark {
    /// Build a mark from calendar fields, rejecting impossible dates.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// Round down: seconds and sub-seconds are dropped.
    pub fn floor(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
            day: timestamp.day(),
            hour: timestamp.hour(),
            minute: timestamp.minute(),
        }
    }

    /// Round up to the next minute boundary. Timestamps already on a
    /// boundary map to themselves.
    ///
    /// Returns `None` only if the next minute is past the end of the
    /// representable calendar.
    pub fn ceil(timestamp: &NaiveDateTime) -> Option<Self> {
        let floor = Self::floor(timestamp);
        if timestamp.second() == 0 && timestamp.nanosecond() == 0 {
            Some(floor)
        } else {
            floor.next()
        }
    }

    /// The following minute, carrying into hour, day, month and year.
    pub fn next(self) -> Option<Self> {
        if self.minute < 59 {
            return Some(Self {
                minute: self.minute + 1,
                ..self
            });
        }
        if self.hour < 23 {
            return Some(Self {
                hour: self.hour + 1,
                minute: 0,
                ..self
            });
        }

        let tomorrow = self.date()?.succ_opt()?;
        Some(Self {
            year: tomorrow.year(),
            month: tomorrow.month(),
            day: tomorrow.day(),
            hour: 0,
            minute: 0,
        })
    }

    /// Whole minutes from `earlier` to `self` (negative if `self` is earlier).
    pub fn minutes_since(&self, earlier: &MinuteMark) -> Option<i64> {
        let days = self
            .date()?
            .signed_duration_since(earlier.date()?)
            .num_days();
        Some(days * MINUTES_PER_DAY + self.minute_of_day() - earlier.minute_of_day())
    }

    /// The calendar date of this mark.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    fn minute_of_day(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

/// Renders as `YYYY-MM-DD HH:MM:SS` with seconds always `00`.
impl fmt::Display for MinuteMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:00",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}
