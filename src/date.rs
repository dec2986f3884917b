// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Hijri date value object.

use crate::calendar::backend::{CalendarKind, HijriCalendar};
use crate::calendar::GregorianDate;
use crate::error::{CalendarError, Result};
use crate::weekday::Weekday;
use std::cmp::Ordering;
use std::fmt;

/// An immutable Hijri date and time of day.
///
/// Equality, ordering and hashing are date-only (year, month, day); the
/// time-of-day fields are carried through arithmetic but do not
/// participate in the day-granularity comparisons the expansion engine
/// relies on.
#[derive(Debug, Clone, Copy)]
pub struct HijriDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl HijriDate {
    /// Construct and validate a date against `calendar`.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        calendar: CalendarKind,
    ) -> Result<HijriDate> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidInput(format!(
                "time of day {hour:02}:{minute:02}:{second:02} out of range"
            )));
        }
        if !calendar.is_valid(year, month, day) {
            return Err(CalendarError::InvalidDate(format!(
                "{year}-{month:02}-{day:02} is not valid under {calendar:?}"
            )));
        }
        Ok(HijriDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Construct without validating; used internally once a value is
    /// already known to satisfy a calendar's month-length invariant.
    pub(crate) fn new_unchecked(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> HijriDate {
        HijriDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn ymd(year: i32, month: u8, day: u8, calendar: CalendarKind) -> Result<HijriDate> {
        HijriDate::new(year, month, day, 0, 0, 0, calendar)
    }

    /// The (year, month, day) triple this date's day-granularity
    /// comparisons and hashing are based on.
    pub fn date_key(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    pub fn to_gregorian(&self, calendar: CalendarKind) -> Result<GregorianDate> {
        let mut g = calendar.hijri_to_gregorian(self.year, self.month, self.day)?;
        g.hour = self.hour;
        g.minute = self.minute;
        g.second = self.second;
        Ok(g)
    }

    pub fn from_gregorian(date: GregorianDate, calendar: CalendarKind) -> Result<HijriDate> {
        let (y, m, d) = calendar.gregorian_to_hijri(date)?;
        Ok(HijriDate::new_unchecked(
            y, m, d, date.hour, date.minute, date.second,
        ))
    }

    pub fn weekday(&self, calendar: CalendarKind) -> Result<Weekday> {
        let g = calendar.hijri_to_gregorian(self.year, self.month, self.day)?;
        let jdn = crate::calendar::gregorian_to_jdn(g.year, g.month, g.day);
        Ok(Weekday::from_jdn(jdn))
    }
}

impl PartialEq for HijriDate {
    fn eq(&self, other: &Self) -> bool {
        self.date_key() == other.date_key()
    }
}
impl Eq for HijriDate {}

impl PartialOrd for HijriDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HijriDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date_key().cmp(&other.date_key())
    }
}

impl std::hash::Hash for HijriDate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.date_key().hash(state);
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.hour != 0 || self.minute != 0 || self.second != 0 {
            write!(f, "T{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        }
        Ok(())
    }
}
