// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The [`HijriCalendar`] provider trait and the [`CalendarKind`] tagged
//! variant that dispatches between the back-ends in this module.

use crate::calendar::jdn::{gregorian_to_jdn, jdn_to_gregorian, GregorianDate};
use crate::calendar::tabular::Tabular;
use crate::calendar::umalqura::UmmAlQura;
use crate::error::{CalendarError, Result};

/// Capability a Hijri calendar back-end provides. New back-ends (a civil
/// lookalike, an astronomical sighting model) can be added without the
/// expansion engine changing at all.
pub trait HijriCalendar {
    /// Length of `month` (1-12) in `year`, in days (29 or 30).
    fn month_length(&self, year: i32, month: u8) -> Result<u8>;
    /// `true` if `year` has 355 days instead of 354.
    fn is_leap(&self, year: i32) -> Result<bool>;
    /// Total days in `year` (354 or 355).
    fn year_length(&self, year: i32) -> Result<u32> {
        Ok(if self.is_leap(year)? { 355 } else { 354 })
    }
    /// Convert a Hijri (year, month, day) to its Gregorian civil date.
    fn hijri_to_gregorian(&self, year: i32, month: u8, day: u8) -> Result<GregorianDate>;
    /// Convert a Gregorian civil date to its Hijri (year, month, day).
    fn gregorian_to_hijri(&self, date: GregorianDate) -> Result<(i32, u8, u8)>;
    /// `true` if (year, month, day) is a date this back-end can represent.
    fn is_valid(&self, year: i32, month: u8, day: u8) -> bool {
        if year < 1 || !(1..=12).contains(&month) {
            return false;
        }
        match self.month_length(year, month) {
            Ok(len) => day >= 1 && day <= len,
            Err(_) => false,
        }
    }

    /// Julian Day Number of (year, month, day) under this back-end.
    fn to_jdn(&self, year: i32, month: u8, day: u8) -> Result<i64> {
        let g = self.hijri_to_gregorian(year, month, day)?;
        Ok(gregorian_to_jdn(g.year, g.month, g.day))
    }

    /// Inverse of [`HijriCalendar::to_jdn`].
    fn from_jdn(&self, jdn: i64) -> Result<(i32, u8, u8)> {
        let (y, m, d) = jdn_to_gregorian(jdn);
        self.gregorian_to_hijri(GregorianDate::new(y, m, d, 0, 0, 0))
    }
}

/// Selects which [`HijriCalendar`] back-end a rule or date uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarKind {
    /// Saudi Arabia's official, table-driven calendar (spec default).
    #[default]
    UmmAlQura,
    /// Purely arithmetic calendar with a fixed 30-year leap cycle.
    Tabular,
}

impl CalendarKind {
    pub fn parse(name: &str) -> Result<CalendarKind> {
        match name.to_ascii_lowercase().as_str() {
            "hijri-um-al-qura" | "umm-al-qura" | "umalqura" | "islamic-umalqura" => {
                Ok(CalendarKind::UmmAlQura)
            }
            "hijri-tabular" | "tabular" | "tbla" | "islamic-tbla" => Ok(CalendarKind::Tabular),
            other => Err(CalendarError::InvalidInput(format!(
                "unknown CALENDAR value '{other}'"
            ))),
        }
    }

    pub fn as_rrule_str(self) -> &'static str {
        match self {
            CalendarKind::UmmAlQura => "HIJRI-UM-AL-QURA",
            CalendarKind::Tabular => "HIJRI-TABULAR",
        }
    }

    fn provider(self) -> &'static dyn HijriCalendar {
        match self {
            CalendarKind::UmmAlQura => &UmmAlQura,
            CalendarKind::Tabular => &Tabular,
        }
    }
}

impl HijriCalendar for CalendarKind {
    fn month_length(&self, year: i32, month: u8) -> Result<u8> {
        self.provider().month_length(year, month)
    }
    fn is_leap(&self, year: i32) -> Result<bool> {
        self.provider().is_leap(year)
    }
    fn hijri_to_gregorian(&self, year: i32, month: u8, day: u8) -> Result<GregorianDate> {
        self.provider().hijri_to_gregorian(year, month, day)
    }
    fn gregorian_to_hijri(&self, date: GregorianDate) -> Result<(i32, u8, u8)> {
        self.provider().gregorian_to_hijri(date)
    }
    fn is_valid(&self, year: i32, month: u8, day: u8) -> bool {
        self.provider().is_valid(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_kind_aliases() {
        assert_eq!(
            CalendarKind::parse("hijri-um-al-qura").unwrap(),
            CalendarKind::UmmAlQura
        );
        assert_eq!(
            CalendarKind::parse("islamic-tbla").unwrap(),
            CalendarKind::Tabular
        );
        assert!(CalendarKind::parse("gregorian").is_err());
    }
}
