// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Purely arithmetic Hijri calendar (the "tabular" or "civil" Islamic
//! calendar): a fixed 30-year cycle of 10631 days, with leap years at
//! fixed positions within the cycle. Valid for any Hijri year >= 1.

use crate::calendar::backend::HijriCalendar;
use crate::calendar::jdn::{gregorian_to_jdn, jdn_to_gregorian, GregorianDate, HIJRI_EPOCH_JDN};
use crate::error::{CalendarError, Result};

/// Days in a full 30-year cycle.
const CYCLE_DAYS: i64 = 10631;
/// 1-indexed positions within a 30-year cycle that are leap years.
const LEAP_POSITIONS: [u8; 11] = [2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29];

pub(crate) fn position_in_cycle(year: i32) -> u8 {
    (((year - 1).rem_euclid(30)) + 1) as u8
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    LEAP_POSITIONS.contains(&position_in_cycle(year))
}

pub(crate) fn year_length(year: i32) -> u32 {
    if is_leap_year(year) {
        355
    } else {
        354
    }
}

pub(crate) fn month_length(year: i32, month: u8) -> u8 {
    if month % 2 == 1 {
        30
    } else if month == 12 && is_leap_year(year) {
        30
    } else {
        29
    }
}

/// Days elapsed from 1 Muharram 1 AH up to (but not including) 1 Muharram `year`.
pub(crate) fn days_before_year(year: i32) -> i64 {
    let cycles = (year - 1).div_euclid(30) as i64;
    let pos = position_in_cycle(year);
    let mut days = cycles * CYCLE_DAYS;
    for p in 1..pos {
        // Reconstruct the year at this position in the same cycle as `year`.
        let y = year - (pos as i32 - p as i32);
        days += year_length(y) as i64;
    }
    days
}

fn days_before_month(year: i32, month: u8) -> i64 {
    (1..month).map(|m| month_length(year, m) as i64).sum()
}

/// The purely arithmetic ("tabular") Hijri calendar back-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tabular;

impl HijriCalendar for Tabular {
    fn month_length(&self, year: i32, month: u8) -> Result<u8> {
        if year < 1 {
            return Err(CalendarError::OutOfEpoch(format!(
                "year {year} is before the Hijri epoch"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidInput(format!(
                "month {month} out of range"
            )));
        }
        Ok(month_length(year, month))
    }

    fn is_leap(&self, year: i32) -> Result<bool> {
        if year < 1 {
            return Err(CalendarError::OutOfEpoch(format!(
                "year {year} is before the Hijri epoch"
            )));
        }
        Ok(is_leap_year(year))
    }

    fn hijri_to_gregorian(&self, year: i32, month: u8, day: u8) -> Result<GregorianDate> {
        if !self.is_valid(year, month, day) {
            return Err(CalendarError::InvalidDate(format!(
                "{year}-{month}-{day} is not a valid tabular Hijri date"
            )));
        }
        let days = days_before_year(year) + days_before_month(year, month) + (day as i64 - 1);
        let jdn = HIJRI_EPOCH_JDN + days;
        let (y, m, d) = jdn_to_gregorian(jdn);
        Ok(GregorianDate::new(y, m, d, 0, 0, 0))
    }

    fn gregorian_to_hijri(&self, date: GregorianDate) -> Result<(i32, u8, u8)> {
        let jdn = gregorian_to_jdn(date.year, date.month, date.day);
        let mut remaining = jdn - HIJRI_EPOCH_JDN;
        if remaining < 0 {
            return Err(CalendarError::OutOfEpoch(
                "Gregorian date precedes the Hijri epoch".to_string(),
            ));
        }
        let cycles = remaining.div_euclid(CYCLE_DAYS);
        remaining -= cycles * CYCLE_DAYS;
        let mut year = (cycles * 30) as i32 + 1;
        loop {
            let yd = year_length(year) as i64;
            if remaining < yd {
                break;
            }
            remaining -= yd;
            year += 1;
        }
        let mut month = 1u8;
        loop {
            let md = month_length(year, month) as i64;
            if remaining < md || month == 12 {
                break;
            }
            remaining -= md;
            month += 1;
        }
        let day = (remaining + 1) as u8;
        Ok((year, month, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_in_cycle() {
        for p in 1..=30u8 {
            let expected = LEAP_POSITIONS.contains(&p);
            assert_eq!(is_leap_year(p as i32), expected);
        }
    }

    #[test]
    fn month_lengths_alternate() {
        assert_eq!(month_length(1, 1), 30);
        assert_eq!(month_length(1, 2), 29);
        assert_eq!(month_length(2, 12), 30); // year 2 is leap
        assert_eq!(month_length(1, 12), 29); // year 1 is not leap
    }

    #[test]
    fn roundtrip_many_dates() {
        let t = Tabular;
        for year in [1, 2, 30, 31, 1446, 1447, 1500, 2000] {
            for month in 1..=12u8 {
                let len = t.month_length(year, month).unwrap();
                for day in [1u8, len] {
                    let g = t.hijri_to_gregorian(year, month, day).unwrap();
                    let (y2, m2, d2) = t.gregorian_to_hijri(g).unwrap();
                    assert_eq!((y2, m2, d2), (year, month, day));
                }
            }
        }
    }

    #[test]
    fn epoch_is_one_one_one() {
        let t = Tabular;
        let g = t.hijri_to_gregorian(1, 1, 1).unwrap();
        assert_eq!((g.year, g.month, g.day), (622, 7, 19));
    }
}
