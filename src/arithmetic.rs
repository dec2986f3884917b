// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Date arithmetic over a pluggable [`HijriCalendar`] back-end (spec
//! section 4.2).

use crate::calendar::backend::{CalendarKind, HijriCalendar};
use crate::date::HijriDate;
use crate::error::{CalendarError, Result};
use crate::weekday::Weekday;

/// Add `days` to `date`, round-tripping through the Julian Day Number.
/// Time-of-day fields are preserved.
pub fn add_days(date: &HijriDate, days: i64, calendar: CalendarKind) -> Result<HijriDate> {
    let jdn = calendar.to_jdn(date.year, date.month, date.day)? + days;
    let (y, m, d) = calendar.from_jdn(jdn)?;
    if y < 1 {
        return Err(CalendarError::OutOfEpoch(
            "add_days produced a year before 1 AH".to_string(),
        ));
    }
    Ok(HijriDate::new_unchecked(
        y, m, d, date.hour, date.minute, date.second,
    ))
}

/// Add `months` to `date`. If the source day exceeds the target month's
/// length: clamp it down when `clamp` is `true`, otherwise return `Ok(None)`.
pub fn add_months(
    date: &HijriDate,
    months: i64,
    clamp: bool,
    calendar: CalendarKind,
) -> Result<Option<HijriDate>> {
    let linear = (date.year as i64 - 1) * 12 + (date.month as i64 - 1) + months;
    let new_year = linear.div_euclid(12) + 1;
    let new_month = (linear.rem_euclid(12) + 1) as u8;
    if new_year < 1 {
        return Err(CalendarError::OutOfEpoch(
            "add_months produced a year before 1 AH".to_string(),
        ));
    }
    let new_year = new_year as i32;
    let len = calendar.month_length(new_year, new_month)?;
    let day = if date.day > len {
        if clamp {
            len
        } else {
            return Ok(None);
        }
    } else {
        date.day
    };
    Ok(Some(HijriDate::new_unchecked(
        new_year, new_month, day, date.hour, date.minute, date.second,
    )))
}

/// Add `years` to `date`, month and day otherwise unchanged except for the
/// clamp applied when the target year's month is shorter (30 Dhu
/// al-Hijjah landing in a non-leap year, for instance).
pub fn add_years(
    date: &HijriDate,
    years: i64,
    clamp: bool,
    calendar: CalendarKind,
) -> Result<Option<HijriDate>> {
    let new_year = date.year as i64 + years;
    if new_year < 1 {
        return Err(CalendarError::OutOfEpoch(
            "add_years produced a year before 1 AH".to_string(),
        ));
    }
    let new_year = new_year as i32;
    let len = calendar.month_length(new_year, date.month)?;
    let day = if date.day > len {
        if clamp {
            len
        } else {
            return Ok(None);
        }
    } else {
        date.day
    };
    Ok(Some(HijriDate::new_unchecked(
        new_year, date.month, day, date.hour, date.minute, date.second,
    )))
}

/// The day-of-month of the `n`-th occurrence of `weekday` in (year, month);
/// counted from the end when `n < 0`. Returns `None` if fewer than `|n|`
/// occurrences exist.
pub fn nth_weekday_of_month(
    year: i32,
    month: u8,
    weekday: Weekday,
    n: i32,
    calendar: CalendarKind,
) -> Result<Option<u8>> {
    if n == 0 {
        return Err(CalendarError::InvalidInput(
            "weekday ordinal must not be zero".to_string(),
        ));
    }
    let len = calendar.month_length(year, month)?;
    let base_jdn = calendar.to_jdn(year, month, 1)?;
    let matches: Vec<u8> = (1..=len)
        .filter(|&d| Weekday::from_jdn(base_jdn + (d as i64 - 1)) == weekday)
        .collect();
    let idx = if n > 0 {
        (n - 1) as usize
    } else {
        let count = matches.len();
        let from_end = (-n) as usize;
        if from_end > count {
            return Ok(None);
        }
        count - from_end
    };
    Ok(matches.get(idx).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::backend::CalendarKind;

    #[test]
    fn add_days_wraps_month() {
        let d = HijriDate::ymd(1446, 1, 30, CalendarKind::Tabular).unwrap();
        let next = add_days(&d, 1, CalendarKind::Tabular).unwrap();
        assert_eq!(next.date_key(), (1446, 2, 1));
    }

    #[test]
    fn add_months_clamp_vs_no_clamp() {
        // Muharram (month 1) always has 30 days; Safar (month 2) always 29.
        let d = HijriDate::ymd(1446, 1, 30, CalendarKind::Tabular).unwrap();
        let clamped = add_months(&d, 1, true, CalendarKind::Tabular)
            .unwrap()
            .unwrap();
        assert_eq!(clamped.date_key(), (1446, 2, 29));
        let unclamped = add_months(&d, 1, false, CalendarKind::Tabular).unwrap();
        assert!(unclamped.is_none());
    }

    #[test]
    fn add_years_drift_on_dhu_al_hijjah() {
        // Find a leap year where month 12 has 30 days, then step a
        // non-leap year ahead: day must clamp to 29.
        let cal = CalendarKind::Tabular;
        let d = HijriDate::ymd(1445, 12, 30, cal).unwrap(); // 1445 is a leap year (pos 5)
        let next = add_years(&d, 1, true, cal).unwrap().unwrap();
        assert_eq!(next.date_key(), (1446, 12, 29));
    }

    #[test]
    fn nth_weekday_scan() {
        let cal = CalendarKind::Tabular;
        let first_fri = nth_weekday_of_month(1446, 1, Weekday::Friday, 1, cal).unwrap();
        let last_fri = nth_weekday_of_month(1446, 1, Weekday::Friday, -1, cal).unwrap();
        assert!(first_fri.is_some());
        assert!(last_fri.is_some());
        assert!(first_fri.unwrap() <= last_fri.unwrap());
        assert!(nth_weekday_of_month(1446, 1, Weekday::Friday, 10, cal)
            .unwrap()
            .is_none());
    }
}
