// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recurrence option model and the partial-to-parsed normalization
//! pipeline (spec section 4.4).

use crate::calendar::backend::CalendarKind;
use crate::calendar::GregorianDate;
use crate::config;
use crate::date::HijriDate;
use crate::error::{CalendarError, Result};
use crate::weekday::{Weekday, WeekdaySpec};

/// How often a rule repeats. `Hourly`/`Minutely`/`Secondly` are accepted
/// syntactically but the expansion engine treats them exactly like
/// `Daily`, producing a single candidate per advance (spec section 9,
/// open question).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

impl Frequency {
    pub fn parse(name: &str) -> Result<Frequency> {
        match name.to_ascii_uppercase().as_str() {
            "YEARLY" => Ok(Frequency::Yearly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "WEEKLY" => Ok(Frequency::Weekly),
            "DAILY" => Ok(Frequency::Daily),
            "HOURLY" => Ok(Frequency::Hourly),
            "MINUTELY" => Ok(Frequency::Minutely),
            "SECONDLY" => Ok(Frequency::Secondly),
            other => Err(CalendarError::InvalidInput(format!(
                "unknown FREQ value '{other}'"
            ))),
        }
    }

    pub fn as_rrule_str(self) -> &'static str {
        match self {
            Frequency::Yearly => "YEARLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Daily => "DAILY",
            Frequency::Hourly => "HOURLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Secondly => "SECONDLY",
        }
    }
}

/// What to do with a generated (y, m, d) whose day exceeds the month's
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipPolicy {
    #[default]
    Omit,
    Forward,
    Backward,
}

impl SkipPolicy {
    pub fn parse(name: &str) -> Result<SkipPolicy> {
        match name.to_ascii_uppercase().as_str() {
            "OMIT" => Ok(SkipPolicy::Omit),
            "FORWARD" => Ok(SkipPolicy::Forward),
            "BACKWARD" => Ok(SkipPolicy::Backward),
            other => Err(CalendarError::InvalidInput(format!(
                "unknown SKIP value '{other}'"
            ))),
        }
    }

    pub fn as_rrule_str(self) -> &'static str {
        match self {
            SkipPolicy::Omit => "OMIT",
            SkipPolicy::Forward => "FORWARD",
            SkipPolicy::Backward => "BACKWARD",
        }
    }
}

/// Either a Hijri tuple or a Gregorian civil date, accepted for `dtstart`/
/// `until` before the calendar that resolves it is known to the caller.
#[derive(Debug, Clone, Copy)]
pub enum DateSpec {
    Hijri(i32, u8, u8, u8, u8, u8),
    Gregorian(GregorianDate),
}

/// Fields as accepted from the caller, all optional except `freq` (spec
/// section 3).
#[derive(Debug, Clone, Default)]
pub struct PartialOptions {
    pub freq: Option<Frequency>,
    pub dtstart: Option<DateSpec>,
    pub interval: Option<i32>,
    pub wkst: Option<Weekday>,
    pub count: Option<u32>,
    pub until: Option<DateSpec>,
    pub tzid: Option<String>,
    pub bysetpos: Option<Vec<i32>>,
    pub bymonth: Option<Vec<u8>>,
    pub bymonthday: Option<Vec<i32>>,
    pub byyearday: Option<Vec<i32>>,
    pub byweekno: Option<Vec<i32>>,
    pub byweekday: Option<Vec<WeekdaySpec>>,
    pub byhour: Option<Vec<u8>>,
    pub byminute: Option<Vec<u8>>,
    pub bysecond: Option<Vec<u8>>,
    pub skip: Option<SkipPolicy>,
    pub calendar: Option<CalendarKind>,
}

impl PartialOptions {
    pub fn new(freq: Frequency) -> PartialOptions {
        PartialOptions {
            freq: Some(freq),
            ..Default::default()
        }
    }
}

/// Canonicalized, fully-validated options (spec section 3, "Parsed
/// options"). Every by-part is list-valued; month-day and weekday lists
/// are pre-split the way the expansion engine needs them.
#[derive(Debug, Clone)]
pub struct ParsedOptions {
    pub freq: Frequency,
    pub dtstart: HijriDate,
    pub interval: i32,
    pub wkst: Weekday,
    pub count: Option<u32>,
    pub until: Option<HijriDate>,
    pub tzid: Option<String>,
    pub bysetpos: Vec<i32>,
    pub bymonth: Vec<u8>,
    /// Strictly positive BYMONTHDAY entries.
    pub bymonthday: Vec<i32>,
    /// Strictly negative BYMONTHDAY entries.
    pub bynmonthday: Vec<i32>,
    pub byyearday: Vec<i32>,
    pub byweekno: Vec<i32>,
    /// BYDAY entries with no ordinal.
    pub byweekday: Vec<Weekday>,
    /// BYDAY entries with an ordinal (`1FR`, `-1MO`, ...).
    pub bynweekday: Vec<WeekdaySpec>,
    pub byhour: Vec<u8>,
    pub byminute: Vec<u8>,
    pub bysecond: Vec<u8>,
    pub skip: SkipPolicy,
    pub calendar: CalendarKind,
}

fn resolve_date_spec(spec: DateSpec, calendar: CalendarKind) -> Result<HijriDate> {
    match spec {
        DateSpec::Hijri(y, m, d, hh, mm, ss) => HijriDate::new(y, m, d, hh, mm, ss, calendar),
        DateSpec::Gregorian(g) => HijriDate::from_gregorian(g, calendar),
    }
}

impl PartialOptions {
    /// The total Partial-to-Parsed normalization pipeline (spec section
    /// 4.4, steps 1-5).
    pub fn normalize(self) -> Result<ParsedOptions> {
        let freq = self
            .freq
            .ok_or_else(|| CalendarError::InvalidInput("FREQ is required".to_string()))?;

        // Step 4 (defaults applied early so dtstart/until resolve against them).
        let calendar = self.calendar.unwrap_or_else(config::default_calendar);
        let interval = self.interval.unwrap_or(1);
        let wkst = self.wkst.unwrap_or(Weekday::Sunday);
        let skip = self.skip.unwrap_or_default();

        // Step 1: dates.
        let dtstart = match self.dtstart {
            Some(spec) => resolve_date_spec(spec, calendar)?,
            None => config::today(calendar)?,
        };
        let until = self
            .until
            .map(|spec| resolve_date_spec(spec, calendar))
            .transpose()?;

        // Step 2: by-month-day split.
        let mut bymonthday = Vec::new();
        let mut bynmonthday = Vec::new();
        for v in self.bymonthday.unwrap_or_default() {
            if v == 0 || !(-30..=30).contains(&v) {
                return Err(CalendarError::InvalidInput(format!(
                    "bymonthday value {v} out of range"
                )));
            }
            if v > 0 {
                bymonthday.push(v);
            } else {
                bynmonthday.push(v);
            }
        }

        // Step 3: weekday normalization/split.
        let mut byweekday = Vec::new();
        let mut bynweekday = Vec::new();
        for spec in self.byweekday.unwrap_or_default() {
            match spec.n {
                Some(_) => bynweekday.push(spec),
                None => byweekday.push(spec.weekday),
            }
        }

        let bysetpos = self.bysetpos.unwrap_or_default();
        let bymonth = self.bymonth.unwrap_or_default();
        let byyearday = self.byyearday.unwrap_or_default();
        let byweekno = self.byweekno.unwrap_or_default();
        let byhour = self.byhour.unwrap_or_default();
        let byminute = self.byminute.unwrap_or_default();
        let bysecond = self.bysecond.unwrap_or_default();

        // Step 5: range validation.
        if interval < 1 {
            return Err(CalendarError::InvalidInput(
                "interval must be >= 1".to_string(),
            ));
        }
        for &m in &bymonth {
            if !(1..=12).contains(&m) {
                return Err(CalendarError::InvalidInput(format!(
                    "bymonth value {m} out of range"
                )));
            }
        }
        for &v in &byyearday {
            if v == 0 || !(-355..=355).contains(&v) {
                return Err(CalendarError::InvalidInput(format!(
                    "byyearday value {v} out of range"
                )));
            }
        }
        for &v in &bysetpos {
            if v == 0 || !(-366..=366).contains(&v) {
                return Err(CalendarError::InvalidInput(format!(
                    "bysetpos value {v} out of range"
                )));
            }
        }
        for &h in &byhour {
            if h > 23 {
                return Err(CalendarError::InvalidInput(format!(
                    "byhour value {h} out of range"
                )));
            }
        }
        for &m in &byminute {
            if m > 59 {
                return Err(CalendarError::InvalidInput(format!(
                    "byminute value {m} out of range"
                )));
            }
        }
        for &s in &bysecond {
            if s > 59 {
                return Err(CalendarError::InvalidInput(format!(
                    "bysecond value {s} out of range"
                )));
            }
        }

        Ok(ParsedOptions {
            freq,
            dtstart,
            interval,
            wkst,
            count: self.count,
            until,
            tzid: self.tzid,
            bysetpos,
            bymonth,
            bymonthday,
            bynmonthday,
            byyearday,
            byweekno,
            byweekday,
            bynweekday,
            byhour,
            byminute,
            bysecond,
            skip,
            calendar,
        })
    }
}
