// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The recurrence expansion engine (spec section 4.5): a lazy, pull-based
//! iterator yielding a strictly ascending, duplicate-free stream of
//! [`HijriDate`] occurrences.

use crate::arithmetic::{add_days, add_months, add_years, nth_weekday_of_month};
use crate::calendar::backend::HijriCalendar;
use crate::date::HijriDate;
use crate::error::Result;
use crate::options::{Frequency, ParsedOptions, SkipPolicy};

const MIN_SAFETY_CEILING: u64 = 100_000;

/// Lazy ascending stream of occurrences for a single set of [`ParsedOptions`].
pub struct RecurrenceIter<'a> {
    options: &'a ParsedOptions,
    cursor: HijriDate,
    buffer: Vec<HijriDate>,
    buffer_pos: usize,
    emitted: u64,
    iterations: u64,
    safety_ceiling: u64,
    exhausted: bool,
}

impl<'a> RecurrenceIter<'a> {
    pub fn new(options: &'a ParsedOptions) -> RecurrenceIter<'a> {
        let safety_ceiling = options
            .count
            .map(|c| (100u64 * c as u64).max(MIN_SAFETY_CEILING))
            .unwrap_or(MIN_SAFETY_CEILING);
        RecurrenceIter {
            options,
            cursor: options.dtstart,
            buffer: Vec::new(),
            buffer_pos: 0,
            emitted: 0,
            iterations: 0,
            safety_ceiling,
            exhausted: false,
        }
    }

    fn calendar(&self) -> crate::calendar::backend::CalendarKind {
        self.options.calendar
    }

    fn month_length(&self, year: i32, month: u8) -> Result<u8> {
        self.calendar().month_length(year, month)
    }

    fn weekday_of(&self, year: i32, month: u8, day: u8) -> Result<crate::weekday::Weekday> {
        let jdn = self.calendar().to_jdn(year, month, day)?;
        Ok(crate::weekday::Weekday::from_jdn(jdn))
    }

    fn apply_skip(&self, year: i32, month: u8, day: i32) -> Result<Option<(i32, u8, u8)>> {
        if day < 1 {
            return Ok(None);
        }
        let len = self.month_length(year, month)? as i32;
        if day <= len {
            return Ok(Some((year, month, day as u8)));
        }
        match self.options.skip {
            SkipPolicy::Omit => Ok(None),
            SkipPolicy::Backward => Ok(Some((year, month, len as u8))),
            SkipPolicy::Forward => {
                if month == 12 {
                    Ok(Some((year + 1, 1, 1)))
                } else {
                    Ok(Some((year, month + 1, 1)))
                }
            }
        }
    }

    /// Candidate generation for a single month (shared by YEARLY and
    /// MONTHLY, per spec section 4.5).
    fn month_candidates(&self, year: i32, month: u8) -> Result<Vec<HijriDate>> {
        let o = self.options;
        let mut out = Vec::new();
        if !o.bymonthday.is_empty() {
            for &d in &o.bymonthday {
                if let Some((y, m, day)) = self.apply_skip(year, month, d)? {
                    out.push(HijriDate::new_unchecked(y, m, day, 0, 0, 0));
                }
            }
        } else if !o.bynmonthday.is_empty() {
            let len = self.month_length(year, month)? as i32;
            for &n in &o.bynmonthday {
                let d = len + n + 1;
                if d >= 1 {
                    out.push(HijriDate::new_unchecked(year, month, d as u8, 0, 0, 0));
                }
            }
        } else if !o.bynweekday.is_empty() {
            for spec in &o.bynweekday {
                if let Some(day) = nth_weekday_of_month(
                    year,
                    month,
                    spec.weekday,
                    spec.n.unwrap_or(1),
                    self.calendar(),
                )? {
                    out.push(HijriDate::new_unchecked(year, month, day, 0, 0, 0));
                }
            }
        } else if !o.byweekday.is_empty() {
            let len = self.month_length(year, month)?;
            for day in 1..=len {
                if o.byweekday.contains(&self.weekday_of(year, month, day)?) {
                    out.push(HijriDate::new_unchecked(year, month, day, 0, 0, 0));
                }
            }
        } else {
            let len = self.month_length(year, month)?;
            let day = o.dtstart.day.min(len).max(1);
            out.push(HijriDate::new_unchecked(year, month, day, 0, 0, 0));
        }
        Ok(out)
    }

    fn yearly_candidates(&self, year: i32) -> Result<Vec<HijriDate>> {
        let o = self.options;
        let mut out = Vec::new();
        if !o.bymonth.is_empty() {
            for &m in &o.bymonth {
                out.extend(self.month_candidates(year, m)?);
            }
        } else if !o.bymonthday.is_empty() || !o.bynmonthday.is_empty() {
            out.extend(self.month_candidates(year, o.dtstart.month)?);
        } else if !o.byyearday.is_empty() {
            let yl = self.calendar().year_length(year)? as i32;
            for &k in &o.byyearday {
                let doy = if k > 0 { k } else { yl + k + 1 };
                if doy < 1 || doy > yl {
                    continue;
                }
                let mut remaining = doy;
                let mut month = 1u8;
                loop {
                    let ml = self.month_length(year, month)? as i32;
                    if remaining <= ml {
                        break;
                    }
                    remaining -= ml;
                    month += 1;
                }
                out.push(HijriDate::new_unchecked(
                    year,
                    month,
                    remaining as u8,
                    0,
                    0,
                    0,
                ));
            }
        } else {
            let len = self.month_length(year, o.dtstart.month)?;
            let day = o.dtstart.day.min(len).max(1);
            out.push(HijriDate::new_unchecked(
                year,
                o.dtstart.month,
                day,
                0,
                0,
                0,
            ));
        }
        if o.bymonth.is_empty() && !o.byweekday.is_empty() {
            let mut filtered = Vec::with_capacity(out.len());
            for d in out {
                if o.byweekday.contains(&self.weekday_of(d.year, d.month, d.day)?) {
                    filtered.push(d);
                }
            }
            out = filtered;
        }
        Ok(out)
    }

    fn weekly_candidates(&self, anchor: HijriDate) -> Result<Vec<HijriDate>> {
        let o = self.options;
        let mut out = Vec::new();
        if !o.byweekday.is_empty() {
            for offset in 0..7i64 {
                let d = add_days(&anchor, offset, self.calendar())?;
                if o.byweekday.contains(&self.weekday_of(d.year, d.month, d.day)?) {
                    out.push(d);
                }
            }
        } else {
            out.push(anchor);
        }
        Ok(out)
    }

    fn daily_candidates(&self, anchor: HijriDate) -> Result<Vec<HijriDate>> {
        let o = self.options;
        if !o.bymonth.is_empty() && !o.bymonth.contains(&anchor.month) {
            return Ok(Vec::new());
        }
        if !o.bymonthday.is_empty() && !o.bymonthday.contains(&(anchor.day as i32)) {
            return Ok(Vec::new());
        }
        if !o.bynmonthday.is_empty() {
            let month_len = self.month_length(anchor.year, anchor.month)? as i32;
            let matches_negative = o
                .bynmonthday
                .iter()
                .any(|n| anchor.day as i32 == month_len + n + 1);
            if !matches_negative {
                return Ok(Vec::new());
            }
        }
        if !o.byweekday.is_empty()
            && !o
                .byweekday
                .contains(&self.weekday_of(anchor.year, anchor.month, anchor.day)?)
        {
            return Ok(Vec::new());
        }
        Ok(vec![anchor])
    }

    fn candidates_for_period(&self) -> Result<Vec<HijriDate>> {
        let mut out = match self.options.freq {
            Frequency::Yearly => self.yearly_candidates(self.cursor.year)?,
            Frequency::Monthly => self.month_candidates(self.cursor.year, self.cursor.month)?,
            Frequency::Weekly => self.weekly_candidates(self.cursor)?,
            Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                self.daily_candidates(self.cursor)?
            }
        };
        out.sort();
        out.dedup_by_key(|d| d.date_key());
        if !self.options.bysetpos.is_empty() {
            out = apply_bysetpos(&out, &self.options.bysetpos);
        }
        Ok(out)
    }

    fn advance_cursor(&mut self) -> Result<bool> {
        let o = self.options;
        let next = match o.freq {
            Frequency::Yearly => add_years(&self.cursor, o.interval as i64, true, self.calendar())?,
            Frequency::Monthly => {
                add_months(&self.cursor, o.interval as i64, true, self.calendar())?
            }
            Frequency::Weekly => Some(add_days(
                &self.cursor,
                7 * o.interval as i64,
                self.calendar(),
            )?),
            Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                Some(add_days(&self.cursor, o.interval as i64, self.calendar())?)
            }
        };
        match next {
            Some(d) => {
                self.cursor = d;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn fill_buffer(&mut self) -> Result<()> {
        loop {
            if self.exhausted {
                return Ok(());
            }
            if let Some(count) = self.options.count {
                if self.emitted >= count as u64 {
                    self.exhausted = true;
                    return Ok(());
                }
            }
            if self.iterations >= self.safety_ceiling {
                self.exhausted = true;
                return Ok(());
            }
            self.iterations += 1;

            let candidates = self.candidates_for_period()?;
            let mut in_range: Vec<HijriDate> = candidates
                .into_iter()
                .filter(|d| *d >= self.options.dtstart)
                .collect();
            let mut stop_after_this_period = false;

            // One-period catch-up: a period whose candidates cross UNTIL
            // still yields everything up to UNTIL before the stream ends.
            if let Some(until) = self.options.until {
                if in_range.iter().any(|d| *d > until) {
                    in_range.retain(|d| *d <= until);
                    stop_after_this_period = true;
                }
            }
            // COUNT is enforced within a period too: a period may yield more
            // than one in-range candidate, and the boundary can fall inside
            // it (e.g. BYMONTHDAY=1,15 with COUNT=3).
            if let Some(count) = self.options.count {
                let remaining = (count as u64).saturating_sub(self.emitted) as usize;
                if in_range.len() > remaining {
                    in_range.truncate(remaining);
                    stop_after_this_period = true;
                }
            }

            if stop_after_this_period {
                self.buffer = in_range;
                self.buffer_pos = 0;
                self.exhausted = true;
                return Ok(());
            }

            if !self.advance_cursor()? {
                self.buffer = in_range;
                self.buffer_pos = 0;
                self.exhausted = true;
                return Ok(());
            }

            if !in_range.is_empty() {
                self.buffer = in_range;
                self.buffer_pos = 0;
                return Ok(());
            }
        }
    }
}

/// Select values at 1-based positions in `candidates` (negative positions
/// count from the end), re-sorted and de-duplicated (spec section 4.5,
/// "BYSETPOS").
fn apply_bysetpos(candidates: &[HijriDate], positions: &[i32]) -> Vec<HijriDate> {
    let k = candidates.len() as i32;
    let mut selected: Vec<HijriDate> = positions
        .iter()
        .filter_map(|&p| {
            if p >= 1 && p <= k {
                Some(candidates[(p - 1) as usize])
            } else if p <= -1 && k + p >= 0 {
                Some(candidates[(k + p) as usize])
            } else {
                None
            }
        })
        .collect();
    selected.sort();
    selected.dedup_by_key(|d| d.date_key());
    selected
}

impl<'a> Iterator for RecurrenceIter<'a> {
    type Item = Result<HijriDate>;

    fn next(&mut self) -> Option<Result<HijriDate>> {
        loop {
            if self.buffer_pos < self.buffer.len() {
                let d = self.buffer[self.buffer_pos];
                self.buffer_pos += 1;
                self.emitted += 1;
                return Some(Ok(d));
            }
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.fill_buffer() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
    }
}
