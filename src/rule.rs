// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single recurrence rule and its query surface (spec section 4.6).

use crate::cache::QueryCache;
use crate::date::HijriDate;
use crate::error::Result;
use crate::expand::RecurrenceIter;
use crate::options::{ParsedOptions, PartialOptions};
use crate::rrule_text;
use std::cell::RefCell;

/// A single `FREQ=...` recurrence rule, immutable once constructed. Query
/// results for callback-free calls are memoized in an interior-mutable
/// cache (spec section 5: single-threaded, no cross-instance sharing).
pub struct RecurrenceRule {
    options: ParsedOptions,
    cache: RefCell<QueryCache>,
}

impl RecurrenceRule {
    pub fn from_options(options: PartialOptions) -> Result<RecurrenceRule> {
        Ok(RecurrenceRule {
            options: options.normalize()?,
            cache: RefCell::new(QueryCache::new()),
        })
    }

    pub fn from_text(text: &str) -> Result<RecurrenceRule> {
        RecurrenceRule::from_options(rrule_text::parse(text)?)
    }

    pub fn to_text(&self) -> String {
        rrule_text::serialize(&self.options)
    }

    pub fn options(&self) -> &ParsedOptions {
        &self.options
    }

    fn iter(&self) -> RecurrenceIter<'_> {
        RecurrenceIter::new(&self.options)
    }

    /// All occurrences, optionally short-circuited by `callback` (which
    /// stops the drain the first time it returns `false`). Memoized when
    /// no callback is supplied.
    pub fn all(&self, mut callback: Option<&mut dyn FnMut(&HijriDate) -> bool>) -> Result<Vec<HijriDate>> {
        if callback.is_none() {
            if let Some(cached) = self.cache.borrow().all() {
                return Ok(cached.to_vec());
            }
        }
        let mut out = Vec::new();
        for item in self.iter() {
            let date = item?;
            out.push(date);
            if let Some(cb) = callback.as_deref_mut() {
                if !cb(&date) {
                    break;
                }
            }
        }
        if callback.is_none() {
            self.cache.borrow_mut().set_all(out.clone());
        }
        Ok(out)
    }

    /// First occurrence after (or at, if `inclusive`) `date`.
    pub fn after(&self, date: HijriDate, inclusive: bool) -> Result<Option<HijriDate>> {
        if let Some(cached) = self.cache.borrow().after(&date, inclusive) {
            return Ok(cached);
        }
        let mut found = None;
        for item in self.iter() {
            let d = item?;
            if (inclusive && d >= date) || (!inclusive && d > date) {
                found = Some(d);
                break;
            }
        }
        self.cache.borrow_mut().set_after(&date, inclusive, found);
        Ok(found)
    }

    /// Last occurrence before (or at, if `inclusive`) `date`; requires
    /// full consumption of the stream up to `date`.
    pub fn before(&self, date: HijriDate, inclusive: bool) -> Result<Option<HijriDate>> {
        if let Some(cached) = self.cache.borrow().before(&date, inclusive) {
            return Ok(cached);
        }
        let mut found = None;
        for item in self.iter() {
            let d = item?;
            if (inclusive && d > date) || (!inclusive && d >= date) {
                break;
            }
            found = Some(d);
        }
        self.cache.borrow_mut().set_before(&date, inclusive, found);
        Ok(found)
    }

    /// Occurrences within `[a, b]` (or `(a, b)` when not `inclusive`).
    pub fn between(
        &self,
        a: HijriDate,
        b: HijriDate,
        inclusive: bool,
        mut callback: Option<&mut dyn FnMut(&HijriDate) -> bool>,
    ) -> Result<Vec<HijriDate>> {
        if callback.is_none() {
            if let Some(cached) = self.cache.borrow().between(&a, &b, inclusive) {
                return Ok(cached.to_vec());
            }
        }
        let mut out = Vec::new();
        for item in self.iter() {
            let d = item?;
            let after_a = if inclusive { d >= a } else { d > a };
            let before_b = if inclusive { d <= b } else { d < b };
            if !after_a {
                continue;
            }
            if !before_b {
                break;
            }
            out.push(d);
            if let Some(cb) = callback.as_deref_mut() {
                if !cb(&d) {
                    break;
                }
            }
        }
        if callback.is_none() {
            self.cache.borrow_mut().set_between(&a, &b, inclusive, out.clone());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DateSpec, Frequency};

    fn daily_rule(count: u32) -> RecurrenceRule {
        let mut opts = PartialOptions::new(Frequency::Daily);
        opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
        opts.count = Some(count);
        RecurrenceRule::from_options(opts).unwrap()
    }

    #[test]
    fn all_is_idempotent() {
        let rule = daily_rule(10);
        let first = rule.all(None).unwrap();
        let second = rule.all(None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn after_and_before() {
        let rule = daily_rule(10);
        let pivot = HijriDate::new_unchecked(1446, 1, 5, 0, 0, 0);
        let after = rule.after(pivot, false).unwrap().unwrap();
        assert_eq!(after.date_key(), (1446, 1, 6));
        let before = rule.before(pivot, false).unwrap().unwrap();
        assert_eq!(before.date_key(), (1446, 1, 4));
    }

    #[test]
    fn between_is_inclusive_range() {
        let rule = daily_rule(10);
        let a = HijriDate::new_unchecked(1446, 1, 3, 0, 0, 0);
        let b = HijriDate::new_unchecked(1446, 1, 6, 0, 0, 0);
        let dates = rule.between(a, b, true, None).unwrap();
        assert_eq!(
            dates.iter().map(|d| d.date_key()).collect::<Vec<_>>(),
            vec![(1446, 1, 3), (1446, 1, 4), (1446, 1, 5), (1446, 1, 6)]
        );
    }

    #[test]
    fn callback_short_circuits_all() {
        let rule = daily_rule(10);
        let mut seen = 0;
        let mut cb = |_: &HijriDate| {
            seen += 1;
            seen < 3
        };
        let dates = rule.all(Some(&mut cb)).unwrap();
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn text_roundtrip_reproduces_sequence() {
        let rule = daily_rule(5);
        let text = rule.to_text();
        let reparsed = RecurrenceRule::from_text(&text).unwrap();
        assert_eq!(rule.all(None).unwrap(), reparsed.all(None).unwrap());
    }
}
