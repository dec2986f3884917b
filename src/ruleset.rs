// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composition of multiple rules and explicit date inclusions/exclusions
//! (spec section 4.7): `(union of inclusions) minus (union of exclusions)`.

use crate::cache::QueryCache;
use crate::date::HijriDate;
use crate::error::Result;
use crate::options::PartialOptions;
use crate::rule::RecurrenceRule;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// A set of inclusion/exclusion rules and explicit dates, queried with the
/// same surface as a single [`RecurrenceRule`].
#[derive(Default)]
pub struct RuleSet {
    rrules: Vec<RecurrenceRule>,
    rdates: Vec<HijriDate>,
    exrules: Vec<RecurrenceRule>,
    exdates: Vec<HijriDate>,
    tzid: Option<String>,
    cache: RefCell<QueryCache>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet::default()
    }

    pub fn rrule(&mut self, options: PartialOptions) -> Result<&mut Self> {
        self.rrules.push(RecurrenceRule::from_options(options)?);
        self.cache.borrow_mut().clear();
        Ok(self)
    }

    pub fn exrule(&mut self, options: PartialOptions) -> Result<&mut Self> {
        self.exrules.push(RecurrenceRule::from_options(options)?);
        self.cache.borrow_mut().clear();
        Ok(self)
    }

    pub fn rdate(&mut self, date: HijriDate) -> &mut Self {
        self.rdates.push(date);
        self.cache.borrow_mut().clear();
        self
    }

    pub fn exdate(&mut self, date: HijriDate) -> &mut Self {
        self.exdates.push(date);
        self.cache.borrow_mut().clear();
        self
    }

    pub fn set_tzid(&mut self, tzid: Option<String>) {
        self.tzid = tzid;
        self.cache.borrow_mut().clear();
    }

    pub fn tzid(&self) -> Option<&str> {
        self.tzid.as_deref()
    }

    fn materialize(&self) -> Result<Vec<HijriDate>> {
        let mut included: BTreeMap<(i32, u8, u8), HijriDate> = BTreeMap::new();
        for rule in &self.rrules {
            for date in rule.all(None)? {
                included.insert(date.date_key(), date);
            }
        }
        for &date in &self.rdates {
            included.insert(date.date_key(), date);
        }

        let mut excluded: BTreeSet<(i32, u8, u8)> = BTreeSet::new();
        for rule in &self.exrules {
            for date in rule.all(None)? {
                excluded.insert(date.date_key());
            }
        }
        for &date in &self.exdates {
            excluded.insert(date.date_key());
        }

        Ok(included
            .into_iter()
            .filter(|(key, _)| !excluded.contains(key))
            .map(|(_, date)| date)
            .collect())
    }

    pub fn all(&self) -> Result<Vec<HijriDate>> {
        if let Some(cached) = self.cache.borrow().all() {
            return Ok(cached.to_vec());
        }
        let dates = self.materialize()?;
        self.cache.borrow_mut().set_all(dates.clone());
        Ok(dates)
    }

    pub fn after(&self, date: HijriDate, inclusive: bool) -> Result<Option<HijriDate>> {
        let all = self.all()?;
        Ok(all
            .into_iter()
            .find(|d| (inclusive && *d >= date) || (!inclusive && *d > date)))
    }

    pub fn before(&self, date: HijriDate, inclusive: bool) -> Result<Option<HijriDate>> {
        let all = self.all()?;
        Ok(all
            .into_iter()
            .take_while(|d| (inclusive && *d <= date) || (!inclusive && *d < date))
            .last())
    }

    pub fn between(&self, a: HijriDate, b: HijriDate, inclusive: bool) -> Result<Vec<HijriDate>> {
        let all = self.all()?;
        Ok(all
            .into_iter()
            .filter(|d| {
                let after_a = if inclusive { *d >= a } else { *d > a };
                let before_b = if inclusive { *d <= b } else { *d < b };
                after_a && before_b
            })
            .collect())
    }
}
