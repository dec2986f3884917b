// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Memoization of callback-free query results.

use crate::date::HijriDate;
use std::collections::HashMap;

fn key_of(date: &HijriDate) -> String {
    let (y, m, d) = date.date_key();
    format!("{y:04}-{m:02}-{d:02}")
}

/// Per-rule (or per-rule-set) memoization of `all`, `after`, `before` and
/// `between` results. Cleared whenever the owning collection mutates.
#[derive(Debug, Default)]
pub struct QueryCache {
    all: Option<Vec<HijriDate>>,
    after: HashMap<String, Option<HijriDate>>,
    before: HashMap<String, Option<HijriDate>>,
    between: HashMap<String, Vec<HijriDate>>,
}

impl QueryCache {
    pub fn new() -> QueryCache {
        QueryCache::default()
    }

    pub fn clear(&mut self) {
        *self = QueryCache::default();
    }

    pub fn all(&self) -> Option<&[HijriDate]> {
        self.all.as_deref()
    }

    pub fn set_all(&mut self, dates: Vec<HijriDate>) {
        self.all = Some(dates);
    }

    pub fn after(&self, date: &HijriDate, inclusive: bool) -> Option<Option<HijriDate>> {
        self.after.get(&format!("{}|{inclusive}", key_of(date))).copied()
    }

    pub fn set_after(&mut self, date: &HijriDate, inclusive: bool, result: Option<HijriDate>) {
        self.after
            .insert(format!("{}|{inclusive}", key_of(date)), result);
    }

    pub fn before(&self, date: &HijriDate, inclusive: bool) -> Option<Option<HijriDate>> {
        self.before.get(&format!("{}|{inclusive}", key_of(date))).copied()
    }

    pub fn set_before(&mut self, date: &HijriDate, inclusive: bool, result: Option<HijriDate>) {
        self.before
            .insert(format!("{}|{inclusive}", key_of(date)), result);
    }

    pub fn between(
        &self,
        a: &HijriDate,
        b: &HijriDate,
        inclusive: bool,
    ) -> Option<&[HijriDate]> {
        self.between
            .get(&format!("{}|{}|{inclusive}", key_of(a), key_of(b)))
            .map(|v| v.as_slice())
    }

    pub fn set_between(
        &mut self,
        a: &HijriDate,
        b: &HijriDate,
        inclusive: bool,
        dates: Vec<HijriDate>,
    ) {
        self.between
            .insert(format!("{}|{}|{inclusive}", key_of(a), key_of(b)), dates);
    }
}
