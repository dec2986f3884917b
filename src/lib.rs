// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RFC 5545 style recurrence rules evaluated against the Hijri calendar.
//!
//! A [`calendar::CalendarKind`] selects between the purely arithmetic
//! tabular back-end and the table-driven Umm al-Qura back-end; a
//! [`rule::RecurrenceRule`] expands a parsed set of options into an
//! ascending stream of [`date::HijriDate`] occurrences; a
//! [`ruleset::RuleSet`] composes multiple rules and explicit dates into a
//! single union-minus-exclusion sequence.

#[macro_use]
extern crate num_derive;

pub mod calendar {
    pub mod backend;
    mod jdn;
    mod tabular;
    mod umalqura;

    pub use backend::{CalendarKind, HijriCalendar};
    pub use jdn::{gregorian_to_jdn, jdn_to_gregorian, GregorianDate, HIJRI_EPOCH_JDN};
    pub use tabular::Tabular;
    pub use umalqura::UmmAlQura;
}
mod arithmetic;
mod cache;
pub mod config;
mod date;
mod error;
mod expand;
mod options;
mod rrule_text;
mod rule;
mod ruleset;
mod weekday;

pub use arithmetic::{add_days, add_months, add_years, nth_weekday_of_month};
pub use date::HijriDate;
pub use error::{CalendarError, Result};
pub use expand::RecurrenceIter;
pub use options::{DateSpec, Frequency, ParsedOptions, PartialOptions, SkipPolicy};
pub use rule::RecurrenceRule;
pub use ruleset::RuleSet;
pub use weekday::{Weekday, WeekdaySpec};
