// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Errors surfaced by this crate.
///
/// `InvalidInput`, `InvalidDate` and `OutOfEpoch` carry a short message
/// describing what was rejected; they are synchronous failures raised at
/// the call boundary (construction, parsing, validation) and are never
/// caught internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// A validation failure in option normalization, a malformed RRULE or
    /// DTSTART line, an unknown `CALENDAR`/`FREQ`/`WKST`/`SKIP` value, or
    /// an unrecognized `BYDAY` token.
    InvalidInput(String),
    /// Construction of a Hijri date whose (year, month, day) does not
    /// satisfy the active provider's month length.
    InvalidDate(String),
    /// A date arithmetic operation that would produce a year less than 1,
    /// or a `SKIP=FORWARD` rollover past the last representable year.
    OutOfEpoch(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CalendarError::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            CalendarError::OutOfEpoch(msg) => write!(f, "out of epoch: {msg}"),
        }
    }
}

impl Error for CalendarError {}

pub type Result<T> = std::result::Result<T, CalendarError>;
