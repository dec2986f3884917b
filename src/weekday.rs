// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekday enumeration and the `BYDAY` weekday-spec mini-grammar.

use crate::error::{CalendarError, Result};
use num_traits::FromPrimitive;

/// A day of the Islamic week. The week starts on Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Weekday {
    Saturday = 0,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// `day_of_week = (floor(JDN + 0.5) + 2) mod 7`, Saturday-origin.
    /// Since [`crate::calendar::gregorian_to_jdn`] returns an
    /// already-integral noon JDN, `floor(JDN + 0.5)` is just `jdn` itself.
    pub fn from_jdn(jdn: i64) -> Weekday {
        let idx = (jdn + 2).rem_euclid(7);
        Weekday::from_i64(idx).expect("rem_euclid(7) is always in [0, 6]")
    }

    fn two_letter_code(self) -> &'static str {
        match self {
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
        }
    }

    fn from_two_letter_code(code: &str) -> Result<Weekday> {
        match code {
            "SA" => Ok(Weekday::Saturday),
            "SU" => Ok(Weekday::Sunday),
            "MO" => Ok(Weekday::Monday),
            "TU" => Ok(Weekday::Tuesday),
            "WE" => Ok(Weekday::Wednesday),
            "TH" => Ok(Weekday::Thursday),
            "FR" => Ok(Weekday::Friday),
            other => Err(CalendarError::InvalidInput(format!(
                "unrecognized BYDAY code '{other}'"
            ))),
        }
    }

    pub fn nth(self, n: i32) -> WeekdaySpec {
        WeekdaySpec {
            weekday: self,
            n: Some(n),
        }
    }

    pub fn plain(self) -> WeekdaySpec {
        WeekdaySpec {
            weekday: self,
            n: None,
        }
    }
}

/// A `BYDAY` entry: a weekday, with an optional nonzero `n` meaning "the
/// `|n|`-th occurrence of this weekday within the enclosing period,
/// counted from the end when `n < 0`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdaySpec {
    pub weekday: Weekday,
    pub n: Option<i32>,
}

impl WeekdaySpec {
    /// Parse a single `BYDAY` token per `/^(-?\d+)?([A-Z]{2})$/`.
    pub fn parse(token: &str) -> Result<WeekdaySpec> {
        let token = token.trim();
        if token.len() < 2 {
            return Err(CalendarError::InvalidInput(format!(
                "empty BYDAY token '{token}'"
            )));
        }
        let (n_part, code) = token.split_at(token.len() - 2);
        let weekday = Weekday::from_two_letter_code(&code.to_ascii_uppercase())?;
        let n = if n_part.is_empty() {
            None
        } else {
            let n: i32 = n_part.parse().map_err(|_| {
                CalendarError::InvalidInput(format!("invalid BYDAY ordinal in '{token}'"))
            })?;
            if n == 0 {
                return Err(CalendarError::InvalidInput(
                    "BYDAY ordinal must not be zero".to_string(),
                ));
            }
            Some(n)
        };
        Ok(WeekdaySpec { weekday, n })
    }

    pub fn to_rrule_string(self) -> String {
        match self.n {
            Some(n) => format!("{n}{}", self.weekday.two_letter_code()),
            None => self.weekday.two_letter_code().to_string(),
        }
    }
}
