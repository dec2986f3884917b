// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proleptic Gregorian <-> Julian Day Number conversion.
//!
//! The algebra here is the Fliegel & Van Flandern integer formulae; applied
//! to a noon-based Julian Day Number, which is the same integer day index
//! `floor(JDN + 0.5)` produces for a midnight epoch such as 1 Muharram 1 AH.

/// A civil (Gregorian proleptic) date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl GregorianDate {
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> GregorianDate {
        GregorianDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Julian Day Number of the proleptic Gregorian calendar date (year, month, day).
pub fn gregorian_to_jdn(year: i32, month: u8, day: u8) -> i64 {
    let year = year as i64;
    let month = month as i64;
    let day = day as i64;
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Inverse of [`gregorian_to_jdn`].
pub fn jdn_to_gregorian(jdn: i64) -> (i32, u8, u8) {
    let a = jdn + 32044;
    let b = (4 * a + 3).div_euclid(146097);
    let c = a - (146097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = 100 * b + d - 4800 + m.div_euclid(10);
    (year as i32, month as u8, day as u8)
}

/// The Julian Day Number of 1 Muharram 1 AH (`floor(1948439.5 + 0.5)`).
pub const HIJRI_EPOCH_JDN: i64 = 1948440;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rata_die_notable_days() {
        // Calendrical Calculations Table 1.2, via JDN = RD + 1721425.
        assert_eq!(gregorian_to_jdn(1, 1, 1), 1721426);
        assert_eq!(gregorian_to_jdn(622, 7, 19), HIJRI_EPOCH_JDN);
        assert_eq!(gregorian_to_jdn(1970, 1, 1), 719163 + 1721425);
    }

    #[test]
    fn roundtrip() {
        for jdn in [1721426i64, HIJRI_EPOCH_JDN, 2451545, 2460000, 1948440] {
            let (y, m, d) = jdn_to_gregorian(jdn);
            assert_eq!(gregorian_to_jdn(y, m, d), jdn);
        }
    }

    #[test]
    fn islamic_epoch_matches_gregorian() {
        let (y, m, d) = jdn_to_gregorian(HIJRI_EPOCH_JDN);
        assert_eq!((y, m, d), (622, 7, 19));
    }
}
