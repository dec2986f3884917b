// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RRULE textual grammar: parsing `DTSTART`/`RRULE` lines into
//! [`PartialOptions`], and serializing [`ParsedOptions`] back out in
//! canonical form (spec section 4.3 / section 6).

use crate::calendar::backend::CalendarKind;
use crate::error::{CalendarError, Result};
use crate::options::{DateSpec, Frequency, ParsedOptions, PartialOptions, SkipPolicy};
use crate::weekday::{Weekday, WeekdaySpec};

/// `YYYYMMDD[THHMMSS[Z]]` carries Hijri digits directly: the text grammar
/// is an extension of RRULE for the Hijri calendar, so a date token is
/// never a Gregorian civil date in need of conversion (that coercion
/// exists in [`crate::options::DateSpec`] only for the programmatic
/// surface, where a caller may hand in a [`GregorianDate`] directly).
fn parse_date_token(token: &str) -> Result<DateSpec> {
    let token = token.strip_suffix('Z').unwrap_or(token);
    let (date_part, time_part) = match token.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (token, None),
    };
    if date_part.len() != 8 {
        return Err(CalendarError::InvalidInput(format!(
            "malformed date token '{token}'"
        )));
    }
    let parse_field = |s: &str| -> Result<i32> {
        s.parse()
            .map_err(|_| CalendarError::InvalidInput(format!("malformed date token '{token}'")))
    };
    let year: i32 = parse_field(&date_part[0..4])?;
    let month: u8 = parse_field(&date_part[4..6])? as u8;
    let day: u8 = parse_field(&date_part[6..8])? as u8;
    let (hour, minute, second) = match time_part {
        Some(t) if t.len() == 6 => (
            parse_field(&t[0..2])? as u8,
            parse_field(&t[2..4])? as u8,
            parse_field(&t[4..6])? as u8,
        ),
        Some(_) => {
            return Err(CalendarError::InvalidInput(format!(
                "malformed time token in '{token}'"
            )))
        }
        None => (0, 0, 0),
    };
    Ok(DateSpec::Hijri(year, month, day, hour, minute, second))
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.to_string()).collect()
}

fn parse_int_list(value: &str, field: &str) -> Result<Vec<i32>> {
    split_list(value)
        .iter()
        .map(|s| {
            s.trim()
                .parse::<i32>()
                .map_err(|_| CalendarError::InvalidInput(format!("malformed {field} entry '{s}'")))
        })
        .collect()
}

fn parse_u8_list(value: &str, field: &str) -> Result<Vec<u8>> {
    parse_int_list(value, field)?
        .into_iter()
        .map(|v| {
            u8::try_from(v)
                .map_err(|_| CalendarError::InvalidInput(format!("{field} entry {v} out of range")))
        })
        .collect()
}

/// Parse a full `DTSTART[;CALENDAR=...]:<token>\nRRULE:<props>` text form
/// (the DTSTART line is optional) into [`PartialOptions`].
pub fn parse(text: &str) -> Result<PartialOptions> {
    let mut options = PartialOptions::default();
    for line in text.split(['\n', '\r']).filter(|l| !l.trim().is_empty()) {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("DTSTART") {
            let (params, value) = rest
                .split_once(':')
                .ok_or_else(|| CalendarError::InvalidInput("malformed DTSTART line".to_string()))?;
            for param in params.split(';').filter(|p| !p.is_empty()) {
                let (name, val) = param.split_once('=').ok_or_else(|| {
                    CalendarError::InvalidInput(format!("malformed DTSTART parameter '{param}'"))
                })?;
                if name.eq_ignore_ascii_case("CALENDAR") {
                    options.calendar = Some(CalendarKind::parse(val)?);
                } else {
                    return Err(CalendarError::InvalidInput(format!(
                        "unknown DTSTART parameter '{name}'"
                    )));
                }
            }
            options.dtstart = Some(parse_date_token(value)?);
        } else if let Some(rest) = line.strip_prefix("RRULE:") {
            for prop in rest.split(';').filter(|p| !p.is_empty()) {
                let (name, value) = prop.split_once('=').ok_or_else(|| {
                    CalendarError::InvalidInput(format!("malformed RRULE property '{prop}'"))
                })?;
                apply_property(&mut options, &name.to_ascii_uppercase(), value)?;
            }
        } else {
            return Err(CalendarError::InvalidInput(format!(
                "unrecognized line '{line}'"
            )));
        }
    }
    if options.freq.is_none() {
        return Err(CalendarError::InvalidInput("FREQ is required".to_string()));
    }
    Ok(options)
}

fn apply_property(options: &mut PartialOptions, name: &str, value: &str) -> Result<()> {
    match name {
        "FREQ" => options.freq = Some(Frequency::parse(value)?),
        "INTERVAL" => {
            options.interval = Some(value.parse().map_err(|_| {
                CalendarError::InvalidInput(format!("malformed INTERVAL value '{value}'"))
            })?)
        }
        "WKST" => options.wkst = Some(parse_weekday_code(value)?),
        "COUNT" => {
            options.count = Some(value.parse().map_err(|_| {
                CalendarError::InvalidInput(format!("malformed COUNT value '{value}'"))
            })?)
        }
        "UNTIL" => options.until = Some(parse_date_token(value)?),
        "TZID" => options.tzid = Some(value.to_string()),
        "BYSETPOS" => options.bysetpos = Some(parse_int_list(value, "BYSETPOS")?),
        "BYMONTH" => options.bymonth = Some(parse_u8_list(value, "BYMONTH")?),
        "BYMONTHDAY" => options.bymonthday = Some(parse_int_list(value, "BYMONTHDAY")?),
        "BYYEARDAY" => options.byyearday = Some(parse_int_list(value, "BYYEARDAY")?),
        "BYWEEKNO" => options.byweekno = Some(parse_int_list(value, "BYWEEKNO")?),
        "BYDAY" | "BYWEEKDAY" => {
            options.byweekday = Some(
                split_list(value)
                    .iter()
                    .map(|tok| WeekdaySpec::parse(tok))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        "BYHOUR" => options.byhour = Some(parse_u8_list(value, "BYHOUR")?),
        "BYMINUTE" => options.byminute = Some(parse_u8_list(value, "BYMINUTE")?),
        "BYSECOND" => options.bysecond = Some(parse_u8_list(value, "BYSECOND")?),
        "SKIP" => options.skip = Some(SkipPolicy::parse(value)?),
        // Unrecognized properties are ignored rather than rejected: a
        // missing FREQ still surfaces its own "FREQ is required" error,
        // which is what a caller who mistyped a property name sees.
        _ => {}
    }
    Ok(())
}

fn parse_weekday_code(code: &str) -> Result<Weekday> {
    WeekdaySpec::parse(code).and_then(|spec| {
        if spec.n.is_some() {
            Err(CalendarError::InvalidInput(format!(
                "WKST must not carry an ordinal: '{code}'"
            )))
        } else {
            Ok(spec.weekday)
        }
    })
}

fn format_date(date: &crate::date::HijriDate, calendar: Option<CalendarKind>) -> String {
    let mut out = String::new();
    if let Some(cal) = calendar {
        out.push_str(";CALENDAR=");
        out.push_str(cal.as_rrule_str());
    }
    out.push(':');
    out.push_str(&format!(
        "{:04}{:02}{:02}",
        date.year, date.month, date.day
    ));
    if date.hour != 0 || date.minute != 0 || date.second != 0 {
        out.push('T');
        out.push_str(&format!(
            "{:02}{:02}{:02}",
            date.hour, date.minute, date.second
        ));
    }
    out
}

fn format_int_list(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn format_u8_list(values: &[u8]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize [`ParsedOptions`] back into the canonical textual form (spec
/// section 6): `DTSTART` only when it differs from the no-parameter
/// default representation is always emitted; default-valued properties
/// are omitted from the `RRULE` line.
pub fn serialize(options: &ParsedOptions) -> String {
    let mut out = String::new();
    out.push_str("DTSTART");
    out.push_str(&format_date(&options.dtstart, Some(options.calendar)));
    out.push('\n');

    out.push_str("RRULE:FREQ=");
    out.push_str(options.freq.as_rrule_str());

    if options.interval != 1 {
        out.push_str(&format!(";INTERVAL={}", options.interval));
    }
    if options.wkst != Weekday::Sunday {
        out.push_str(";WKST=");
        out.push_str(options.wkst.plain().to_rrule_string().as_str());
    }
    if let Some(count) = options.count {
        out.push_str(&format!(";COUNT={count}"));
    }
    if let Some(until) = &options.until {
        out.push_str(";UNTIL=");
        out.push_str(&format!(
            "{:04}{:02}{:02}",
            until.year, until.month, until.day
        ));
    }
    if !options.bysetpos.is_empty() {
        out.push_str(";BYSETPOS=");
        out.push_str(&format_int_list(&options.bysetpos));
    }
    if !options.bymonth.is_empty() {
        out.push_str(";BYMONTH=");
        out.push_str(&format_u8_list(&options.bymonth));
    }
    let merged_monthday: Vec<i32> = options
        .bymonthday
        .iter()
        .chain(options.bynmonthday.iter())
        .copied()
        .collect();
    if !merged_monthday.is_empty() {
        out.push_str(";BYMONTHDAY=");
        out.push_str(&format_int_list(&merged_monthday));
    }
    if !options.byyearday.is_empty() {
        out.push_str(";BYYEARDAY=");
        out.push_str(&format_int_list(&options.byyearday));
    }
    if !options.byweekno.is_empty() {
        out.push_str(";BYWEEKNO=");
        out.push_str(&format_int_list(&options.byweekno));
    }
    let merged_weekday: Vec<String> = options
        .byweekday
        .iter()
        .map(|w| w.plain().to_rrule_string())
        .chain(options.bynweekday.iter().map(|w| w.to_rrule_string()))
        .collect();
    if !merged_weekday.is_empty() {
        out.push_str(";BYDAY=");
        out.push_str(&merged_weekday.join(","));
    }
    if !options.byhour.is_empty() {
        out.push_str(";BYHOUR=");
        out.push_str(&format_u8_list(&options.byhour));
    }
    if !options.byminute.is_empty() {
        out.push_str(";BYMINUTE=");
        out.push_str(&format_u8_list(&options.byminute));
    }
    if !options.bysecond.is_empty() {
        out.push_str(";BYSECOND=");
        out.push_str(&format_u8_list(&options.bysecond));
    }
    if options.skip != SkipPolicy::Omit {
        out.push_str(";SKIP=");
        out.push_str(options.skip.as_rrule_str());
    }
    if let Some(tzid) = &options.tzid {
        out.push_str(";TZID=");
        out.push_str(tzid);
    }
    out
}
