// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide configuration: the default calendar back-end used when a
//! rule or date does not name one explicitly.

use crate::calendar::backend::CalendarKind;
use crate::calendar::jdn_to_gregorian;
use crate::date::HijriDate;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Julian Day Number of the Unix epoch, 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2440588;

fn default_calendar_cell() -> &'static Mutex<CalendarKind> {
    static CELL: std::sync::OnceLock<Mutex<CalendarKind>> = std::sync::OnceLock::new();
    CELL.get_or_init(|| Mutex::new(CalendarKind::default()))
}

/// The calendar back-end new rules and dates fall back to when none is
/// named explicitly. Defaults to [`CalendarKind::UmmAlQura`].
pub fn default_calendar() -> CalendarKind {
    *default_calendar_cell()
        .lock()
        .expect("default calendar mutex poisoned")
}

/// Set the process-wide default calendar back-end.
///
/// Must be called before any rule is constructed to avoid mid-lifecycle
/// inconsistency; the library does not enforce that ordering itself.
pub fn set_default_calendar(kind: CalendarKind) {
    *default_calendar_cell()
        .lock()
        .expect("default calendar mutex poisoned") = kind;
}

/// Restore the default calendar back-end to [`CalendarKind::UmmAlQura`].
pub fn reset_default_calendar() {
    set_default_calendar(CalendarKind::default());
}

/// Today's date in the default calendar's Hijri representation, derived
/// from the wall-clock time. Used as the `dtstart` default when the
/// caller supplies none.
pub fn today(calendar: CalendarKind) -> crate::error::Result<HijriDate> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs();
    let jdn = UNIX_EPOCH_JDN + (secs / 86_400) as i64;
    let (y, m, d) = jdn_to_gregorian(jdn);
    let g = crate::calendar::GregorianDate::new(y, m, d, 0, 0, 0);
    HijriDate::from_gregorian(g, calendar)
}
