// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use hijri_rrule::calendar::CalendarKind;
use hijri_rrule::{DateSpec, Frequency, PartialOptions, RecurrenceRule};

#[test]
fn bit_exact_serialization_from_section_six() {
    let mut opts = PartialOptions::new(Frequency::Yearly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 9, 1, 0, 0, 0));
    opts.bymonth = Some(vec![9]);
    opts.bymonthday = Some(vec![1]);
    opts.count = Some(3);
    let rule = RecurrenceRule::from_options(opts).unwrap();

    let expected =
        "DTSTART;CALENDAR=HIJRI-UM-AL-QURA:14460901\nRRULE:FREQ=YEARLY;COUNT=3;BYMONTH=9;BYMONTHDAY=1";
    assert_eq!(rule.to_text(), expected);
}

#[test]
fn parsing_accepts_calendar_aliases() {
    for alias in ["HIJRI-UM-AL-QURA", "umm-al-qura", "umalqura", "ISLAMIC-UMALQURA"] {
        let text = format!("DTSTART;CALENDAR={alias}:14460101\nRRULE:FREQ=DAILY;COUNT=1");
        let rule = RecurrenceRule::from_text(&text).unwrap();
        assert_eq!(rule.options().calendar, CalendarKind::UmmAlQura);
    }
    for alias in ["HIJRI-TABULAR", "tabular", "tbla", "islamic-tbla"] {
        let text = format!("DTSTART;CALENDAR={alias}:14460101\nRRULE:FREQ=DAILY;COUNT=1");
        let rule = RecurrenceRule::from_text(&text).unwrap();
        assert_eq!(rule.options().calendar, CalendarKind::Tabular);
    }
}

#[test]
fn unknown_calendar_is_rejected() {
    let text = "DTSTART;CALENDAR=GREGORIAN:14460101\nRRULE:FREQ=DAILY;COUNT=1";
    assert!(RecurrenceRule::from_text(text).is_err());
}

#[test]
fn property_round_trip_reproduces_the_same_sequence() {
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 15, 0, 0, 0));
    opts.count = Some(6);
    opts.interval = Some(2);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let text = rule.to_text();
    let reparsed = RecurrenceRule::from_text(&text).unwrap();
    assert_eq!(rule.all(None).unwrap(), reparsed.all(None).unwrap());
}

#[test]
fn byday_mini_grammar_round_trips() {
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.byweekday = Some(vec![
        hijri_rrule::Weekday::Friday.nth(-1),
        hijri_rrule::Weekday::Sunday.plain(),
    ]);
    opts.count = Some(2);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let text = rule.to_text();
    assert!(text.contains("BYDAY=SU,-1FR"));
    let reparsed = RecurrenceRule::from_text(&text).unwrap();
    assert_eq!(rule.all(None).unwrap(), reparsed.all(None).unwrap());
}
