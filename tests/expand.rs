// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use hijri_rrule::calendar::CalendarKind;
use hijri_rrule::{DateSpec, Frequency, PartialOptions, RecurrenceRule, Weekday};
use proptest::proptest;

fn dates_of(rule: &RecurrenceRule) -> Vec<(i32, u8, u8)> {
    rule.all(None)
        .unwrap()
        .iter()
        .map(|d| d.date_key())
        .collect()
}

#[test]
fn scenario_s1_yearly_ramadan_count_three() {
    let mut opts = PartialOptions::new(Frequency::Yearly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 9, 1, 0, 0, 0));
    opts.bymonth = Some(vec![9]);
    opts.bymonthday = Some(vec![1]);
    opts.count = Some(3);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    assert_eq!(
        dates_of(&rule),
        vec![(1446, 9, 1), (1447, 9, 1), (1448, 9, 1)]
    );
}

#[test]
fn scenario_s2_monthly_fifteenth() {
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 15, 0, 0, 0));
    opts.count = Some(3);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = dates_of(&rule);
    assert_eq!(
        dates,
        vec![(1446, 1, 15), (1446, 2, 15), (1446, 3, 15)]
    );
    assert!(dates.iter().all(|&(_, _, d)| d == 15));
}

#[test]
fn scenario_s3_text_roundtrip_tabular() {
    let text =
        "DTSTART;CALENDAR=HIJRI-TABULAR:14460101\nRRULE:FREQ=MONTHLY;COUNT=5;BYMONTHDAY=1";
    let rule = RecurrenceRule::from_text(text).unwrap();
    let dates = rule.all(None).unwrap();
    assert_eq!(dates.len(), 5);
    assert!(dates.iter().all(|d| d.day == 1));
    assert_eq!(dates[0].date_key(), (1446, 1, 1));
}

#[test]
fn yearly_nth_weekday_of_month() {
    // Last Friday of Ramadan, three occurrences.
    let mut opts = PartialOptions::new(Frequency::Yearly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 9, 1, 0, 0, 0));
    opts.calendar = Some(CalendarKind::Tabular);
    opts.bymonth = Some(vec![9]);
    opts.byweekday = Some(vec![Weekday::Friday.nth(-1)]);
    opts.count = Some(3);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = rule.all(None).unwrap();
    assert_eq!(dates.len(), 3);
    for d in &dates {
        assert_eq!(d.month, 9);
        assert_eq!(d.weekday(CalendarKind::Tabular).unwrap(), Weekday::Friday);
    }
}

#[test]
fn weekly_byday_filters_window() {
    let mut opts = PartialOptions::new(Frequency::Weekly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.calendar = Some(CalendarKind::Tabular);
    opts.byweekday = Some(vec![Weekday::Friday.plain(), Weekday::Saturday.plain()]);
    opts.count = Some(4);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = rule.all(None).unwrap();
    assert_eq!(dates.len(), 4);
    for d in &dates {
        let w = d.weekday(CalendarKind::Tabular).unwrap();
        assert!(w == Weekday::Friday || w == Weekday::Saturday);
    }
}

#[test]
fn bysetpos_narrows_monthly_candidates() {
    // First and last Friday of every month, then keep only the last (-1).
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.calendar = Some(CalendarKind::Tabular);
    opts.byweekday = Some(vec![Weekday::Friday.plain()]);
    opts.bysetpos = Some(vec![-1]);
    opts.count = Some(3);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = rule.all(None).unwrap();
    assert_eq!(dates.len(), 3);
    for d in &dates {
        assert_eq!(d.weekday(CalendarKind::Tabular).unwrap(), Weekday::Friday);
    }
    // Each emitted Friday must be the last one of its month.
    for d in &dates {
        let next = hijri_rrule::add_days(d, 7, CalendarKind::Tabular).unwrap();
        assert!(next.month != d.month || next.year != d.year);
    }
}

#[test]
fn skip_forward_rolls_into_next_month() {
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 30, 0, 0, 0));
    opts.calendar = Some(CalendarKind::Tabular);
    opts.bymonthday = Some(vec![30]);
    opts.skip = Some(hijri_rrule::SkipPolicy::Forward);
    opts.count = Some(2);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = rule.all(None).unwrap();
    // Muharram (30 days) then Safar (29 days): day 30 doesn't exist in
    // Safar, so FORWARD rolls to the 1st of the month after.
    assert_eq!(
        dates.iter().map(|d| d.date_key()).collect::<Vec<_>>(),
        vec![(1446, 1, 30), (1446, 3, 1)]
    );
}

#[test]
fn skip_backward_clamps_to_month_end() {
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 30, 0, 0, 0));
    opts.calendar = Some(CalendarKind::Tabular);
    opts.bymonthday = Some(vec![30]);
    opts.skip = Some(hijri_rrule::SkipPolicy::Backward);
    opts.count = Some(2);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = rule.all(None).unwrap();
    assert_eq!(
        dates.iter().map(|d| d.date_key()).collect::<Vec<_>>(),
        vec![(1446, 1, 30), (1446, 2, 29)]
    );
}

#[test]
fn count_stops_mid_period_with_multiple_candidates() {
    let mut opts = PartialOptions::new(Frequency::Monthly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.bymonthday = Some(vec![1, 15]);
    opts.count = Some(3);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    assert_eq!(
        dates_of(&rule),
        vec![(1446, 1, 1), (1446, 1, 15), (1446, 2, 1)]
    );
}

#[test]
fn count_stops_mid_period_across_bymonth_values() {
    let mut opts = PartialOptions::new(Frequency::Yearly);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.bymonth = Some(vec![1, 2, 3]);
    opts.bymonthday = Some(vec![1]);
    opts.count = Some(2);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    assert_eq!(dates_of(&rule), vec![(1446, 1, 1), (1446, 2, 1)]);
}

#[test]
fn daily_matches_only_last_day_of_month() {
    let mut opts = PartialOptions::new(Frequency::Daily);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.calendar = Some(CalendarKind::Tabular);
    opts.bymonthday = Some(vec![-1]);
    opts.count = Some(2);
    let rule = RecurrenceRule::from_options(opts).unwrap();
    assert_eq!(dates_of(&rule), vec![(1446, 1, 30), (1446, 2, 29)]);
}

#[test]
fn until_excludes_dates_past_the_bound() {
    let mut opts = PartialOptions::new(Frequency::Daily);
    opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
    opts.until = Some(DateSpec::Hijri(1446, 1, 5, 0, 0, 0));
    let rule = RecurrenceRule::from_options(opts).unwrap();
    let dates = rule.all(None).unwrap();
    assert_eq!(dates.len(), 5);
    assert!(dates.iter().all(|d| d.date_key() <= (1446, 1, 5)));
}

proptest! {
    #[test]
    fn daily_stream_is_strictly_ascending(n in 1u32..60) {
        let mut opts = PartialOptions::new(Frequency::Daily);
        opts.dtstart = Some(DateSpec::Hijri(1446, 1, 1, 0, 0, 0));
        opts.count = Some(n);
        let rule = RecurrenceRule::from_options(opts).unwrap();
        let dates = rule.all(None).unwrap();
        assert_eq!(dates.len() as u32, n);
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn monthly_stream_count_is_exact(n in 1u32..36) {
        let mut opts = PartialOptions::new(Frequency::Monthly);
        opts.dtstart = Some(DateSpec::Hijri(1446, 1, 15, 0, 0, 0));
        opts.count = Some(n);
        let rule = RecurrenceRule::from_options(opts).unwrap();
        assert_eq!(rule.all(None).unwrap().len() as u32, n);
    }
}
