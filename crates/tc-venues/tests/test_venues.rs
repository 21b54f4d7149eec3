//! Venue calendar integration tests.

use chrono::{NaiveTime, TimeZone, Utc};
use proptest::prelude::*;
use tc_core::Error;
use tc_rules::{EarlyClose, Holiday, AD_HOC_LABEL};
use tc_time::{Date, Direction, Month, Observance, SessionCalendar, WeekMask, Weekday};
use tc_venues::venues::{ifus, us_holidays, xcme};
use tc_venues::{SessionHours, VenueCalendar, VenueConfig};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn new_year_venue() -> VenueCalendar {
    let new_year = Holiday::builder("New Year's Day", Month::January, 1)
        .observance(Observance::WeekendToMonday)
        .build()
        .unwrap();
    VenueCalendar::builder("NY")
        .hours(SessionHours::new(
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        ))
        .bounds(date(2020, 1, 1), date(2025, 12, 31))
        .regular(new_year)
        .build()
        .unwrap()
}

#[test]
fn observed_new_year_scenario() {
    let cal = new_year_venue();
    // Sunday: out of the base week, whatever the holiday does.
    assert!(!cal.is_session(date(2023, 1, 1)));
    assert!(cal.is_weekend(date(2023, 1, 1)));
    // Monday: the observed holiday.
    assert!(!cal.is_session(date(2023, 1, 2)));
    assert!(cal.is_holiday(date(2023, 1, 2)));
    assert!(cal.is_session(date(2023, 1, 3)));
    assert_eq!(cal.next_session(date(2022, 12, 30)).unwrap(), date(2023, 1, 3));
    assert_eq!(cal.previous_session(date(2023, 1, 3)).unwrap(), date(2022, 12, 30));
}

#[test]
fn xcme_sessions() {
    let cal = xcme::calendar(None).unwrap();
    // Good Friday 2024
    assert!(!cal.is_session(date(2024, 3, 29)));
    // 9/11 closures and the 2007 ad-hoc day
    assert!(!cal.is_session(date(2001, 9, 12)));
    assert!(!cal.is_session(date(2007, 11, 12)));
    // Black Friday 2023 closes at noon Chicago time (CST, UTC-6)
    assert_eq!(
        cal.session_close(date(2023, 11, 24)).unwrap(),
        Utc.with_ymd_and_hms(2023, 11, 24, 18, 0, 0).unwrap()
    );
    // and opened the evening before at 17:01
    assert_eq!(
        cal.session_open(date(2023, 11, 24)).unwrap(),
        Utc.with_ymd_and_hms(2023, 11, 23, 23, 1, 0).unwrap()
    );
    // Christmas Eve 2021 was the observed Christmas: closed, not early.
    assert!(!cal.is_session(date(2021, 12, 24)));
    assert!(!cal.is_early_close(date(2021, 12, 24)).unwrap());
    assert!(matches!(xcme::calendar(Some("CC")), Err(Error::UnknownVariant { .. })));
}

#[test]
fn xcme_range_queries() {
    let cal = xcme::calendar(None).unwrap();
    let sessions: Vec<Date> = cal
        .sessions_in_range(date(2024, 12, 23), date(2025, 1, 3))
        .iter()
        .collect();
    assert_eq!(
        sessions,
        vec![
            date(2024, 12, 23),
            date(2024, 12, 24),
            date(2024, 12, 26),
            date(2024, 12, 27),
            date(2024, 12, 30),
            date(2024, 12, 31),
            date(2025, 1, 2),
            date(2025, 1, 3),
        ]
    );
    assert_eq!(cal.session_count(date(2024, 12, 23), date(2025, 1, 3)), sessions.len());
    let early = cal.early_closes_in_range(date(2024, 11, 1), date(2024, 12, 31)).unwrap();
    assert_eq!(early.keys().copied().collect::<Vec<_>>(), vec![date(2024, 11, 29), date(2024, 12, 24)]);
    assert_eq!(
        cal.holidays_in_range(date(2024, 12, 1), date(2025, 1, 31)),
        vec![date(2024, 12, 25), date(2025, 1, 1), date(2025, 1, 9), date(2025, 1, 20)]
    );
    assert_eq!(cal.to_session(date(2024, 12, 25), Direction::Following).unwrap(), date(2024, 12, 26));
}

#[test]
fn closures_report_their_names() {
    let cal = xcme::calendar(None).unwrap();
    let named = cal.holiday_names_in_range(date(2024, 12, 1), date(2025, 1, 31));
    assert_eq!(
        named.keys().copied().collect::<Vec<_>>(),
        cal.holidays_in_range(date(2024, 12, 1), date(2025, 1, 31))
    );
    assert_eq!(named[&date(2024, 12, 25)], vec!["Christmas"]);
    assert_eq!(named[&date(2025, 1, 9)], vec![us_holidays::MOURNING]);
    assert_eq!(named[&date(2025, 1, 20)], vec!["Dr. Martin Luther King Jr. Day"]);

    let september = cal.holiday_names_in_range(date(2001, 9, 10), date(2001, 9, 14));
    assert_eq!(september[&date(2001, 9, 12)], vec![us_holidays::SEPTEMBER_11]);
    assert_eq!(
        cal.holiday_names_in_range(date(2007, 11, 12), date(2007, 11, 12))[&date(2007, 11, 12)],
        vec![AD_HOC_LABEL]
    );
    assert!(cal.holiday_names_in_range(date(2025, 1, 31), date(2025, 1, 1)).is_empty());
}

#[test]
fn ifus_variants_differ() {
    let us = ifus::calendar(None).unwrap();
    let cocoa = ifus::calendar(Some("CC")).unwrap();
    let cotton = ifus::calendar(Some("CT")).unwrap();
    // Labor Day is only a holiday for the softs.
    assert!(us.is_session(date(2024, 9, 2)));
    assert!(!cocoa.is_session(date(2024, 9, 2)));
    // 2002-12-24 closed cotton only; 2002-12-26 closed cocoa only.
    assert!(cocoa.is_session(date(2002, 12, 24)));
    assert!(!cotton.is_session(date(2002, 12, 24)));
    assert!(!cocoa.is_session(date(2002, 12, 26)));
    assert!(cotton.is_session(date(2002, 12, 26)));
    // The whole 9/11 week for softs, Tuesday included.
    assert!(!cotton.is_session(date(2001, 9, 11)));
    assert!(us.is_session(date(2001, 9, 11)));
    assert!(matches!(ifus::calendar(Some("SB")), Err(Error::UnknownVariant { .. })));
}

#[test]
fn config_round_trip_into_calendar() {
    let json = r#"{
        "name": "DEMO",
        "timezone": "Europe/London",
        "hours": [
            { "open": "08:00:00", "close": "16:30:00" },
            { "effective_from": "2020-01-01", "open": "08:00:00", "close": "16:00:00" }
        ],
        "weekdays": "Mon Tue Wed Thu Fri",
        "bounds": { "start": "2019-01-01", "end": "2021-12-31" },
        "ad_hoc": ["2019-05-08", "2020-05-08T12:00:00Z"],
        "early_closes": [{ "close": "12:30:00", "dates": ["2019-12-24", "2020-12-24"] }]
    }"#;
    let cfg: VenueConfig = serde_json::from_str(json).unwrap();
    let cal = cfg.into_builder().unwrap().build().unwrap();
    assert_eq!(cal.name(), "DEMO");
    assert!(!cal.is_session(date(2020, 5, 8)));
    // GMT in December, BST in July
    assert_eq!(
        cal.session_close(date(2019, 12, 24)).unwrap(),
        Utc.with_ymd_and_hms(2019, 12, 24, 12, 30, 0).unwrap()
    );
    assert_eq!(
        cal.session_close(date(2019, 7, 1)).unwrap(),
        Utc.with_ymd_and_hms(2019, 7, 1, 15, 30, 0).unwrap()
    );
    assert_eq!(
        cal.session_close(date(2020, 7, 1)).unwrap(),
        Utc.with_ymd_and_hms(2020, 7, 1, 15, 0, 0).unwrap()
    );
}

#[test]
fn config_with_unknown_timezone_fails() {
    let json = r#"{
        "name": "BAD",
        "timezone": "Atlantis/Capital",
        "hours": [{ "open": "09:00:00", "close": "17:00:00" }]
    }"#;
    let cfg: VenueConfig = serde_json::from_str(json).unwrap();
    assert!(matches!(cfg.build(), Err(Error::InvalidTimezone(_))));
}

#[test]
fn huge_open_offset_is_an_error_not_a_panic() {
    let json = r#"{
        "name": "FAR",
        "timezone": "UTC",
        "hours": [{ "open": "09:00:00", "close": "17:00:00" }],
        "open_offset": 2147483647
    }"#;
    let cfg: VenueConfig = serde_json::from_str(json).unwrap();
    let cal = cfg.build().unwrap();
    assert!(matches!(cal.session_open(date(2024, 1, 2)), Err(Error::Date(_))));
    assert!(cal.session_close(date(2024, 1, 2)).is_ok());
}

#[test]
fn early_close_conflict_beyond_bounds_surfaces_on_query() {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    let one_pm = NaiveTime::from_hms_opt(13, 0, 0).unwrap();
    let christmas_eve = || Holiday::builder("Christmas Eve", Month::December, 24).build().unwrap();
    let builder = || {
        VenueCalendar::builder("SPLIT")
            .hours(SessionHours::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ))
            .early_close(EarlyClose::new(noon).rule(christmas_eve()))
            .early_close(EarlyClose::new(one_pm).rule(christmas_eve()))
    };

    let cal = builder().bounds(date(2024, 1, 1), date(2024, 6, 30)).build().unwrap();
    // 2024-12-24 is a Tuesday, outside the checked range.
    assert!(matches!(
        cal.session_close(date(2024, 12, 24)),
        Err(Error::EarlyCloseConflict { .. })
    ));
    assert!(cal.early_close_time(date(2024, 12, 24)).is_err());

    let err = builder().bounds(date(2024, 1, 1), date(2024, 12, 31)).build().unwrap_err();
    assert!(matches!(err, Error::EarlyCloseConflict { ref date, .. } if date == "2024-12-24"));
}

#[test]
fn repeated_and_skipped_wall_clock_times() {
    let cal = VenueCalendar::builder("NIGHT")
        .timezone("America/New_York")
        .week_mask(WeekMask::ALL)
        .hours(SessionHours::new(
            NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
        ))
        .bounds(date(2023, 1, 1), date(2023, 12, 31))
        .build()
        .unwrap();
    // 01:30 happens twice on 2023-11-05; the EDT (UTC-4) instance is used.
    assert_eq!(
        cal.session_open(date(2023, 11, 5)).unwrap(),
        Utc.with_ymd_and_hms(2023, 11, 5, 5, 30, 0).unwrap()
    );
    // 02:30 only exists once that night, in EST (UTC-5).
    assert_eq!(
        cal.session_close(date(2023, 11, 5)).unwrap(),
        Utc.with_ymd_and_hms(2023, 11, 5, 7, 30, 0).unwrap()
    );
    // 02:30 never happens on 2023-03-12.
    assert!(matches!(cal.session_close(date(2023, 3, 12)), Err(Error::Date(_))));
    assert_eq!(
        cal.session_open(date(2023, 3, 12)).unwrap(),
        Utc.with_ymd_and_hms(2023, 3, 12, 6, 30, 0).unwrap()
    );
}

proptest! {
    #[test]
    fn saturday_is_never_a_session(weeks in 0i32..4_000) {
        let cal = xcme::calendar(None).unwrap();
        // 1990-01-06 was a Saturday
        let saturday = date(1990, 1, 6).add_days(7 * weeks).unwrap();
        prop_assert_eq!(saturday.weekday(), Weekday::Saturday);
        prop_assert!(!cal.is_session(saturday));
        prop_assert!(cal.session_open(saturday).is_err());
    }
}
