//! End-to-end use through the façade.

use chrono::NaiveTime;
use tradecal::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn custom_venue_in_a_private_registry() {
    let good_friday = Holiday::builder("Good Friday", Month::January, 1)
        .offsets([Offset::Feast(DateProvider::easter()), Offset::Days(-2)])
        .build()
        .unwrap();
    let easter_monday = Holiday::builder("Easter Monday", Month::January, 1)
        .offsets([Offset::Feast(DateProvider::easter()), Offset::Days(1)])
        .build()
        .unwrap();
    let registry = CalendarRegistry::new();
    registry
        .register_factory(
            "XLON",
            move |_| {
                VenueCalendar::builder("XLON")
                    .timezone("Europe/London")
                    .hours(SessionHours::new(
                        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                        NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
                    ))
                    .regulars([good_friday.clone(), easter_monday.clone()])
                    .build()
            },
            false,
        )
        .unwrap();
    registry.register_alias("LSE", "XLON", false).unwrap();

    let lse = registry.get("LSE", None).unwrap();
    let easter_week: Vec<Date> = lse
        .sessions_in_range(date(2024, 3, 25), date(2024, 4, 5))
        .iter()
        .collect();
    assert_eq!(
        easter_week,
        vec![
            date(2024, 3, 25),
            date(2024, 3, 26),
            date(2024, 3, 27),
            date(2024, 3, 28),
            date(2024, 4, 2),
            date(2024, 4, 3),
            date(2024, 4, 4),
            date(2024, 4, 5),
        ]
    );
    assert!(matches!(
        lse.to_session(date(2024, 3, 29), Direction::Strict),
        Err(Error::NotASession { .. })
    ));
}
