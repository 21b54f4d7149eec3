//! United States holiday rules shared by the US venues.
//!
//! * New Year's Day (Jan 1; if Sun → Mon)
//! * Martin Luther King Jr. Day (3rd Mon in Jan, from a venue-specific year)
//! * Presidents' Day (3rd Mon in Feb)
//! * Good Friday (two days before Easter Sunday)
//! * Memorial Day (last Mon in May)
//! * Independence Day (Jul 4; nearest workday)
//! * Labor Day (1st Mon in Sep)
//! * Columbus Day (2nd Mon in Oct)
//! * Veterans Day (Nov 11; if Sun → Mon; through 1953)
//! * Thanksgiving Day (4th Thu in Nov)
//! * Christmas (Dec 25; nearest workday)
//!
//! Early closes: Black Friday (from 1993) and Christmas Eve.

use tc_core::errors::Result;
use tc_rules::{AdHocDates, Holiday};
use tc_time::{Date, DateProvider, Month, Observance, Offset, WeekMask, Weekday};

fn nth(weekday: Weekday, n: i8) -> Offset {
    Offset::Weekday { weekday, n }
}

/// New Year's Day.
pub fn new_years_day() -> Result<Holiday> {
    Holiday::builder("New Year's Day", Month::January, 1)
        .observance(Observance::SundayToMonday)
        .build()
}

/// Martin Luther King Jr. Day, observed from January of `first_year`.
pub fn martin_luther_king_day(first_year: u16) -> Result<Holiday> {
    Holiday::builder("Dr. Martin Luther King Jr. Day", Month::January, 1)
        .offset(nth(Weekday::Monday, 3))
        .start_date(Date::from_ymd(first_year, 1, 1)?)
        .build()
}

/// Presidents' Day.
pub fn presidents_day() -> Result<Holiday> {
    Holiday::builder("Presidents' Day", Month::February, 1)
        .offset(nth(Weekday::Monday, 3))
        .build()
}

/// Good Friday.
pub fn good_friday() -> Result<Holiday> {
    Holiday::builder("Good Friday", Month::January, 1)
        .offsets([Offset::Feast(DateProvider::easter()), Offset::Days(-2)])
        .build()
}

/// Memorial Day.
pub fn memorial_day() -> Result<Holiday> {
    Holiday::builder("Memorial Day", Month::May, 31)
        .offset(nth(Weekday::Monday, -1))
        .build()
}

/// Independence Day.
pub fn independence_day() -> Result<Holiday> {
    Holiday::builder("July 4th", Month::July, 4)
        .observance(Observance::NearestWorkday)
        .build()
}

/// Labor Day.
pub fn labor_day() -> Result<Holiday> {
    Holiday::builder("Labor Day", Month::September, 1)
        .offset(nth(Weekday::Monday, 1))
        .build()
}

/// Columbus Day.
pub fn columbus_day() -> Result<Holiday> {
    Holiday::builder("Columbus Day", Month::October, 1)
        .offset(nth(Weekday::Monday, 2))
        .build()
}

/// Veterans Day, a market holiday only until 1953.
pub fn veterans_day() -> Result<Holiday> {
    Holiday::builder("Veterans Day", Month::November, 11)
        .observance(Observance::SundayToMonday)
        .end_date(Date::from_ymd(1953, 12, 31)?)
        .build()
}

/// Thanksgiving Day.
pub fn thanksgiving_day() -> Result<Holiday> {
    Holiday::builder("Thanksgiving", Month::November, 1)
        .offset(nth(Weekday::Thursday, 4))
        .build()
}

/// Christmas.
pub fn christmas() -> Result<Holiday> {
    Holiday::builder("Christmas", Month::December, 25)
        .observance(Observance::NearestWorkday)
        .build()
}

/// The Friday after Thanksgiving, from 1993.
pub fn black_friday() -> Result<Holiday> {
    Holiday::builder("Black Friday", Month::November, 1)
        .offsets([nth(Weekday::Thursday, 4), Offset::Days(1)])
        .start_date(Date::from_ymd(1993, 1, 1)?)
        .build()
}

/// Christmas Eve before 1993: only when it falls Monday to Thursday.
pub fn christmas_eve_before_1993() -> Result<Holiday> {
    Holiday::builder("Christmas Eve", Month::December, 24)
        .days_of_week(WeekMask::WEEKDAYS.without(Weekday::Friday))
        .end_date(Date::from_ymd(1993, 1, 1)?)
        .build()
}

/// Christmas Eve from 1993: any weekday.
pub fn christmas_eve_from_1993() -> Result<Holiday> {
    Holiday::builder("Christmas Eve", Month::December, 24)
        .days_of_week(WeekMask::WEEKDAYS)
        .start_date(Date::from_ymd(1993, 1, 1)?)
        .build()
}

/// Label of the national days of mourning.
pub const MOURNING: &str = "National Day of Mourning";

/// Label of the closures following the September 11, 2001 attacks.
pub const SEPTEMBER_11: &str = "September 11";

/// National days of mourning on which US markets closed.
pub fn national_days_of_mourning() -> Result<AdHocDates> {
    AdHocDates::parse([
        "1963-11-25", // John F. Kennedy
        "1968-04-09", // Martin Luther King Jr.
        "1969-03-31", // Dwight D. Eisenhower
        "1972-12-28", // Harry S. Truman
        "1973-01-25", // Lyndon B. Johnson
        "1994-04-27", // Richard Nixon
        "2004-06-11", // Ronald Reagan
        "2007-01-02", // Gerald Ford
        "2018-12-05", // George H. W. Bush
        "2025-01-09", // Jimmy Carter
    ])
}
