//! Calendars without holidays: `24/7`, `24/5` and `ALL`.

use chrono::NaiveTime;
use tc_core::errors::{Error, Result};
use tc_time::WeekMask;

use crate::venue::{SessionHours, VenueCalendar};

fn reject(name: &str, variant: Option<&str>) -> Result<()> {
    match variant {
        Some(v) => Err(Error::UnknownVariant {
            name: name.to_string(),
            variant: v.to_string(),
        }),
        None => Ok(()),
    }
}

fn whole_day() -> Result<SessionHours> {
    match (NaiveTime::from_hms_opt(0, 0, 0), NaiveTime::from_hms_opt(23, 59, 0)) {
        (Some(open), Some(close)) => Ok(SessionHours::new(open, close)),
        _ => Err(Error::InvalidArgument("bad session hours".into())),
    }
}

/// Every day of the week, midnight to 23:59 UTC.
pub fn always_open(variant: Option<&str>) -> Result<VenueCalendar> {
    reject("24/7", variant)?;
    VenueCalendar::builder("24/7")
        .week_mask(WeekMask::ALL)
        .hours(whole_day()?)
        .build()
}

/// Monday to Friday, midnight to 23:59 UTC.
pub fn weekdays(variant: Option<&str>) -> Result<VenueCalendar> {
    reject("24/5", variant)?;
    VenueCalendar::builder("24/5")
        .week_mask(WeekMask::WEEKDAYS)
        .hours(whole_day()?)
        .build()
}

/// Every weekday, opening 18:01 New York time the evening before and
/// closing 17:00.
pub fn all_days(variant: Option<&str>) -> Result<VenueCalendar> {
    reject("ALL", variant)?;
    let open = NaiveTime::from_hms_opt(18, 1, 0);
    let close = NaiveTime::from_hms_opt(17, 0, 0);
    let (Some(open), Some(close)) = (open, close) else {
        return Err(Error::InvalidArgument("bad session hours".into()));
    };
    VenueCalendar::builder("ALL")
        .timezone("America/New_York")
        .hours(SessionHours::new(open, close))
        .open_offset(-1)
        .build()
}
