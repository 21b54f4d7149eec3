//! Chicago Mercantile Exchange (XCME), also serving CBOT and COMEX.
//!
//! Sessions open at 17:01 Chicago time on the previous calendar day and
//! close at 16:00; early closes are at noon.

use chrono::NaiveTime;
use tc_core::errors::{Error, Result};
use tc_rules::{AdHocDates, EarlyClose};

use super::us_holidays as us;
use crate::venue::{SessionHours, VenueCalendar};

/// Canonical name.
pub const NAME: &str = "XCME";

fn hm(h: u32, m: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| Error::InvalidArgument(format!("bad time {h}:{m}")))
}

/// Build the XCME calendar.  XCME has no variants.
pub fn calendar(variant: Option<&str>) -> Result<VenueCalendar> {
    if let Some(v) = variant {
        return Err(Error::UnknownVariant {
            name: NAME.to_string(),
            variant: v.to_string(),
        });
    }

    VenueCalendar::builder(NAME)
        .timezone("America/Chicago")
        .hours(SessionHours::new(hm(17, 1)?, hm(16, 0)?))
        .open_offset(-1)
        .regulars([
            us::martin_luther_king_day(1995)?,
            us::new_years_day()?,
            us::presidents_day()?,
            us::good_friday()?,
            us::memorial_day()?,
            us::columbus_day()?,
            us::labor_day()?,
            us::independence_day()?,
            us::thanksgiving_day()?,
            us::christmas()?,
            us::veterans_day()?,
        ])
        .ad_hoc_named(us::MOURNING, &us::national_days_of_mourning()?)
        .ad_hoc_named(us::SEPTEMBER_11, &AdHocDates::parse(["2001-09-12", "2001-09-13"])?)
        .ad_hoc(&AdHocDates::parse(["1992-04-14", "2001-11-12", "2007-11-12"])?)
        .early_close(EarlyClose::new(hm(12, 0)?).rules([
            us::black_friday()?,
            us::christmas_eve_before_1993()?,
            us::christmas_eve_from_1993()?,
        ]))
        .build()
}
