//! ICE Futures US (IFUS).
//!
//! The default (`"US"`) configuration closes only for New Year's Day, Good
//! Friday and Christmas.  The softs product groups (`"CC"` cocoa, `"KC"`
//! coffee, `"CT"` cotton) follow the full US holiday list and each carry
//! their own record of one-off closures.

use chrono::NaiveTime;
use tc_core::errors::{Error, Result};
use tc_rules::{AdHocDates, Holiday};

use super::us_holidays as us;
use crate::venue::{SessionHours, VenueCalendar};

/// Canonical name.
pub const NAME: &str = "IFUS";

/// Supported product-group variants.
pub const VARIANTS: [&str; 4] = ["US", "CC", "KC", "CT"];

/// Closures shared by every softs product group.
const SOFTS_CLOSURES: [&str; 20] = [
    "1999-11-26", "1999-12-31", "2000-07-03", "2000-11-24", "2001-11-23",
    "2001-12-24", "2001-12-31", "2002-07-05", "2002-11-29", "2003-02-18",
    "2003-11-28", "2003-12-26", "2004-01-02", "2004-11-26", "2004-12-31",
    "2005-11-25", "2006-11-24", "2007-11-23", "2007-12-24", "2011-01-03",
];

fn product_group_closures(group: &str) -> Result<AdHocDates> {
    let extra: &[&str] = match group {
        "CC" => &["2002-12-26"],
        "KC" => &["2001-12-26", "2002-12-26"],
        "CT" => &["2001-12-26", "2002-12-24"],
        _ => &[],
    };
    Ok(AdHocDates::parse(SOFTS_CLOSURES)?.union(&AdHocDates::parse(extra.iter().copied())?))
}

fn full_us_holidays() -> Result<Vec<Holiday>> {
    Ok(vec![
        us::new_years_day()?,
        us::martin_luther_king_day(1998)?,
        us::presidents_day()?,
        us::good_friday()?,
        us::memorial_day()?,
        us::independence_day()?,
        us::labor_day()?,
        us::thanksgiving_day()?,
        us::christmas()?,
    ])
}

/// Build the IFUS calendar for `variant` (`None` is the same as `"US"`).
pub fn calendar(variant: Option<&str>) -> Result<VenueCalendar> {
    let group = variant.unwrap_or("US");
    if !VARIANTS.contains(&group) {
        return Err(Error::UnknownVariant {
            name: NAME.to_string(),
            variant: group.to_string(),
        });
    }

    let (regular, closures, september_11) = if group == "US" {
        let regular = vec![us::new_years_day()?, us::good_friday()?, us::christmas()?];
        (regular, AdHocDates::new(), AdHocDates::new())
    } else {
        (
            full_us_holidays()?,
            product_group_closures(group)?,
            AdHocDates::range("2001-09-11".parse()?, "2001-09-14".parse()?)?,
        )
    };

    let time = |h, m| {
        NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| Error::InvalidArgument(format!("bad time {h}:{m}")))
    };
    VenueCalendar::builder(NAME)
        .timezone("America/New_York")
        .hours(SessionHours::new(time(20, 1)?, time(18, 0)?))
        .open_offset(-1)
        .regulars(regular)
        .ad_hoc_named(us::MOURNING, &us::national_days_of_mourning()?)
        .ad_hoc_named(us::SEPTEMBER_11, &september_11)
        .ad_hoc(&closures)
        .build()
}
