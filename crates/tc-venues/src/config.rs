//! Serializable venue timing metadata.
//!
//! A [`VenueConfig`] carries everything about a venue that is plain data:
//! timezone, trading hours, base week, memoized bounds, one-off closures and
//! early-close dates.  Holiday *rules* are code; add them to the builder
//! returned by [`VenueConfig::into_builder`].
//!
//! ```json
//! {
//!   "name": "XCME",
//!   "timezone": "America/Chicago",
//!   "hours": [{ "open": "17:01:00", "close": "16:00:00" }],
//!   "open_offset": -1,
//!   "ad_hoc": ["2001-09-12", "2007-11-12T00:00:00Z"],
//!   "early_closes": [{ "close": "12:00:00", "dates": ["2024-07-03"] }]
//! }
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tc_core::errors::{Error, Result};
use tc_rules::{AdHocDates, EarlyClose};
use tc_time::{Date, WeekMask};

use crate::venue::{SessionHours, VenueCalendar, VenueCalendarBuilder};

/// One `(effective_from, open, close)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoursConfig {
    /// First date the hours apply to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    /// Local open time.
    pub open: NaiveTime,
    /// Local close time.
    pub close: NaiveTime,
}

/// Inclusive memoized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundsConfig {
    /// First date.
    pub start: NaiveDate,
    /// Last date.
    pub end: NaiveDate,
}

/// Dates closing early at one time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EarlyCloseConfig {
    /// Local close time on those dates.
    pub close: NaiveTime,
    /// ISO dates or RFC 3339 timestamps.
    pub dates: Vec<String>,
}

/// Data-only description of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VenueConfig {
    /// Canonical venue name.
    pub name: String,
    /// IANA timezone identifier.
    pub timezone: String,
    /// Trading hours, in any order.
    pub hours: Vec<HoursConfig>,
    /// Calendar-day shift of the open (e.g. `-1` for an evening-before open).
    #[serde(default)]
    pub open_offset: i32,
    /// Base week as `"1111100"` or day names; Monday to Friday if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<String>,
    /// Memoized range; process default if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsConfig>,
    /// One-off all-day closures: ISO dates or RFC 3339 timestamps.
    #[serde(default)]
    pub ad_hoc: Vec<String>,
    /// Early-close buckets.
    #[serde(default)]
    pub early_closes: Vec<EarlyCloseConfig>,
}

impl VenueConfig {
    /// Convert into a calendar builder.
    ///
    /// The timezone itself is checked when the builder is built.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for malformed weekdays, dates, or bounds.
    pub fn into_builder(self) -> Result<VenueCalendarBuilder> {
        let name = self.name;
        let invalid = |what: &str, e: Error| Error::InvalidConfig(format!("{name}: {what}: {e}"));

        let mut builder = VenueCalendar::builder(name.clone())
            .timezone(self.timezone)
            .open_offset(self.open_offset);

        for h in self.hours {
            let mut hours = SessionHours::new(h.open, h.close);
            if let Some(from) = h.effective_from {
                hours = hours.effective_from(Date::try_from(from).map_err(|e| invalid("hours", e))?);
            }
            builder = builder.hours(hours);
        }

        if let Some(days) = self.weekdays {
            let mask: WeekMask = days.parse().map_err(|e| invalid("weekdays", e))?;
            builder = builder.week_mask(mask);
        }

        if let Some(bounds) = self.bounds {
            let start = Date::try_from(bounds.start).map_err(|e| invalid("bounds", e))?;
            let end = Date::try_from(bounds.end).map_err(|e| invalid("bounds", e))?;
            builder = builder.bounds(start, end);
        }

        let ad_hoc = parse_dates(&self.ad_hoc).map_err(|e| invalid("ad_hoc", e))?;
        builder = builder.ad_hoc(&ad_hoc);

        for bucket in self.early_closes {
            let dates = parse_dates(&bucket.dates).map_err(|e| invalid("early_closes", e))?;
            builder = builder.early_close(EarlyClose::new(bucket.close).dates(&dates));
        }
        Ok(builder)
    }

    /// Build the calendar straight from the configuration, without any
    /// recurring rules.
    pub fn build(self) -> Result<VenueCalendar> {
        self.into_builder()?.build()
    }
}

fn parse_dates(raw: &[String]) -> Result<AdHocDates> {
    raw.iter().map(|s| parse_date(s)).collect()
}

fn parse_date(s: &str) -> Result<Date> {
    if let Ok(date) = s.parse::<Date>() {
        return Ok(date);
    }
    let stamp = DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| Error::Date(format!("cannot parse {s:?}: {e}")))?;
    Date::from_naive_date(stamp.with_timezone(&Utc).date_naive())
}
