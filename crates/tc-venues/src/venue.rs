//! `VenueCalendar`: a venue's aggregated closures bound to its timezone and
//! trading hours.
//!
//! The holiday sets are expanded once, at construction, over the calendar's
//! bounds.  Queries outside the bounds fall back to expanding the aggregate
//! for the single date asked about, so every date in the supported range can
//! be answered.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tc_core::errors::{Error, Result};
use tc_core::{ensure, Settings};
use tc_rules::{AdHocDates, CalendarAggregate, EarlyClose, ExpandedCalendar, Holiday};
use tc_time::{Date, Direction, SessionCalendar, WeekMask};

/// Trading hours in effect from a given date onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHours {
    /// First date these hours apply to; `None` means "since forever".
    pub effective_from: Option<Date>,
    /// Local open time.
    pub open: NaiveTime,
    /// Local close time.
    pub close: NaiveTime,
}

impl SessionHours {
    /// Hours with no start date.
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            effective_from: None,
            open,
            close,
        }
    }

    /// The same hours, effective from `date`.
    #[must_use]
    pub fn effective_from(mut self, date: Date) -> Self {
        self.effective_from = Some(date);
        self
    }
}

/// The immutable calendar of one venue (or one product-group variant of a
/// venue).
#[derive(Debug, Clone)]
pub struct VenueCalendar {
    name: String,
    tz: Tz,
    hours: Vec<SessionHours>,
    open_offset: i32,
    week_mask: WeekMask,
    aggregate: CalendarAggregate,
    expanded: ExpandedCalendar,
}

impl VenueCalendar {
    /// Start building a calendar called `name`.
    pub fn builder(name: impl Into<String>) -> VenueCalendarBuilder {
        VenueCalendarBuilder::new(name)
    }

    /// The venue's timezone.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Every hours tuple, oldest first.
    pub fn hours(&self) -> &[SessionHours] {
        &self.hours
    }

    /// Calendar-day shift of the session open relative to the session date.
    pub fn open_offset(&self) -> i32 {
        self.open_offset
    }

    /// The closure inputs the calendar was built from.
    pub fn aggregate(&self) -> &CalendarAggregate {
        &self.aggregate
    }

    /// First and last date of the memoized range.
    pub fn bounds(&self) -> (Date, Date) {
        (self.expanded.start(), self.expanded.end())
    }

    fn is_closed(&self, date: Date) -> bool {
        if self.expanded.covers(date) {
            self.expanded.is_closed(date)
        } else {
            self.aggregate.closed_dates(date, date).contains(&date)
        }
    }

    /// The early-close time on `date`, if `date` is an early-close session.
    ///
    /// # Errors
    /// Outside the memoized bounds the aggregate is expanded for `date`
    /// alone, which can surface an [`Error::EarlyCloseConflict`].
    pub fn early_close_time(&self, date: Date) -> Result<Option<NaiveTime>> {
        if !self.week_mask.contains(date.weekday()) {
            return Ok(None);
        }
        if self.expanded.covers(date) {
            return Ok(self.expanded.early_close(date));
        }
        Ok(self.aggregate.expand(date, date)?.early_close(date))
    }

    /// Return `true` if `date` is a session that closes early.
    pub fn is_early_close(&self, date: Date) -> Result<bool> {
        Ok(self.early_close_time(date)?.is_some())
    }

    /// Early-close sessions in `[start, end]` with their close times.
    pub fn early_closes_in_range(&self, start: Date, end: Date) -> Result<BTreeMap<Date, NaiveTime>> {
        if end < start {
            return Ok(BTreeMap::new());
        }
        let all: BTreeMap<Date, NaiveTime> = if self.expanded.covers(start) && self.expanded.covers(end) {
            self.expanded
                .early_close_dates()
                .range(start..=end)
                .map(|(d, t)| (*d, *t))
                .collect()
        } else {
            self.aggregate.expand(start, end)?.early_close_dates().clone()
        };
        Ok(all
            .into_iter()
            .filter(|(d, _)| self.week_mask.contains(d.weekday()))
            .collect())
    }

    /// Dates in `[start, end]` that fall in the base week but are closed.
    pub fn holidays_in_range(&self, start: Date, end: Date) -> Vec<Date> {
        if end < start {
            return Vec::new();
        }
        let closed: BTreeSet<Date> = if self.expanded.covers(start) && self.expanded.covers(end) {
            self.expanded.closed_dates().range(start..=end).copied().collect()
        } else {
            self.aggregate.closed_dates(start, end)
        };
        closed
            .into_iter()
            .filter(|d| self.week_mask.contains(d.weekday()))
            .collect()
    }

    /// The closures of [`holidays_in_range`](Self::holidays_in_range), each
    /// with the names of the rules and ad-hoc lists that close it.
    pub fn holiday_names_in_range(&self, start: Date, end: Date) -> BTreeMap<Date, Vec<String>> {
        if end < start {
            return BTreeMap::new();
        }
        let mut named = self.aggregate.closed_dates_named(start, end);
        named.retain(|d, _| self.week_mask.contains(d.weekday()));
        named
    }

    /// Every session in `[start, end]`, ascending.
    ///
    /// The returned value can be iterated any number of times; each pass
    /// re-evaluates the range.
    pub fn sessions_in_range(&self, start: Date, end: Date) -> Sessions<'_> {
        Sessions {
            calendar: self,
            start,
            end,
        }
    }

    /// The first session on or after the start of the memoized bounds.
    pub fn first_session(&self) -> Result<Date> {
        self.to_session(self.expanded.start(), Direction::Following)
    }

    /// The last session on or before the end of the memoized bounds.
    pub fn last_session(&self) -> Result<Date> {
        self.to_session(self.expanded.end(), Direction::Preceding)
    }

    fn hours_on(&self, date: Date) -> Result<&SessionHours> {
        self.hours
            .iter()
            .rev()
            .find(|h| h.effective_from.map_or(true, |from| from <= date))
            .ok_or_else(|| Error::InvalidArgument(format!("{}: no trading hours in effect on {date}", self.name)))
    }

    fn ensure_session(&self, date: Date) -> Result<()> {
        if self.is_session(date) {
            Ok(())
        } else {
            Err(Error::NotASession {
                calendar: self.name.clone(),
                date: date.to_string(),
            })
        }
    }

    fn to_utc(&self, date: Date, time: NaiveTime) -> Result<DateTime<Utc>> {
        let local = date.to_naive_date().and_time(time);
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(t) => Ok(t.with_timezone(&Utc)),
            // A wall-clock time repeated by a DST fall-back: take the first.
            LocalResult::Ambiguous(first, _) => Ok(first.with_timezone(&Utc)),
            LocalResult::None => Err(Error::Date(format!(
                "{local} does not exist in {}",
                self.tz.name()
            ))),
        }
    }

    /// Session open on `date`, in UTC.
    ///
    /// With a non-zero open offset the open falls on another calendar day
    /// than the session date, e.g. the day before for overnight futures.
    ///
    /// # Errors
    /// [`Error::NotASession`] if `date` is not a session.
    pub fn session_open(&self, date: Date) -> Result<DateTime<Utc>> {
        self.ensure_session(date)?;
        let hours = self.hours_on(date)?;
        self.to_utc(date.add_days(self.open_offset)?, hours.open)
    }

    /// Session close on `date`, in UTC, honouring early closes.
    ///
    /// # Errors
    /// [`Error::NotASession`] if `date` is not a session.
    pub fn session_close(&self, date: Date) -> Result<DateTime<Utc>> {
        self.ensure_session(date)?;
        let close = match self.early_close_time(date)? {
            Some(early) => early,
            None => self.hours_on(date)?.close,
        };
        self.to_utc(date, close)
    }

    /// `(open, close)` of the session on `date`.
    pub fn session_window(&self, date: Date) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((self.session_open(date)?, self.session_close(date)?))
    }
}

impl SessionCalendar for VenueCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn week_mask(&self) -> WeekMask {
        self.week_mask
    }

    fn is_session(&self, date: Date) -> bool {
        self.week_mask.contains(date.weekday()) && !self.is_closed(date)
    }
}

/// Sessions of a [`VenueCalendar`] over a fixed range.
#[derive(Debug, Clone, Copy)]
pub struct Sessions<'a> {
    calendar: &'a VenueCalendar,
    start: Date,
    end: Date,
}

impl<'a> Sessions<'a> {
    /// Start a fresh pass over the range.
    pub fn iter(&self) -> impl Iterator<Item = Date> + 'a {
        let (calendar, end) = (self.calendar, self.end);
        let first = (self.start <= end).then_some(self.start);
        std::iter::successors(first, move |d| d.add_days(1).ok().filter(|n| *n <= end))
            .filter(move |d| calendar.is_session(*d))
    }
}

impl<'a> IntoIterator for &Sessions<'a> {
    type Item = Date;
    type IntoIter = Box<dyn Iterator<Item = Date> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<'a> IntoIterator for Sessions<'a> {
    type Item = Date;
    type IntoIter = Box<dyn Iterator<Item = Date> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

enum TzSource {
    Parsed(Tz),
    Name(String),
}

/// Builder for [`VenueCalendar`].
///
/// Every configuration error (unknown timezone, missing hours, early-close
/// conflicts inside the bounds) surfaces from [`build`](Self::build).
pub struct VenueCalendarBuilder {
    name: String,
    tz: TzSource,
    hours: Vec<SessionHours>,
    open_offset: i32,
    week_mask: WeekMask,
    bounds: Option<(Date, Date)>,
    aggregate: CalendarAggregate,
}

impl VenueCalendarBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tz: TzSource::Parsed(Tz::UTC),
            hours: Vec::new(),
            open_offset: 0,
            week_mask: WeekMask::WEEKDAYS,
            bounds: None,
            aggregate: CalendarAggregate::new(),
        }
    }

    /// IANA timezone identifier, checked at build time.
    #[must_use]
    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.tz = TzSource::Name(name.into());
        self
    }

    /// An already parsed timezone.
    #[must_use]
    pub fn tz(mut self, tz: Tz) -> Self {
        self.tz = TzSource::Parsed(tz);
        self
    }

    /// Add one hours tuple.
    #[must_use]
    pub fn hours(mut self, hours: SessionHours) -> Self {
        self.hours.push(hours);
        self
    }

    /// Shift the open to `offset` calendar days from the session date.
    #[must_use]
    pub fn open_offset(mut self, offset: i32) -> Self {
        self.open_offset = offset;
        self
    }

    /// Base trading week (Monday to Friday unless set).
    #[must_use]
    pub fn week_mask(mut self, mask: WeekMask) -> Self {
        self.week_mask = mask;
        self
    }

    /// Memoized range; defaults to the process-wide [`Settings`] bounds.
    #[must_use]
    pub fn bounds(mut self, start: Date, end: Date) -> Self {
        self.bounds = Some((start, end));
        self
    }

    /// Add a regular holiday.
    #[must_use]
    pub fn regular(mut self, rule: Holiday) -> Self {
        self.aggregate = self.aggregate.regular(rule);
        self
    }

    /// Add several regular holidays.
    #[must_use]
    pub fn regulars(mut self, rules: impl IntoIterator<Item = Holiday>) -> Self {
        self.aggregate = self.aggregate.regulars(rules);
        self
    }

    /// Add one-off closures.
    #[must_use]
    pub fn ad_hoc(mut self, dates: &AdHocDates) -> Self {
        self.aggregate = self.aggregate.ad_hoc(dates);
        self
    }

    /// Add one-off closures reported under `label`.
    #[must_use]
    pub fn ad_hoc_named(mut self, label: impl Into<String>, dates: &AdHocDates) -> Self {
        self.aggregate = self.aggregate.ad_hoc_named(label, dates);
        self
    }

    /// Add an early-close bucket.
    #[must_use]
    pub fn early_close(mut self, bucket: EarlyClose) -> Self {
        self.aggregate = self.aggregate.early_close(bucket);
        self
    }

    /// Replace the closure inputs wholesale.
    #[must_use]
    pub fn aggregate(mut self, aggregate: CalendarAggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Validate the configuration and expand the memoized range.
    ///
    /// Early-close conflicts are only checked inside the bounds; a conflict
    /// on a later or earlier date is reported by the query that reaches it
    /// (`session_close`, `early_close_time`, ...).  Widen the range with
    /// [`bounds`](Self::bounds) to have `build` check it.
    ///
    /// # Errors
    /// * [`Error::InvalidTimezone`] for an unknown timezone name.
    /// * [`Error::InvalidConfig`] for missing hours or inverted bounds.
    /// * [`Error::EarlyCloseConflict`] for a conflict inside the bounds.
    pub fn build(mut self) -> Result<VenueCalendar> {
        ensure!(!self.name.is_empty(), "venue calendar name must not be empty");
        let tz = match self.tz {
            TzSource::Parsed(tz) => tz,
            TzSource::Name(name) => name
                .parse::<Tz>()
                .map_err(|_| Error::InvalidTimezone(name))?,
        };
        if self.hours.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "{}: at least one set of trading hours is required",
                self.name
            )));
        }
        self.hours.sort_by_key(|h| h.effective_from);

        let (start, end) = match self.bounds {
            Some(bounds) => bounds,
            None => {
                let (first, last) = Settings::instance().default_bounds();
                (Date::from_ymd(first, 1, 1)?, Date::from_ymd(last, 12, 31)?)
            }
        };
        if end < start {
            return Err(Error::InvalidConfig(format!(
                "{}: bounds inverted: {start} > {end}",
                self.name
            )));
        }

        let expanded = self.aggregate.expand(start, end)?;
        tracing::debug!(
            calendar = %self.name,
            timezone = %tz.name(),
            %start,
            %end,
            "built venue calendar"
        );
        Ok(VenueCalendar {
            name: self.name,
            tz,
            hours: self.hours,
            open_offset: self.open_offset,
            week_mask: self.week_mask,
            aggregate: self.aggregate,
            expanded,
        })
    }
}
