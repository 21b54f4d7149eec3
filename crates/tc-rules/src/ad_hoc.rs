//! `AdHocDates`: explicitly enumerated one-off closure dates.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tc_core::ensure;
use tc_core::errors::Result;
use tc_time::Date;

/// A flat set of one-off dates (storm closures, days of mourning, …).
///
/// Timestamps are normalized to their UTC calendar date on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdHocDates {
    dates: BTreeSet<Date>,
}

impl AdHocDates {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every date from `start` to `end`, both inclusive.
    pub fn range(start: Date, end: Date) -> Result<Self> {
        ensure!(start <= end, "ad-hoc range inverted: {start} > {end}");
        let mut dates = BTreeSet::new();
        let mut d = start;
        loop {
            dates.insert(d);
            if d == end {
                break;
            }
            d = d.add_days(1)?;
        }
        Ok(Self { dates })
    }

    /// Parse ISO dates (`YYYY-MM-DD`).
    pub fn parse<'a>(dates: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        dates.into_iter().map(str::parse::<Date>).collect()
    }

    /// Take the UTC calendar date of each timestamp.
    pub fn from_utc_timestamps(stamps: impl IntoIterator<Item = DateTime<Utc>>) -> Result<Self> {
        stamps
            .into_iter()
            .map(|ts| Date::from_naive_date(ts.date_naive()))
            .collect()
    }

    /// Add every date of `other`.
    #[must_use]
    pub fn union(mut self, other: &AdHocDates) -> Self {
        self.dates.extend(other.dates.iter().copied());
        self
    }

    /// Return `true` if `date` is listed.
    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    /// Dates within the inclusive range `[start, end]`, ascending.
    pub fn dates_in(&self, start: Date, end: Date) -> impl Iterator<Item = Date> + '_ {
        let empty = end < start;
        self.dates
            .range(start..=end.max(start))
            .copied()
            .filter(move |_| !empty)
    }

    /// All dates, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Return `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<Date> for AdHocDates {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<Date> for AdHocDates {
    fn extend<I: IntoIterator<Item = Date>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}
