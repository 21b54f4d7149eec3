//! Calendar aggregation: merging a venue's regular holidays, ad-hoc
//! closures, and early-close buckets into query-ready sets.
//!
//! Precedence: a full closure always wins over an early close on the same
//! date.  Two early-close buckets with different close times claiming the
//! same open date is a configuration error.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveTime;
use tc_core::errors::{Error, Result};
use tc_time::Date;

use crate::ad_hoc::AdHocDates;
use crate::holiday::Holiday;

/// Name reported for ad-hoc closures added without a label of their own.
pub const AD_HOC_LABEL: &str = "Ad-hoc closure";

/// Dates on which the venue closes early at one particular time.
#[derive(Debug, Clone)]
pub struct EarlyClose {
    close: NaiveTime,
    rules: Vec<Holiday>,
    dates: AdHocDates,
}

impl EarlyClose {
    /// An empty bucket closing at `close`.
    pub fn new(close: NaiveTime) -> Self {
        Self {
            close,
            rules: Vec::new(),
            dates: AdHocDates::new(),
        }
    }

    /// Add a recurring rule to the bucket.
    #[must_use]
    pub fn rule(mut self, rule: Holiday) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add several rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Holiday>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Add explicit one-off dates.
    #[must_use]
    pub fn dates(mut self, dates: &AdHocDates) -> Self {
        self.dates = std::mem::take(&mut self.dates).union(dates);
        self
    }

    /// The bucket's close time.
    pub fn close(&self) -> NaiveTime {
        self.close
    }

    fn candidates(&self, start: Date, end: Date) -> BTreeSet<Date> {
        self.rules
            .iter()
            .flat_map(|r| r.dates(start, end))
            .chain(self.dates.dates_in(start, end))
            .collect()
    }
}

/// The full set of closure inputs of one venue.
#[derive(Debug, Clone, Default)]
pub struct CalendarAggregate {
    regular: Vec<Holiday>,
    ad_hoc: AdHocDates,
    ad_hoc_lists: Vec<(String, AdHocDates)>,
    early_closes: Vec<EarlyClose>,
}

impl CalendarAggregate {
    /// An aggregate with no closures at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular (all-day) holiday rule.
    #[must_use]
    pub fn regular(mut self, rule: Holiday) -> Self {
        self.regular.push(rule);
        self
    }

    /// Add several regular holiday rules.
    #[must_use]
    pub fn regulars(mut self, rules: impl IntoIterator<Item = Holiday>) -> Self {
        self.regular.extend(rules);
        self
    }

    /// Add one-off all-day closures, reported as [`AD_HOC_LABEL`].
    #[must_use]
    pub fn ad_hoc(self, dates: &AdHocDates) -> Self {
        self.ad_hoc_named(AD_HOC_LABEL, dates)
    }

    /// Add one-off all-day closures reported under `label`.
    #[must_use]
    pub fn ad_hoc_named(mut self, label: impl Into<String>, dates: &AdHocDates) -> Self {
        self.ad_hoc = std::mem::take(&mut self.ad_hoc).union(dates);
        self.ad_hoc_lists.push((label.into(), dates.clone()));
        self
    }

    /// Add an early-close bucket.
    #[must_use]
    pub fn early_close(mut self, bucket: EarlyClose) -> Self {
        self.early_closes.push(bucket);
        self
    }

    /// The regular holiday rules.
    pub fn regular_rules(&self) -> &[Holiday] {
        &self.regular
    }

    /// The ad-hoc closures.
    pub fn ad_hoc_dates(&self) -> &AdHocDates {
        &self.ad_hoc
    }

    /// The early-close buckets.
    pub fn early_close_buckets(&self) -> &[EarlyClose] {
        &self.early_closes
    }

    /// All-day closures in `[start, end]`: every regular rule's occurrences
    /// plus the ad-hoc list.
    pub fn closed_dates(&self, start: Date, end: Date) -> BTreeSet<Date> {
        self.regular
            .iter()
            .flat_map(|r| r.dates(start, end))
            .chain(self.ad_hoc.dates_in(start, end))
            .collect()
    }

    /// All-day closures in `[start, end]` with the names of everything that
    /// closes the venue on each date: rule names for regular holidays, list
    /// labels for ad-hoc closures.  A name appears once per date.
    pub fn closed_dates_named(&self, start: Date, end: Date) -> BTreeMap<Date, Vec<String>> {
        let rules = self
            .regular
            .iter()
            .flat_map(|r| r.dates(start, end).into_iter().map(move |d| (d, r.name())));
        let lists = self
            .ad_hoc_lists
            .iter()
            .flat_map(|(label, dates)| dates.dates_in(start, end).map(move |d| (d, label.as_str())));

        let mut out: BTreeMap<Date, Vec<String>> = BTreeMap::new();
        for (date, name) in rules.chain(lists) {
            let names = out.entry(date).or_default();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        out
    }

    /// Early closes in `[start, end]`, excluding every date in `closed`.
    ///
    /// # Errors
    /// [`Error::EarlyCloseConflict`] if two buckets with different close
    /// times claim the same (open) date.
    pub fn early_close_dates(
        &self,
        start: Date,
        end: Date,
        closed: &BTreeSet<Date>,
    ) -> Result<BTreeMap<Date, NaiveTime>> {
        let mut out = BTreeMap::new();
        for bucket in &self.early_closes {
            for date in bucket.candidates(start, end) {
                if closed.contains(&date) {
                    continue;
                }
                match out.entry(date) {
                    Entry::Vacant(e) => {
                        e.insert(bucket.close);
                    }
                    Entry::Occupied(e) if *e.get() != bucket.close => {
                        return Err(Error::EarlyCloseConflict {
                            date: date.to_string(),
                            first: e.get().to_string(),
                            second: bucket.close.to_string(),
                        });
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }
        Ok(out)
    }

    /// Expand everything over `[start, end]`.
    pub fn expand(&self, start: Date, end: Date) -> Result<ExpandedCalendar> {
        let closed = self.closed_dates(start, end);
        let early_closes = self.early_close_dates(start, end, &closed)?;
        tracing::debug!(
            %start,
            %end,
            closed = closed.len(),
            early_closes = early_closes.len(),
            "expanded calendar aggregate"
        );
        Ok(ExpandedCalendar {
            start,
            end,
            closed,
            early_closes,
        })
    }
}

/// The concrete result of expanding a [`CalendarAggregate`] over a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedCalendar {
    start: Date,
    end: Date,
    closed: BTreeSet<Date>,
    early_closes: BTreeMap<Date, NaiveTime>,
}

impl ExpandedCalendar {
    /// First date of the expanded range.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last date of the expanded range.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Return `true` if `date` lies inside the expanded range.
    pub fn covers(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Return `true` if `date` is an all-day closure.
    pub fn is_closed(&self, date: Date) -> bool {
        self.closed.contains(&date)
    }

    /// Early-close time on `date`, if any.
    pub fn early_close(&self, date: Date) -> Option<NaiveTime> {
        self.early_closes.get(&date).copied()
    }

    /// Every all-day closure.
    pub fn closed_dates(&self) -> &BTreeSet<Date> {
        &self.closed
    }

    /// Every early close.
    pub fn early_close_dates(&self) -> &BTreeMap<Date, NaiveTime> {
        &self.early_closes
    }
}
