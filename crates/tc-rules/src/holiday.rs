//! `Holiday`: a declarative holiday/closure rule and its expansion into
//! concrete dates.

use std::collections::BTreeSet;

use tc_core::errors::{Error, Result};
use tc_time::{apply_chain, Date, Month, Observance, Offset, WeekMask};

/// Where a rule's yearly occurrence starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// A `(month, day)` pair instantiated in every reference year.  For a
    /// floating rule this is only the seed of the offset chain.
    Recurring {
        /// Anchor month.
        month: Month,
        /// Anchor day of month.
        day: u8,
    },
    /// A single pinned date.
    OneShot(Date),
}

/// How the anchor date is moved once instantiated.
///
/// An offset chain and an observance are alternatives; the enum makes it
/// impossible to hold both.
#[derive(Debug, Clone, Default)]
pub enum Adjustment {
    /// The anchor date is the holiday.
    #[default]
    None,
    /// Apply these steps in order.
    Offsets(Vec<Offset>),
    /// Apply one observance rule.
    Observance(Observance),
}

impl Adjustment {
    fn apply(&self, date: Date) -> Result<Date> {
        match self {
            Adjustment::None => Ok(date),
            Adjustment::Offsets(chain) => apply_chain(chain, date),
            Adjustment::Observance(obs) => obs.apply(date),
        }
    }
}

/// One named holiday or closure rule.
///
/// Build recurring rules with [`Holiday::builder`] and pinned ones with
/// [`Holiday::one_shot`].  A built rule is immutable.
#[derive(Debug, Clone)]
pub struct Holiday {
    name: String,
    anchor: Anchor,
    adjustment: Adjustment,
    days_of_week: Option<WeekMask>,
    start_date: Option<Date>,
    end_date: Option<Date>,
    year_filter: Option<BTreeSet<u16>>,
    year_mask: Option<BTreeSet<u16>>,
}

impl Holiday {
    /// Start building a recurring rule anchored at `month`/`day`.
    pub fn builder(name: impl Into<String>, month: Month, day: u8) -> HolidayBuilder {
        HolidayBuilder {
            holiday: Holiday {
                name: name.into(),
                anchor: Anchor::Recurring { month, day },
                adjustment: Adjustment::None,
                days_of_week: None,
                start_date: None,
                end_date: None,
                year_filter: None,
                year_mask: None,
            },
            conflict: false,
        }
    }

    /// A rule that fires on exactly one date.
    pub fn one_shot(name: impl Into<String>, date: Date) -> Self {
        Holiday {
            name: name.into(),
            anchor: Anchor::OneShot(date),
            adjustment: Adjustment::None,
            days_of_week: None,
            start_date: None,
            end_date: None,
            year_filter: None,
            year_mask: None,
        }
    }

    /// Rule name (diagnostic label, not a key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The anchor.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The anchor adjustment.
    pub fn adjustment(&self) -> &Adjustment {
        &self.adjustment
    }

    /// Inclusive validity window.
    pub fn validity(&self) -> (Option<Date>, Option<Date>) {
        (self.start_date, self.end_date)
    }

    /// Expand the rule into the sorted, deduplicated dates it fires on within
    /// the inclusive range `[start, end]`.
    ///
    /// Recurring rules are instantiated for every year from `start.year() - 1`
    /// to `end.year() + 1`: an offset chain may carry an occurrence across a
    /// year boundary, so the neighbouring years have to be looked at too.
    ///
    /// A reference year whose anchor or adjusted date falls outside
    /// [`Date::MIN`]..=[`Date::MAX`] contributes nothing.  Near the edges of
    /// that range an occurrence seeded in 1899 or 2200 is therefore missing:
    /// a December 31 anchor shifted one day forward never yields 1900-01-01.
    pub fn dates(&self, start: Date, end: Date) -> Vec<Date> {
        if end < start {
            return Vec::new();
        }
        let (month, day) = match self.anchor {
            Anchor::OneShot(d) => {
                return if start <= d && d <= end { vec![d] } else { Vec::new() };
            }
            Anchor::Recurring { month, day } => (month, day),
        };

        let first_year = start.year().saturating_sub(1);
        let last_year = end.year().saturating_add(1);
        let dates: BTreeSet<Date> = (first_year..=last_year)
            .filter(|y| self.year_selected(*y))
            .filter_map(|year| match self.resolve(year, month, day) {
                Ok(d) => Some(d),
                Err(e) => {
                    tracing::trace!(holiday = %self.name, year, error = %e, "no occurrence");
                    None
                }
            })
            .filter(|d| self.days_of_week.map_or(true, |m| m.contains(d.weekday())))
            .filter(|d| self.in_window(*d))
            .filter(|d| start <= *d && *d <= end)
            .collect();
        dates.into_iter().collect()
    }

    fn year_selected(&self, year: u16) -> bool {
        if self.year_filter.as_ref().is_some_and(|f| f.contains(&year)) {
            return false;
        }
        self.year_mask.as_ref().map_or(true, |m| m.contains(&year))
    }

    fn resolve(&self, year: u16, month: Month, day: u8) -> Result<Date> {
        let anchor = Date::from_month_day(year, month, day)?;
        self.adjustment.apply(anchor)
    }

    fn in_window(&self, date: Date) -> bool {
        self.start_date.map_or(true, |s| date >= s) && self.end_date.map_or(true, |e| date <= e)
    }
}

impl std::fmt::Display for Holiday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.anchor {
            Anchor::OneShot(d) => write!(f, "Holiday: {} ({d})", self.name),
            Anchor::Recurring { month, day } => {
                write!(f, "Holiday: {} ({month} {day}", self.name)?;
                match &self.adjustment {
                    Adjustment::None => {}
                    Adjustment::Offsets(chain) => write!(f, ", {} offsets", chain.len())?,
                    Adjustment::Observance(obs) => write!(f, ", observance={}", obs.name())?,
                }
                write!(f, ")")
            }
        }
    }
}

/// Builder for recurring [`Holiday`] rules.
#[derive(Debug, Clone)]
#[must_use]
pub struct HolidayBuilder {
    holiday: Holiday,
    conflict: bool,
}

impl HolidayBuilder {
    /// Append one step to the offset chain.
    pub fn offset(mut self, step: Offset) -> Self {
        match self.holiday.adjustment {
            Adjustment::Offsets(ref mut chain) => chain.push(step),
            Adjustment::None => self.holiday.adjustment = Adjustment::Offsets(vec![step]),
            Adjustment::Observance(_) => self.conflict = true,
        }
        self
    }

    /// Append several steps to the offset chain, in order.
    pub fn offsets(self, steps: impl IntoIterator<Item = Offset>) -> Self {
        steps.into_iter().fold(self, HolidayBuilder::offset)
    }

    /// Set the observance rule.
    pub fn observance(mut self, observance: Observance) -> Self {
        match self.holiday.adjustment {
            Adjustment::Offsets(_) => self.conflict = true,
            _ => self.holiday.adjustment = Adjustment::Observance(observance),
        }
        self
    }

    /// Keep only occurrences falling on one of these weekdays.
    pub fn days_of_week(mut self, days: WeekMask) -> Self {
        self.holiday.days_of_week = Some(days);
        self
    }

    /// First date (inclusive) on which the rule is in force.
    pub fn start_date(mut self, date: Date) -> Self {
        self.holiday.start_date = Some(date);
        self
    }

    /// Last date (inclusive) on which the rule is in force.
    pub fn end_date(mut self, date: Date) -> Self {
        self.holiday.end_date = Some(date);
        self
    }

    /// Years in which the rule does not recur.
    pub fn year_filter(mut self, years: impl IntoIterator<Item = u16>) -> Self {
        self.holiday
            .year_filter
            .get_or_insert_with(BTreeSet::new)
            .extend(years);
        self
    }

    /// Restrict recurrence to these years (applied after the filter).
    pub fn year_mask(mut self, years: impl IntoIterator<Item = u16>) -> Self {
        self.holiday
            .year_mask
            .get_or_insert_with(BTreeSet::new)
            .extend(years);
        self
    }

    /// Validate and build the rule.
    ///
    /// # Errors
    /// * [`Error::ConflictingAdjustment`] if both an offset chain and an
    ///   observance were given.
    /// * [`Error::InvertedValidityWindow`] if `end_date < start_date`.
    /// * [`Error::InvalidArgument`] if the anchor day cannot exist in the
    ///   anchor month in any year.
    pub fn build(self) -> Result<Holiday> {
        let h = self.holiday;
        if self.conflict {
            return Err(Error::ConflictingAdjustment { rule: h.name });
        }
        if let (Some(start), Some(end)) = (h.start_date, h.end_date) {
            if end < start {
                return Err(Error::InvertedValidityWindow {
                    rule: h.name,
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        if let Anchor::Recurring { month, day } = h.anchor {
            if day == 0 || day > month.max_days() {
                return Err(Error::InvalidArgument(format!(
                    "holiday rule {:?}: {month} has no day {day}",
                    h.name
                )));
            }
        }
        Ok(h)
    }
}
