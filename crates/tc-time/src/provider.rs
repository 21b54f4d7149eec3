//! Year → date providers.
//!
//! A [`DateProvider`] is an opaque pure function that, given a year, returns
//! the date of some moving feast or astronomical event in that year (Easter,
//! a lunar-calendar festival, a solstice).  Holiday rules reference providers
//! through [`Offset::Feast`](crate::offset::Offset::Feast) and never look at
//! how the date is computed.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::date::Date;
use crate::easter::easter_sunday;

type YearFn = dyn Fn(u16) -> Option<Date> + Send + Sync;

/// A named `year -> date` function.
///
/// Cheap to clone; the function is shared behind an `Arc`.
#[derive(Clone)]
pub struct DateProvider {
    name: Arc<str>,
    f: Arc<YearFn>,
}

impl DateProvider {
    /// Wrap an arbitrary pure function.  Returning `None` means the provider
    /// has no date for that year.
    pub fn new<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(u16) -> Option<Date> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Western Easter Sunday.
    pub fn easter() -> Self {
        Self::new("Easter", |year| easter_sunday(year).ok())
    }

    /// A provider backed by a table of precomputed dates, one per year.
    ///
    /// This is how lunar festivals and equinox/solstice dates enter the
    /// engine: the catalog ships the table, the engine looks years up.  If
    /// two entries share a year the later one wins.
    pub fn from_table(name: impl Into<Arc<str>>, dates: impl IntoIterator<Item = Date>) -> Self {
        let table: BTreeMap<u16, Date> = dates.into_iter().map(|d| (d.year(), d)).collect();
        Self::new(name, move |year| table.get(&year).copied())
    }

    /// Provider name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The provider's date in `year`, if any.
    pub fn date_in(&self, year: u16) -> Option<Date> {
        (self.f)(year)
    }

    /// The first provider date strictly after `date`.
    ///
    /// Looks at `date`'s own year first, then the following one.
    pub fn next_after(&self, date: Date) -> Option<Date> {
        let year = date.year();
        match self.date_in(year) {
            Some(d) if d > date => Some(d),
            _ => year.checked_add(1).and_then(|y| self.date_in(y)).filter(|d| *d > date),
        }
    }
}

impl std::fmt::Debug for DateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DateProvider({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn easter_rolls_forward() {
        let easter = DateProvider::easter();
        assert_eq!(easter.next_after(date(2023, 1, 1)), Some(date(2023, 4, 9)));
        // On Easter itself the next one is a year away.
        assert_eq!(easter.next_after(date(2023, 4, 9)), Some(date(2024, 3, 31)));
    }

    #[test]
    fn table_lookup() {
        let spring = DateProvider::from_table(
            "Spring Festival",
            [date(2023, 1, 22), date(2024, 2, 10)],
        );
        assert_eq!(spring.date_in(2024), Some(date(2024, 2, 10)));
        assert_eq!(spring.date_in(2025), None);
        assert_eq!(spring.next_after(date(2023, 6, 1)), Some(date(2024, 2, 10)));
        assert_eq!(spring.next_after(date(2024, 6, 1)), None);
        assert_eq!(format!("{spring:?}"), "DateProvider(Spring Festival)");
    }
}
