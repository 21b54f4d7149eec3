//! `Offset`: one step of a floating holiday's offset chain.
//!
//! A chain is a `Vec<Offset>` applied left to right, each step consuming the
//! previous step's output.  Steps do not commute: "third Monday of the
//! month, then back three days" lands somewhere else than "back three days,
//! then third Monday of the month".

use tc_core::errors::{Error, Result};

use crate::date::Date;
use crate::observance::Observance;
use crate::provider::DateProvider;
use crate::weekday::Weekday;

/// A single date transformation.
#[derive(Clone, Debug)]
pub enum Offset {
    /// Shift by a fixed number of calendar days.
    Days(i32),

    /// Relative weekday: for `n >= 1` the `n`-th `weekday` on or after the
    /// date, for `n <= -1` the `|n|`-th on or before it.  `n == 0` behaves
    /// like `1`.
    ///
    /// Memorial Day, for example, is May 31 with `Weekday { Monday, -1 }`.
    Weekday {
        /// Target weekday.
        weekday: Weekday,
        /// Occurrence count; sign gives the direction.
        n: i8,
    },

    /// The `n`-th `weekday` of the month the date falls in.
    NthWeekdayOfMonth {
        /// Occurrence (1-based).
        n: u8,
        /// Target weekday.
        weekday: Weekday,
    },

    /// The last `weekday` of the month the date falls in.
    LastWeekdayOfMonth(Weekday),

    /// Roll forward to the first provider date strictly after the date.
    ///
    /// Anchoring at January 1 therefore yields the feast of the anchor year.
    Feast(DateProvider),

    /// Apply an observance rule as a chain step.
    Observe(Observance),
}

impl Offset {
    /// Apply the step to `date`.
    ///
    /// # Errors
    /// Returns a date error when the result leaves the supported range, when
    /// the requested weekday occurrence does not exist, or when a feast
    /// provider has no data for the relevant years.
    pub fn apply(&self, date: Date) -> Result<Date> {
        match self {
            Offset::Days(n) => date.add_days(*n),
            Offset::Weekday { weekday, n } => {
                let n = *n as i32;
                if n < 0 {
                    date.on_or_before(*weekday)?.add_days(7 * (n + 1))
                } else {
                    date.on_or_after(*weekday)?.add_days(7 * (n.max(1) - 1))
                }
            }
            Offset::NthWeekdayOfMonth { n, weekday } => {
                Date::nth_weekday(*n, *weekday, date.year(), date.month())
            }
            Offset::LastWeekdayOfMonth(weekday) => {
                Date::last_weekday(*weekday, date.year(), date.month())
            }
            Offset::Feast(provider) => provider.next_after(date).ok_or_else(|| {
                Error::Date(format!("{} has no date after {date}", provider.name()))
            }),
            Offset::Observe(observance) => observance.apply(date),
        }
    }
}

/// Apply a whole chain in order.
pub fn apply_chain(chain: &[Offset], date: Date) -> Result<Date> {
    chain.iter().try_fold(date, |d, step| step.apply(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn relative_weekday() {
        let memorial = Offset::Weekday {
            weekday: Weekday::Monday,
            n: -1,
        };
        assert_eq!(memorial.apply(date(2023, 5, 31)).unwrap(), date(2023, 5, 29));
        let third_monday = Offset::Weekday {
            weekday: Weekday::Monday,
            n: 3,
        };
        assert_eq!(third_monday.apply(date(2024, 1, 1)).unwrap(), date(2024, 1, 15));
        let second_back = Offset::Weekday {
            weekday: Weekday::Friday,
            n: -2,
        };
        // 2024-01-12 is a Friday
        assert_eq!(second_back.apply(date(2024, 1, 12)).unwrap(), date(2024, 1, 5));
    }

    #[test]
    fn chain_order_matters() {
        let snap = Offset::NthWeekdayOfMonth {
            n: 3,
            weekday: Weekday::Monday,
        };
        let back = Offset::Days(-3);
        let anchor = date(1995, 1, 1);
        let forward = apply_chain(&[snap.clone(), back.clone()], anchor).unwrap();
        let reverse = apply_chain(&[back, snap], anchor).unwrap();
        assert_eq!(forward, date(1995, 1, 13));
        assert_eq!(reverse, date(1994, 12, 19));
    }

    #[test]
    fn feast_from_january_first() {
        let good_friday = [Offset::Feast(DateProvider::easter()), Offset::Days(-2)];
        assert_eq!(apply_chain(&good_friday, date(2024, 1, 1)).unwrap(), date(2024, 3, 29));
        let empty = Offset::Feast(DateProvider::from_table("none", []));
        assert!(empty.apply(date(2024, 1, 1)).is_err());
    }

    #[test]
    fn last_weekday_of_month() {
        let step = Offset::LastWeekdayOfMonth(Weekday::Monday);
        assert_eq!(step.apply(date(2024, 8, 1)).unwrap(), date(2024, 8, 26));
    }
}
