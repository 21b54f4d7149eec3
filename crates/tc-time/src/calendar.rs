//! `SessionCalendar` trait.
//!
//! A session calendar knows which dates are trading sessions.  Everything
//! else (stepping to the next or previous session, rolling a date onto a
//! session, counting sessions) is derived from [`SessionCalendar::is_session`]
//! by the default methods.

use tc_core::errors::{Error, Result};

use crate::date::Date;
use crate::direction::Direction;
use crate::week_mask::WeekMask;

/// A calendar of trading sessions.
pub trait SessionCalendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"XCME"`).
    fn name(&self) -> &str;

    /// The days of the week on which the venue trades absent holidays.
    fn week_mask(&self) -> WeekMask;

    /// Return `true` if `date` is a trading session.
    fn is_session(&self, date: Date) -> bool;

    /// Return `true` if `date` falls outside the venue's base week.
    fn is_weekend(&self, date: Date) -> bool {
        !self.week_mask().contains(date.weekday())
    }

    /// Return `true` if `date` is in the base week but closed anyway.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_session(date)
    }

    /// The nearest session strictly after `date`.
    fn next_session(&self, date: Date) -> Result<Date> {
        scan(self, date, 1)
    }

    /// The nearest session strictly before `date`.
    fn previous_session(&self, date: Date) -> Result<Date> {
        scan(self, date, -1)
    }

    /// Map `date` onto a session according to `direction`.
    ///
    /// Sessions map to themselves.  With [`Direction::Strict`] any other date
    /// is a [`Error::NotASession`].
    fn to_session(&self, date: Date, direction: Direction) -> Result<Date> {
        if self.is_session(date) {
            return Ok(date);
        }
        match direction {
            Direction::Following => self.next_session(date),
            Direction::Preceding => self.previous_session(date),
            Direction::Strict => Err(Error::NotASession {
                calendar: self.name().to_string(),
                date: date.to_string(),
            }),
        }
    }

    /// Count sessions in the inclusive range `[start, end]`.
    ///
    /// Returns 0 if `end < start`.
    fn session_count(&self, start: Date, end: Date) -> usize {
        let mut count = 0;
        let mut d = start;
        while d <= end {
            if self.is_session(d) {
                count += 1;
            }
            match d.add_days(1) {
                Ok(next) => d = next,
                Err(_) => break,
            }
        }
        count
    }
}

/// Step from `from` in direction `step` until a session is found or the
/// supported date range runs out.
fn scan<C: SessionCalendar + ?Sized>(cal: &C, from: Date, step: i32) -> Result<Date> {
    let no_session = || Error::NoSession {
        calendar: cal.name().to_string(),
        direction: if step > 0 { "after" } else { "before" }.to_string(),
        date: from.to_string(),
    };
    if cal.week_mask().is_empty() {
        return Err(no_session());
    }
    let mut d = from;
    loop {
        d = d.add_days(step).map_err(|_| no_session())?;
        if cal.is_session(d) {
            return Ok(d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[derive(Debug)]
    struct Simple {
        mask: WeekMask,
        closed: HashSet<Date>,
    }

    impl SessionCalendar for Simple {
        fn name(&self) -> &str {
            "Simple"
        }
        fn week_mask(&self) -> WeekMask {
            self.mask
        }
        fn is_session(&self, date: Date) -> bool {
            self.mask.contains(date.weekday()) && !self.closed.contains(&date)
        }
    }

    fn weekdays_with(closed: &[Date]) -> Simple {
        Simple {
            mask: WeekMask::WEEKDAYS,
            closed: closed.iter().copied().collect(),
        }
    }

    #[test]
    fn next_and_previous_skip_weekend_and_holidays() {
        // 2024-03-29 Good Friday, 2024-04-01 Monday
        let cal = weekdays_with(&[date(2024, 3, 29)]);
        assert_eq!(cal.next_session(date(2024, 3, 28)).unwrap(), date(2024, 4, 1));
        assert_eq!(cal.previous_session(date(2024, 4, 1)).unwrap(), date(2024, 3, 28));
        assert!(cal.is_holiday(date(2024, 3, 29)));
        assert!(cal.is_weekend(date(2024, 3, 30)));
        assert!(!cal.is_holiday(date(2024, 3, 30)));
    }

    #[test]
    fn to_session_directions() {
        let cal = weekdays_with(&[]);
        let sat = date(2023, 9, 2);
        assert_eq!(cal.to_session(sat, Direction::Following).unwrap(), date(2023, 9, 4));
        assert_eq!(cal.to_session(sat, Direction::Preceding).unwrap(), date(2023, 9, 1));
        assert!(matches!(
            cal.to_session(sat, Direction::Strict),
            Err(Error::NotASession { .. })
        ));
        let mon = date(2023, 9, 4);
        assert_eq!(cal.to_session(mon, Direction::Strict).unwrap(), mon);
    }

    #[test]
    fn empty_week_has_no_sessions() {
        let cal = Simple {
            mask: WeekMask::EMPTY,
            closed: HashSet::new(),
        };
        assert!(matches!(
            cal.next_session(date(2024, 1, 1)),
            Err(Error::NoSession { .. })
        ));
    }

    #[test]
    fn count_inclusive() {
        let cal = weekdays_with(&[]);
        // Mon 2023-09-04 .. Sun 2023-09-10
        assert_eq!(cal.session_count(date(2023, 9, 4), date(2023, 9, 10)), 5);
        assert_eq!(cal.session_count(date(2023, 9, 10), date(2023, 9, 4)), 0);
    }
}
