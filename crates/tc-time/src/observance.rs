//! Observance rules: pure `date -> date` shifts that move a holiday off a
//! weekend (or otherwise remap it) once its nominal date is known.

use tc_core::errors::Result;

use crate::date::Date;
use crate::weekday::Weekday;

/// A single date remapping rule.
///
/// The named variants cover the shift rules venue catalogs use; anything
/// else goes through [`Observance::Custom`].
#[derive(Clone, Copy)]
pub enum Observance {
    /// Saturday → Friday, Sunday → Monday.
    NearestWorkday,
    /// Sunday → Monday.
    SundayToMonday,
    /// Saturday or Sunday → the following Monday.
    WeekendToMonday,
    /// Saturday → Monday; Sunday or Monday → Tuesday.
    ///
    /// Used for the second of two consecutive holidays (Boxing Day).
    NextMondayOrTuesday,
    /// Saturday or Sunday → the preceding Friday.
    PreviousFriday,
    /// Sunday → Tuesday.
    SundayToTuesday,
    /// Sunday → Wednesday.
    SundayToWednesday,
    /// Any day → the Friday of the same Monday-based week.
    FridayOfWeek,
    /// The first weekday strictly after the date.
    NextWorkday,
    /// The last weekday strictly before the date.
    PreviousWorkday,
    /// The weekday before the nearest workday.
    BeforeNearestWorkday,
    /// The weekday after the nearest workday.
    AfterNearestWorkday,
    /// A caller-supplied rule.
    Custom {
        /// Label used in diagnostics.
        name: &'static str,
        /// The remapping function.
        f: fn(Date) -> Result<Date>,
    },
}

impl Observance {
    /// Apply the rule to `date`.
    pub fn apply(&self, date: Date) -> Result<Date> {
        let w = date.weekday();
        match self {
            Observance::NearestWorkday => match w {
                Weekday::Saturday => date.add_days(-1),
                Weekday::Sunday => date.add_days(1),
                _ => Ok(date),
            },
            Observance::SundayToMonday => match w {
                Weekday::Sunday => date.add_days(1),
                _ => Ok(date),
            },
            Observance::WeekendToMonday => match w {
                Weekday::Saturday => date.add_days(2),
                Weekday::Sunday => date.add_days(1),
                _ => Ok(date),
            },
            Observance::NextMondayOrTuesday => match w {
                Weekday::Saturday => date.add_days(2),
                Weekday::Sunday | Weekday::Monday => date.add_days(1),
                _ => Ok(date),
            },
            Observance::PreviousFriday => match w {
                Weekday::Saturday => date.add_days(-1),
                Weekday::Sunday => date.add_days(-2),
                _ => Ok(date),
            },
            Observance::SundayToTuesday => match w {
                Weekday::Sunday => date.add_days(2),
                _ => Ok(date),
            },
            Observance::SundayToWednesday => match w {
                Weekday::Sunday => date.add_days(3),
                _ => Ok(date),
            },
            Observance::FridayOfWeek => {
                date.add_days(Weekday::Friday.ordinal() as i32 - w.ordinal() as i32)
            }
            Observance::NextWorkday => step_to_workday(date, 1),
            Observance::PreviousWorkday => step_to_workday(date, -1),
            Observance::BeforeNearestWorkday => {
                step_to_workday(Observance::NearestWorkday.apply(date)?, -1)
            }
            Observance::AfterNearestWorkday => {
                step_to_workday(Observance::NearestWorkday.apply(date)?, 1)
            }
            Observance::Custom { f, .. } => f(date),
        }
    }

    /// Diagnostic name.
    pub fn name(&self) -> &'static str {
        match self {
            Observance::NearestWorkday => "nearest_workday",
            Observance::SundayToMonday => "sunday_to_monday",
            Observance::WeekendToMonday => "weekend_to_monday",
            Observance::NextMondayOrTuesday => "next_monday_or_tuesday",
            Observance::PreviousFriday => "previous_friday",
            Observance::SundayToTuesday => "sunday_to_tuesday",
            Observance::SundayToWednesday => "sunday_to_wednesday",
            Observance::FridayOfWeek => "friday_of_week",
            Observance::NextWorkday => "next_workday",
            Observance::PreviousWorkday => "previous_workday",
            Observance::BeforeNearestWorkday => "before_nearest_workday",
            Observance::AfterNearestWorkday => "after_nearest_workday",
            Observance::Custom { name, .. } => *name,
        }
    }
}

/// Step one day at a time in direction `step` until a Monday–Friday date.
fn step_to_workday(date: Date, step: i32) -> Result<Date> {
    let mut d = date.add_days(step)?;
    while d.weekday().is_weekend() {
        d = d.add_days(step)?;
    }
    Ok(d)
}

impl std::fmt::Debug for Observance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observance({})", self.name())
    }
}
