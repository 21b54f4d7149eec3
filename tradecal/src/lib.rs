//! # tradecal
//!
//! Trading-venue calendars: which dates a venue trades, when each session
//! opens and closes, and which sessions close early.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on it rather than on the `tc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use tradecal::prelude::*;
//!
//! let xcme = CalendarRegistry::global().get("CBOT", None).unwrap();
//! let good_friday = Date::from_ymd(2024, 3, 29).unwrap();
//! assert!(!xcme.is_session(good_friday));
//! assert_eq!(xcme.next_session(good_friday).unwrap(), Date::from_ymd(2024, 4, 1).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Errors and process-wide settings.
pub use tc_core as core;

/// Dates, weekdays, observances, offsets, and date providers.
pub use tc_time as time;

/// Holiday rules and calendar aggregation.
pub use tc_rules as rules;

/// Venue calendars, configuration, and the registry.
pub use tc_venues as venues;

/// The names most programs need.
pub mod prelude {
    pub use tc_core::{Error, Result, ScopedBounds, Settings};
    pub use tc_rules::{AdHocDates, CalendarAggregate, EarlyClose, Holiday};
    pub use tc_time::{
        Date, DateProvider, Direction, Month, Observance, Offset, SessionCalendar, WeekMask,
        Weekday,
    };
    pub use tc_venues::{CalendarRegistry, SessionHours, VenueCalendar, VenueConfig};
}
