//! # tc-venues
//!
//! Venue calendars and the registry that hands them out by name.
//!
//! A [`VenueCalendar`] wraps a venue's closure rules with its timezone,
//! trading hours, and base week.  A [`CalendarRegistry`] resolves names and
//! aliases to shared, lazily built calendars.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Serde-backed venue configuration.
pub mod config;

/// Name → calendar registry.
pub mod registry;

/// Venue calendar and builder.
pub mod venue;

/// Default venue catalog.
pub mod venues;

pub use config::{BoundsConfig, EarlyCloseConfig, HoursConfig, VenueConfig};
pub use registry::{CalendarFactory, CalendarRegistry, Registration};
pub use venue::{SessionHours, Sessions, VenueCalendar, VenueCalendarBuilder};
