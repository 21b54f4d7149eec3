//! # tc-time
//!
//! Date arithmetic and the leaf utilities holiday rules are built from:
//! observance shifts, offset-chain steps, and year → date providers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `SessionCalendar` trait.
pub mod calendar;

/// `Date` type.
pub mod date;

/// Session rolling direction.
pub mod direction;

/// Gregorian Easter.
pub mod easter;

/// `Month`: month of the year.
pub mod month;

/// Observance rules (weekend shifts and friends).
pub mod observance;

/// Offset-chain steps.
pub mod offset;

/// Year → date providers.
pub mod provider;

/// `WeekMask`: a set of weekdays.
pub mod week_mask;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::SessionCalendar;
pub use date::Date;
pub use direction::Direction;
pub use easter::easter_sunday;
pub use month::Month;
pub use observance::Observance;
pub use offset::{apply_chain, Offset};
pub use provider::DateProvider;
pub use week_mask::WeekMask;
pub use weekday::Weekday;
