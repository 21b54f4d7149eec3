//! # tc-rules
//!
//! The holiday-rule engine: [`Holiday`] descriptors, their expansion into
//! concrete dates, and the [`CalendarAggregate`] that merges a venue's
//! regular, ad-hoc, and early-close inputs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// One-off closure dates.
pub mod ad_hoc;

/// Aggregation of rules into closed and early-close sets.
pub mod aggregate;

/// Holiday rule descriptor and expansion.
pub mod holiday;

pub use ad_hoc::AdHocDates;
pub use aggregate::{CalendarAggregate, AD_HOC_LABEL, EarlyClose, ExpandedCalendar};
pub use holiday::{Adjustment, Anchor, Holiday, HolidayBuilder};
