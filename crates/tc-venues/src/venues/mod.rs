//! The default venue catalog.
//!
//! Each venue is a factory `Fn(Option<&str>) -> Result<VenueCalendar>`; the
//! registry invokes it lazily and caches the result per variant.

pub mod always_open;
pub mod ifus;
pub mod us_holidays;
pub mod xcme;

use std::sync::Arc;

use tc_core::errors::Result;

use crate::registry::CalendarFactory;
use crate::venue::VenueCalendar;

/// Aliases registered by [`CalendarRegistry::with_defaults`](crate::CalendarRegistry::with_defaults).
pub const DEFAULT_ALIASES: [(&str, &str); 3] = [("CBOT", "XCME"), ("COMEX", "XCME"), ("ICEUS", "IFUS")];

/// Canonical names and factories of the default catalog.
pub fn default_factories() -> Vec<(&'static str, CalendarFactory)> {
    vec![
        (xcme::NAME, factory(xcme::calendar)),
        (ifus::NAME, factory(ifus::calendar)),
        ("24/7", factory(always_open::always_open)),
        ("24/5", factory(always_open::weekdays)),
        ("ALL", factory(always_open::all_days)),
    ]
}

fn factory<F>(f: F) -> CalendarFactory
where
    F: Fn(Option<&str>) -> Result<VenueCalendar> + Send + Sync + 'static,
{
    Arc::new(f)
}
