//! Process-wide settings.
//!
//! [`Settings`] holds the **default calendar bounds**: the range of years over
//! which a venue calendar memoizes its expanded holiday sets when the venue
//! does not declare bounds of its own.  It is a singleton reached through
//! [`Settings::instance`].
//!
//! Thread safety: the bounds are stored behind a `Mutex`.  Tests that change
//! them should use [`ScopedBounds`] so the previous values are restored.

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::ensure;
use crate::errors::Result;

/// First year of the default memoized range.
pub const DEFAULT_FIRST_YEAR: u16 = 1990;

/// Last year of the default memoized range.
pub const DEFAULT_LAST_YEAR: u16 = 2040;

/// Process-wide settings used by tradecal.
pub struct Settings {
    bounds: Mutex<(u16, u16)>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            bounds: Mutex::new((DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, (u16, u16)> {
        // The guarded value is a plain pair; a poisoned lock still holds a
        // consistent one.
        self.bounds.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the default `(first_year, last_year)` bounds, inclusive.
    pub fn default_bounds(&self) -> (u16, u16) {
        *self.lock()
    }

    /// Set the default bounds.
    ///
    /// # Errors
    /// Returns a precondition error if `first_year > last_year`.
    pub fn set_default_bounds(&self, first_year: u16, last_year: u16) -> Result<()> {
        ensure!(
            first_year <= last_year,
            "default bounds inverted: {first_year} > {last_year}"
        );
        *self.lock() = (first_year, last_year);
        tracing::debug!(first_year, last_year, "default calendar bounds changed");
        Ok(())
    }
}

/// RAII guard that overrides the default bounds and restores the previous
/// values when dropped.
pub struct ScopedBounds {
    previous: (u16, u16),
}

impl ScopedBounds {
    /// Override the default bounds for the lifetime of the guard.
    pub fn new(first_year: u16, last_year: u16) -> Result<Self> {
        let settings = Settings::instance();
        let previous = settings.default_bounds();
        settings.set_default_bounds(first_year, last_year)?;
        Ok(Self { previous })
    }
}

impl Drop for ScopedBounds {
    fn drop(&mut self) {
        let (first, last) = self.previous;
        *Settings::instance().lock() = (first, last);
    }
}
