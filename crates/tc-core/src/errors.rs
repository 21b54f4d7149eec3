//! Error types for tradecal.
//!
//! A single `thiserror`-derived enum covers the whole workspace.  Variants
//! fall into two families:
//!
//! * **configuration errors**, raised while a rule, calendar, or registry
//!   entry is being constructed, and
//! * **lookup errors**, raised by a query against an already-built calendar.
//!
//! A query whose filters leave nothing behind is *not* an error; it yields an
//! empty result.

use thiserror::Error;

/// The top-level error type used throughout tradecal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Precondition violated (see [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error (out-of-range construction or arithmetic).
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ── Configuration errors ─────────────────────────────────────────────────
    /// A holiday rule was given both an offset chain and an observance.
    #[error("holiday rule {rule:?}: cannot use both an offset chain and an observance")]
    ConflictingAdjustment {
        /// Name of the offending rule.
        rule: String,
    },

    /// A holiday rule's validity window ends before it starts.
    #[error("holiday rule {rule:?}: validity window is inverted ({start} > {end})")]
    InvertedValidityWindow {
        /// Name of the offending rule.
        rule: String,
        /// Window start.
        start: String,
        /// Window end.
        end: String,
    },

    /// Two early-close buckets with different close times claim the same date.
    #[error("early close conflict on {date}: claimed by both {first} and {second}")]
    EarlyCloseConflict {
        /// The contested date.
        date: String,
        /// Close time of the bucket that claimed the date first.
        first: String,
        /// Close time of the conflicting bucket.
        second: String,
    },

    /// Registering an alias would introduce a cycle.
    #[error("cyclic calendar alias: {cycle}")]
    CyclicAlias {
        /// The full cycle path, e.g. `'A' -> 'B' -> 'A'`.
        cycle: String,
    },

    /// A name is already registered and `force` was not requested.
    #[error("a calendar is already registered under the name {name:?}")]
    NameCollision {
        /// The colliding name.
        name: String,
    },

    /// An IANA timezone identifier could not be resolved.
    #[error("invalid timezone {0:?}")]
    InvalidTimezone(String),

    /// A venue configuration document is malformed.
    #[error("invalid venue configuration: {0}")]
    InvalidConfig(String),

    // ── Lookup errors ────────────────────────────────────────────────────────
    /// No calendar, factory, or alias is registered under the name.
    #[error("unknown calendar {name:?}")]
    UnknownCalendar {
        /// The requested name.
        name: String,
    },

    /// The calendar cannot be built for the requested variant.
    #[error("calendar {name:?} has no variant {variant:?}")]
    UnknownVariant {
        /// Canonical calendar name.
        name: String,
        /// The requested variant.
        variant: String,
    },

    /// Session times were requested for a date that is not a session.
    #[error("{date} is not a session of {calendar}")]
    NotASession {
        /// Calendar name.
        calendar: String,
        /// The queried date.
        date: String,
    },

    /// No session exists in the searched direction.
    #[error("{calendar} has no session {direction} {date}")]
    NoSession {
        /// Calendar name.
        calendar: String,
        /// Search direction (`"after"` / `"before"`).
        direction: String,
        /// Search origin.
        date: String,
    },
}

impl Error {
    /// Return `true` if this error is raised while building a rule, calendar,
    /// or registry entry (as opposed to by a query).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ConflictingAdjustment { .. }
                | Error::InvertedValidityWindow { .. }
                | Error::EarlyCloseConflict { .. }
                | Error::CyclicAlias { .. }
                | Error::NameCollision { .. }
                | Error::InvalidTimezone(_)
                | Error::InvalidConfig(_)
        )
    }

    /// Return `true` if this error is a per-call lookup failure.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Error::UnknownCalendar { .. }
                | Error::UnknownVariant { .. }
                | Error::NotASession { .. }
                | Error::NoSession { .. }
        )
    }
}

/// Shorthand `Result` type used throughout tradecal.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tc_core::{ensure, errors::Error};
/// fn positive(x: i32) -> tc_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(matches!(positive(-1), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
