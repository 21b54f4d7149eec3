//! `Date` type.
//!
//! Dates are stored as a serial number of days.  Serial 1 is Monday,
//! January 1, 1900; the valid range is 1900-01-01 to 2199-12-31, which
//! comfortably covers every venue history the rule catalog describes.
//!
//! Conversions to and from [`chrono::NaiveDate`] are provided for the session
//! timestamp layer; all holiday arithmetic stays on the serial.

use std::str::FromStr;

use chrono::NaiveDate;
use tc_core::errors::{Error, Result};

use crate::month::Month;
use crate::weekday::Weekday;

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

/// Days from 1970-01-01 back to the serial epoch (serial 1 = 1900-01-01).
const UNIX_TO_SERIAL: i32 = 25_568;

impl Date {
    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    pub fn from_serial(serial: i32) -> Result<Self> {
        let d = Date(serial);
        if d < Self::MIN || d > Self::MAX {
            return Err(Error::Date(format!("serial {serial} out of range")));
        }
        Ok(d)
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Create a date from a [`Month`] value.
    pub fn from_month_day(year: u16, month: Month, day: u8) -> Result<Self> {
        Self::from_ymd(year, month.number(), day)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)` in one decomposition.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // serial 1 → Monday, serial 2 → Tuesday, …
        let w = ((self.0 - 1).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(w).expect("rem_euclid always in 1..=7")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        self.0
            .checked_add(n)
            .and_then(|serial| Date::from_serial(serial).ok())
            .ok_or_else(|| Error::Date(format!("{self} {n:+} days is out of range")))
    }

    /// Return the number of calendar days from `self` to `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, days_in_month(y, m)))
    }

    /// Return the first date on or after `self` that falls on `weekday`.
    pub fn on_or_after(self, weekday: Weekday) -> Result<Self> {
        let skip = (weekday.ordinal() as i32 - self.weekday().ordinal() as i32).rem_euclid(7);
        self.add_days(skip)
    }

    /// Return the last date on or before `self` that falls on `weekday`.
    pub fn on_or_before(self, weekday: Weekday) -> Result<Self> {
        let back = (self.weekday().ordinal() as i32 - weekday.ordinal() as i32).rem_euclid(7);
        self.add_days(-back)
    }

    /// Return the *n*-th occurrence of `weekday` in the month of `year`/`month`.
    ///
    /// For example, `nth_weekday(3, Weekday::Monday, 1995, 1)` returns the
    /// third Monday of January 1995 (1995-01-16).
    ///
    /// # Errors
    /// Returns an error if `n` is zero or larger than the number of such
    /// weekdays in the month.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::Date("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?.on_or_after(weekday)?;
        let day = first.day_of_month() as u16 + 7 * (n as u16 - 1);
        if day > days_in_month(year, month) as u16 {
            return Err(Error::Date(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}"
            )));
        }
        Date::from_ymd(year, month, day as u8)
    }

    /// Return the last occurrence of `weekday` in the month of `year`/`month`.
    pub fn last_weekday(weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        Date::from_ymd(year, month, 1)?
            .end_of_month()
            .on_or_before(weekday)
    }

    // ── chrono interop ────────────────────────────────────────────────────────

    /// Convert to a [`NaiveDate`].
    pub fn to_naive_date(self) -> NaiveDate {
        let (y, m, d) = ymd_from_serial(self.0);
        NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32)
            .expect("every serial in range is a valid proleptic Gregorian date")
    }

    /// Convert from a [`NaiveDate`], failing outside the supported range.
    pub fn from_naive_date(date: NaiveDate) -> Result<Self> {
        use chrono::Datelike;
        let year = u16::try_from(date.year())
            .map_err(|_| Error::Date(format!("year {} out of range", date.year())))?;
        Date::from_ymd(year, date.month() as u8, date.day() as u8)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<Date> for NaiveDate {
    fn from(d: Date) -> NaiveDate {
        d.to_naive_date()
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;
    fn try_from(d: NaiveDate) -> Result<Date> {
        Date::from_naive_date(d)
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
    fn from_str(s: &str) -> Result<Self> {
        let naive = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|e| Error::Date(format!("cannot parse {s:?}: {e}")))?;
        Date::from_naive_date(naive)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Convert (year, month, day) to a serial number via the days-from-civil
/// algorithm (March-based years, 400-year eras).
fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let (m, d) = (month as i32, day as i32);
    let y = year as i32 - i32::from(m <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 + UNIX_TO_SERIAL
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let z = serial - UNIX_TO_SERIAL + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y as u16, m as u8, d as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
