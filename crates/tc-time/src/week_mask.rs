//! `WeekMask`: a set of weekdays.
//!
//! Used both for a venue's base trading week and for a holiday rule's
//! `days_of_week` filter.

use std::str::FromStr;

use tc_core::errors::{Error, Result};

use crate::weekday::Weekday;

/// A set of weekdays stored as a 7-bit mask (bit 0 = Monday).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekMask(u8);

impl WeekMask {
    /// No days.
    pub const EMPTY: WeekMask = WeekMask(0);

    /// Monday through Friday.
    pub const WEEKDAYS: WeekMask = WeekMask(0b001_1111);

    /// Every day of the week.
    pub const ALL: WeekMask = WeekMask(0b111_1111);

    fn bit(w: Weekday) -> u8 {
        1 << (w.ordinal() - 1)
    }

    /// Return `true` if `weekday` is in the set.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & Self::bit(weekday) != 0
    }

    /// Return a copy with `weekday` added.
    #[must_use]
    pub fn with(self, weekday: Weekday) -> Self {
        WeekMask(self.0 | Self::bit(weekday))
    }

    /// Return a copy with `weekday` removed.
    #[must_use]
    pub fn without(self, weekday: Weekday) -> Self {
        WeekMask(self.0 & !Self::bit(weekday))
    }

    /// Return `true` if no weekday is in the set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the contained weekdays, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|w| self.contains(*w))
    }
}

impl FromIterator<Weekday> for WeekMask {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(WeekMask::EMPTY, WeekMask::with)
    }
}

impl FromStr for WeekMask {
    type Err = Error;

    /// Parse either a seven-character `0`/`1` string, Monday first
    /// (`"1111100"`), or whitespace/comma separated day names (`"Mon Tue"`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() == 7 && s.bytes().all(|b| b == b'0' || b == b'1') {
            return Ok(s
                .bytes()
                .zip(Weekday::ALL)
                .filter(|(b, _)| *b == b'1')
                .map(|(_, w)| w)
                .collect());
        }
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::parse::<Weekday>)
            .collect::<Result<WeekMask>>()
            .map_err(|_| Error::InvalidArgument(format!("invalid week mask {s:?}")))
    }
}

impl std::fmt::Display for WeekMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = Weekday::ALL
            .iter()
            .map(|w| if self.contains(*w) { '1' } else { '0' })
            .collect();
        write!(f, "{bits}")
    }
}

impl std::fmt::Debug for WeekMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(|w| w.short_name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_mask() {
        let m = WeekMask::WEEKDAYS;
        assert!(m.contains(Weekday::Monday));
        assert!(m.contains(Weekday::Friday));
        assert!(!m.contains(Weekday::Saturday));
        assert_eq!(m.len(), 5);
        assert_eq!(m.to_string(), "1111100");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("1111100".parse::<WeekMask>().unwrap(), WeekMask::WEEKDAYS);
        assert_eq!("1111111".parse::<WeekMask>().unwrap(), WeekMask::ALL);
        let m: WeekMask = "Mon, Wed Fri".parse().unwrap();
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
        assert!("11111".parse::<WeekMask>().is_err());
        assert!("Mon Noday".parse::<WeekMask>().is_err());
    }

    #[test]
    fn with_without() {
        let m = WeekMask::EMPTY.with(Weekday::Sunday);
        assert!(m.contains(Weekday::Sunday));
        assert!(m.without(Weekday::Sunday).is_empty());
    }
}
