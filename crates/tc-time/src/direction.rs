//! How to map a date onto a session when it is not one.

/// Rolling direction for [`SessionCalendar::to_session`](crate::calendar::SessionCalendar::to_session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Choose the first session on or after the date.
    Following,
    /// Choose the first session on or before the date.
    Preceding,
    /// Do not roll: the date must itself be a session.
    Strict,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::Following => "Following",
            Direction::Preceding => "Preceding",
            Direction::Strict => "Strict",
        };
        write!(f, "{s}")
    }
}
