//! Neighbour-list direction.

use std::fmt;

/// Which half of a neighbour list to enumerate.
///
/// Neighbours of a site are split by their position relative to the
/// central site in row-major order. Looping every site over only its
/// `Up` (or only its `Down`) neighbours visits each unordered pair
/// exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Neighbours that follow the central site.
    Up,
    /// Neighbours that precede the central site.
    Down,
    /// Both halves.
    #[default]
    Both,
}

impl Direction {
    /// `true` if the up-list half is enumerated.
    pub fn includes_up(self) -> bool {
        self != Direction::Down
    }

    /// `true` if the down-list half is enumerated.
    pub fn includes_down(self) -> bool {
        self != Direction::Up
    }

    /// The opposite half. `Both` is its own reverse.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Both => Direction::Both,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves() {
        assert!(Direction::Up.includes_up());
        assert!(!Direction::Up.includes_down());
        assert!(Direction::Down.includes_down());
        assert!(!Direction::Down.includes_up());
        assert!(Direction::Both.includes_up() && Direction::Both.includes_down());
    }

    #[test]
    fn reverse_is_involution() {
        for d in [Direction::Up, Direction::Down, Direction::Both] {
            assert_eq!(d.reverse().reverse(), d);
        }
        assert_eq!(Direction::default(), Direction::Both);
    }
}
