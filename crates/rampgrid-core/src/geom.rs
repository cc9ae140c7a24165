//! Geometry primitive: [`Coord`], a `(row, col)` grid position.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::error::ParseCoordError;

/// A 2D integer grid position. Rows grow down, columns grow right.
///
/// Ordering is row-major: `row` first, then `col`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Whether `other` is exactly one step away along a single axis.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

/// Parses `"row,col"`, with optional surrounding parentheses and whitespace,
/// so that both `5,5` and `(5, 5)` are accepted.
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(trimmed);
        let (r, c) = inner
            .split_once(',')
            .ok_or_else(|| ParseCoordError::new(s))?;
        let row = r.trim().parse().map_err(|_| ParseCoordError::new(s))?;
        let col = c.trim().parse().map_err(|_| ParseCoordError::new(s))?;
        Ok(Self::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 3), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 3), Coord::new(1, 0)]);
    }

    #[test]
    fn adjacency() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn display_matches_tuple_form() {
        assert_eq!(Coord::new(5, 19).to_string(), "(5, 19)");
    }

    #[test]
    fn parse_plain_and_parenthesised() {
        assert_eq!("5,5".parse::<Coord>().unwrap(), Coord::new(5, 5));
        assert_eq!(" (19, 3) ".parse::<Coord>().unwrap(), Coord::new(19, 3));
        assert_eq!("-1,2".parse::<Coord>().unwrap(), Coord::new(-1, 2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("5".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
        assert!("1,2,3".parse::<Coord>().is_err());
    }
}
