//! The [`CellType`] of a single grid square.

/// What occupies a grid cell.
///
/// `Ramp` only changes how a cell is drawn; for traversal it behaves exactly
/// like `Open`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellType {
    #[default]
    Open,
    Obstacle,
    Ramp,
}

impl CellType {
    /// Numeric code used in grid dumps: 0 = open, 1 = obstacle, 2 = ramp.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Obstacle => 1,
            Self::Ramp => 2,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Obstacle),
            2 => Some(Self::Ramp),
            _ => None,
        }
    }

    /// Whether a search may step onto this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Obstacle)
    }

    /// ASCII glyph: `.` open, `#` obstacle, `R` ramp.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Obstacle => '#',
            Self::Ramp => 'R',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            '#' => Some(Self::Obstacle),
            'R' => Some(Self::Ramp),
            _ => None,
        }
    }
}
