//! The [`Grid`] type: an immutable matrix of [`CellType`]s with a start and a
//! goal.
//!
//! A grid is built once (by [`GridGen`](crate::GridGen), [`Grid::from_cells`]
//! or [`Grid::parse`]) and only read afterwards, so it can be shared by `&`
//! reference between the search and whatever is watching it.

use std::fmt;

use crate::cell::CellType;
use crate::error::{GridError, GridResult};
use crate::geom::Coord;

/// A fully populated `rows x cols` grid plus fixed start and goal positions.
///
/// `start` and `goal` are always in bounds. They may be obstacles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellType>,
    rows: i32,
    cols: i32,
    start: Coord,
    goal: Coord,
}

/// Reject non-positive dimensions.
pub(crate) fn check_dims(rows: i32, cols: i32) -> GridResult<()> {
    if rows <= 0 || cols <= 0 {
        return Err(GridError::InvalidDimension { rows, cols });
    }
    Ok(())
}

/// Reject an endpoint outside `rows x cols`.
pub(crate) fn check_endpoint(name: &'static str, p: Coord, rows: i32, cols: i32) -> GridResult<()> {
    if p.row < 0 || p.col < 0 || p.row >= rows || p.col >= cols {
        return Err(GridError::OutOfBounds {
            name,
            coord: p,
            rows,
            cols,
        });
    }
    Ok(())
}

impl Grid {
    /// Build a grid from row-major `cells`.
    pub fn from_cells(
        rows: i32,
        cols: i32,
        cells: Vec<CellType>,
        start: Coord,
        goal: Coord,
    ) -> GridResult<Self> {
        check_dims(rows, cols)?;
        let expected = (rows as usize) * (cols as usize);
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        check_endpoint("start", start, rows, cols)?;
        check_endpoint("goal", goal, rows, cols)?;
        Ok(Self {
            cells,
            rows,
            cols,
            start,
            goal,
        })
    }

    /// Build a grid from ASCII art: `.` open, `#` obstacle, `R` ramp, one
    /// line per row. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str, start: Coord, goal: Coord) -> GridResult<Self> {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut rows = 0usize;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let before = cells.len();
            for (col, ch) in line.chars().enumerate() {
                let cell = CellType::from_glyph(ch).ok_or(GridError::UnknownCell {
                    ch,
                    row: rows,
                    col,
                })?;
                cells.push(cell);
            }
            let found = cells.len() - before;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::RaggedRows {
                        row: rows,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let cols = width.unwrap_or(0);
        Self::from_cells(rows as i32, cols as i32, cells, start, goal)
    }

    /// Assemble a grid whose invariants the caller has already checked.
    pub(crate) fn from_parts(
        rows: i32,
        cols: i32,
        cells: Vec<CellType>,
        start: Coord,
        goal: Coord,
    ) -> Self {
        debug_assert_eq!(cells.len(), (rows * cols) as usize);
        Self {
            cells,
            rows,
            cols,
            start,
            goal,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    #[inline]
    fn index(&self, p: Coord) -> Option<usize> {
        if self.contains(p) {
            Some((p.row * self.cols + p.col) as usize)
        } else {
            None
        }
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Coord) -> Option<CellType> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is in bounds and not an obstacle.
    #[inline]
    pub fn is_passable(&self, p: Coord) -> bool {
        self.at(p).is_some_and(CellType::is_passable)
    }

    /// Count cells equal to `kind`.
    pub fn count(&self, kind: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// The cells of row `r`, or `None` if out of bounds.
    pub fn row(&self, r: i32) -> Option<&[CellType]> {
        if r < 0 || r >= self.rows {
            return None;
        }
        let w = self.cols as usize;
        let lo = r as usize * w;
        Some(&self.cells[lo..lo + w])
    }

    /// Row-major iterator over `(Coord, CellType)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellType)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Coord::new(i as i32 / cols, i as i32 % cols), c))
    }

    /// Rows as numeric codes (see [`CellType::code`]).
    pub fn codes(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .filter_map(|r| self.row(r))
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }
}

/// One line per row, written as a list of cell codes: `[0, 1, 2, ...]`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).filter_map(|r| self.row(r)) {
            f.write_str("[")?;
            for (i, c) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", c.code())?;
            }
            f.write_str("]\n")?;
        }
        Ok(())
    }
}
