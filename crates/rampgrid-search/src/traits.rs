use rampgrid_core::{Coord, Grid};

use crate::neighbors::cardinal;

/// Minimal search interface: grid dimensions and neighbor enumeration.
pub trait Pather {
    /// `(rows, cols)` of the searchable area, anchored at (0, 0).
    fn dims(&self) -> (i32, i32);

    /// Append the traversable neighbors of `p` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>);
}

/// Cardinal neighbors in [`CARDINAL`](crate::CARDINAL) order that are in bounds and not
/// obstacles. Open and ramp cells are treated alike, and `p` itself is never
/// checked.
impl Pather for Grid {
    #[inline]
    fn dims(&self) -> (i32, i32) {
        (self.rows(), self.cols())
    }

    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
        buf.extend(cardinal(p).into_iter().filter(|&n| self.is_passable(n)));
    }
}
