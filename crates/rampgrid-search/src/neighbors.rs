use rampgrid_core::Coord;

/// The four axis steps in expansion order: down, up, right, left.
///
/// The depth-first search pushes neighbors in this order, so the last one
/// (left) is popped and explored first. Changing the order changes which
/// path is found.
pub const CARDINAL: [Coord; 4] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
];

/// The cardinal neighbors of `p` in [`CARDINAL`] order, bounds unchecked.
#[inline]
pub fn cardinal(p: Coord) -> [Coord; 4] {
    CARDINAL.map(|d| p + d)
}
