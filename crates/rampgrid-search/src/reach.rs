//! Flood fill over the [`Pather`] neighbor relation.

use rampgrid_core::Coord;

use crate::traits::Pather;

/// Flood-fill from `from` and return every coordinate connected to it, `from`
/// included, in discovery order.
///
/// Uses the same neighbor relation as the depth-first search, so the result
/// is exactly what an exhausted search visits. Returns an empty vector if
/// `from` lies outside the pather's bounds.
pub fn reachable<P: Pather>(pather: &P, from: Coord) -> Vec<Coord> {
    let (rows, cols) = pather.dims();
    let idx = |p: Coord| {
        if p.row < 0 || p.col < 0 || p.row >= rows || p.col >= cols {
            None
        } else {
            Some((p.row * cols + p.col) as usize)
        }
    };

    let mut result = Vec::new();
    let Some(si) = idx(from) else {
        return result;
    };

    let mut seen = vec![false; (rows.max(0) * cols.max(0)) as usize];
    let mut stack = vec![from];
    let mut nbuf = Vec::with_capacity(4);
    seen[si] = true;
    result.push(from);

    while let Some(cp) = stack.pop() {
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in nbuf.iter() {
            if let Some(ni) = idx(np) {
                if !seen[ni] {
                    seen[ni] = true;
                    stack.push(np);
                    result.push(np);
                }
            }
        }
    }

    result
}
