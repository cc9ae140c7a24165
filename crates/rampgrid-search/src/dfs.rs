//! Depth-first search with an explicit stack.

use rampgrid_core::{Coord, Grid};

use crate::context::{Cancelled, Context};
use crate::observer::SearchObserver;
use crate::traits::Pather;

/// An ordered sequence of coordinates from start to goal.
pub type Path = Vec<Coord>;

const NO_PARENT: usize = usize::MAX;

/// A frontier entry. Following `parent` links back to the start yields the
/// path that led to `pos`.
#[derive(Clone, Copy, Debug)]
struct Node {
    pos: Coord,
    parent: usize,
}

/// Reusable depth-first search engine.
///
/// `DepthFirst` owns the visited marks, the frontier stack and the node
/// arena, so repeated searches reuse their allocations. Every run starts
/// from an empty visited set; nothing carries over from a previous run
/// except [`is_visited`](Self::is_visited) answers, which describe the most
/// recent run until the next one starts.
pub struct DepthFirst {
    rows: i32,
    cols: i32,
    // Visited marks, stamped with the generation of the run that set them.
    visited: Vec<u32>,
    generation: u32,
    visited_count: usize,
    nodes: Vec<Node>,
    stack: Vec<usize>,
    nbuf: Vec<Coord>,
}

impl Default for DepthFirst {
    fn default() -> Self {
        Self::new()
    }
}

impl DepthFirst {
    pub fn new() -> Self {
        Self {
            rows: 0,
            cols: 0,
            visited: Vec::new(),
            generation: 0,
            visited_count: 0,
            nodes: Vec::new(),
            stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Find a path from `start` to `goal`.
    ///
    /// The search pops the most recently pushed frontier entry, drops it if
    /// already visited, otherwise marks it visited and reports it through
    /// `observer.on_visit`. On reaching `goal` it reports and returns the
    /// path. Otherwise it pushes every neighbor the pather yields that has
    /// not been visited yet. If the frontier empties it reports
    /// `on_exhausted` and returns `None`.
    ///
    /// Only neighbors are filtered by the pather: the popped coordinate is
    /// never checked itself. An obstacle `start` is therefore visited and
    /// expanded like any other cell, while an obstacle `goal` can only be
    /// reached when it equals `start`.
    ///
    /// A `start` outside the pather's bounds visits nothing and reports
    /// exhaustion.
    pub fn search<P, O>(&mut self, pather: &P, start: Coord, goal: Coord, observer: &mut O) -> Option<Path>
    where
        P: Pather,
        O: SearchObserver + ?Sized,
    {
        self.run(pather, start, goal, observer, || false)
            .unwrap_or_default()
    }

    /// Like [`search`](Self::search), but checks `ctx` once per iteration
    /// and stops with [`Cancelled`] if it has been cancelled. A cancelled run
    /// emits neither `on_path_found` nor `on_exhausted`.
    pub fn search_with<P, O>(
        &mut self,
        ctx: &Context,
        pather: &P,
        start: Coord,
        goal: Coord,
        observer: &mut O,
    ) -> Result<Option<Path>, Cancelled>
    where
        P: Pather,
        O: SearchObserver + ?Sized,
    {
        self.run(pather, start, goal, observer, || ctx.is_done())
    }

    /// Whether `p` was visited by the most recent run.
    pub fn is_visited(&self, p: Coord) -> bool {
        self.idx(p)
            .is_some_and(|i| self.generation != 0 && self.visited[i] == self.generation)
    }

    /// Number of coordinates visited by the most recent run.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Coordinates visited by the most recent run, in row-major order.
    pub fn visited(&self) -> impl Iterator<Item = Coord> + '_ {
        let cols = self.cols.max(1);
        let generation = self.generation;
        self.visited
            .iter()
            .take((self.rows * self.cols).max(0) as usize)
            .enumerate()
            .filter(move |&(_, &g)| generation != 0 && g == generation)
            .map(move |(i, _)| Coord::new(i as i32 / cols, i as i32 % cols))
    }

    #[inline]
    fn idx(&self, p: Coord) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row >= self.rows || p.col >= self.cols {
            return None;
        }
        Some((p.row * self.cols + p.col) as usize)
    }

    /// Size the buffers for `dims` and start a fresh generation.
    fn reset(&mut self, (rows, cols): (i32, i32)) {
        self.rows = rows.max(0);
        self.cols = cols.max(0);
        let len = (self.rows as usize) * (self.cols as usize);
        if self.visited.len() < len {
            self.visited.resize(len, 0);
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamps from 2^32 runs ago would otherwise look current.
            self.visited.iter_mut().for_each(|g| *g = 0);
            self.generation = 1;
        }
        self.visited_count = 0;
        self.nodes.clear();
        self.stack.clear();
    }

    fn path_to(&self, mut ni: usize) -> Path {
        let mut path = Vec::new();
        while ni != NO_PARENT {
            let node = self.nodes[ni];
            path.push(node.pos);
            ni = node.parent;
        }
        path.reverse();
        path
    }

    fn run<P, O>(
        &mut self,
        pather: &P,
        start: Coord,
        goal: Coord,
        observer: &mut O,
        cancelled: impl Fn() -> bool,
    ) -> Result<Option<Path>, Cancelled>
    where
        P: Pather,
        O: SearchObserver + ?Sized,
    {
        self.reset(pather.dims());
        let cur_gen = self.generation;
        log::debug!("dfs {} -> {} on {}x{}", start, goal, self.rows, self.cols);

        self.nodes.push(Node {
            pos: start,
            parent: NO_PARENT,
        });
        self.stack.push(0);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            if cancelled() {
                break 'search Err(Cancelled);
            }
            let Some(ni) = self.stack.pop() else {
                break 'search Ok(None);
            };

            let current = self.nodes[ni].pos;
            let Some(ci) = self.idx(current) else {
                continue;
            };
            if self.visited[ci] == cur_gen {
                continue;
            }
            self.visited[ci] = cur_gen;
            self.visited_count += 1;
            log::trace!("visit {}", current);
            observer.on_visit(current);

            if current == goal {
                break 'search Ok(Some(ni));
            }

            nbuf.clear();
            pather.neighbors(current, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(i) = self.idx(np) else {
                    continue;
                };
                if self.visited[i] == cur_gen {
                    continue;
                }
                self.nodes.push(Node {
                    pos: np,
                    parent: ni,
                });
                self.stack.push(self.nodes.len() - 1);
            }
        };

        self.nbuf = nbuf;

        match outcome {
            Ok(Some(goal_node)) => {
                let path = self.path_to(goal_node);
                log::debug!(
                    "dfs found a {}-node path after {} visits",
                    path.len(),
                    self.visited_count
                );
                observer.on_path_found(&path);
                Ok(Some(path))
            }
            Ok(None) => {
                log::debug!("dfs exhausted after {} visits", self.visited_count);
                observer.on_exhausted();
                Ok(None)
            }
            Err(Cancelled) => {
                log::debug!("dfs cancelled after {} visits", self.visited_count);
                Err(Cancelled)
            }
        }
    }
}

/// Search `grid` from its start to its goal with a fresh [`DepthFirst`].
pub fn dfs_path<O: SearchObserver + ?Sized>(grid: &Grid, observer: &mut O) -> Option<Path> {
    DepthFirst::new().search(grid, grid.start(), grid.goal(), observer)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::observer::{Recorder, SearchEvent};
    use crate::reach::reachable;
    use rampgrid_core::{CellType, GenConfig, GridGen};

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    /// Check every structural property a returned path must have.
    fn assert_valid_path(grid: &Grid, path: &[Coord]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.goal()));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} not adjacent", w[0], w[1]);
        }
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len(), "path repeats a coordinate");
        for p in &path[1..] {
            assert!(grid.is_passable(*p), "path crosses obstacle {}", p);
        }
    }

    #[test]
    fn open_grid_snakes_row_by_row() {
        let g = Grid::parse(&".....\n".repeat(5), c(0, 0), c(4, 4)).unwrap();
        let path = dfs_path(&g, &mut ()).unwrap();
        assert_valid_path(&g, &path);
        assert_eq!(path.len(), 25);
        let expected: Vec<Coord> = (0..5)
            .flat_map(|r| {
                let cols: Vec<i32> = if r % 2 == 0 {
                    (0..5).collect()
                } else {
                    (0..5).rev().collect()
                };
                cols.into_iter().map(move |col| c(r, col))
            })
            .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn routes_through_single_opening() {
        let g = Grid::parse(
            "
            ...
            #.#
            ...
            ",
            c(0, 0),
            c(2, 0),
        )
        .unwrap();
        let mut rec = Recorder::new();
        let path = dfs_path(&g, &mut rec).unwrap();
        assert_valid_path(&g, &path);
        assert!(path.contains(&c(1, 1)));
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(1, 1), c(2, 1), c(2, 0)]);
        assert_eq!(
            rec.visits(),
            vec![c(0, 0), c(0, 1), c(0, 2), c(1, 1), c(2, 1), c(2, 0)]
        );
    }

    #[test]
    fn start_equals_goal() {
        let g = Grid::parse("...\n...", c(1, 1), c(1, 1)).unwrap();
        let mut rec = Recorder::new();
        let path = dfs_path(&g, &mut rec).unwrap();
        assert_eq!(path, vec![c(1, 1)]);
        assert_eq!(
            rec.events,
            vec![
                SearchEvent::Visited(c(1, 1)),
                SearchEvent::PathFound(vec![c(1, 1)]),
            ]
        );
    }

    #[test]
    fn enclosed_goal_exhausts_reachable_region() {
        let g = Grid::parse(
            "
            .....
            .###.
            .#.#.
            .###.
            .....
            ",
            c(0, 0),
            c(2, 2),
        )
        .unwrap();
        let mut dfs = DepthFirst::new();
        let mut rec = Recorder::new();
        assert_eq!(dfs.search(&g, g.start(), g.goal(), &mut rec), None);
        assert!(rec.exhausted());
        assert_eq!(rec.path(), None);
        assert_eq!(dfs.visited_count(), 16);

        let mut region = reachable(&g, g.start());
        region.sort();
        let visited: Vec<Coord> = dfs.visited().collect();
        assert_eq!(visited, region);
        assert!(!dfs.is_visited(c(2, 2)));
    }

    #[test]
    fn obstacle_start_is_still_expanded() {
        let g = Grid::parse("#..", c(0, 0), c(0, 2)).unwrap();
        let path = dfs_path(&g, &mut ()).unwrap();
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(0, 2)]);
    }

    #[test]
    fn obstacle_goal_is_unreachable_unless_start() {
        let g = Grid::parse("..#", c(0, 0), c(0, 2)).unwrap();
        assert_eq!(dfs_path(&g, &mut ()), None);

        let g = Grid::parse("..#", c(0, 2), c(0, 2)).unwrap();
        assert_eq!(dfs_path(&g, &mut ()), Some(vec![c(0, 2)]));
    }

    #[test]
    fn fully_obstructed_grid() {
        let g = Grid::parse("###\n###\n###", c(0, 0), c(2, 2)).unwrap();
        let mut dfs = DepthFirst::new();
        let mut rec = Recorder::new();
        assert_eq!(dfs.search(&g, g.start(), g.goal(), &mut rec), None);
        assert_eq!(rec.visits(), vec![c(0, 0)]);
        assert!(rec.exhausted());
    }

    #[test]
    fn out_of_bounds_start_exhausts_immediately() {
        let g = Grid::parse("..", c(0, 0), c(0, 1)).unwrap();
        let mut rec = Recorder::new();
        let got = DepthFirst::new().search(&g, c(5, 5), g.goal(), &mut rec);
        assert_eq!(got, None);
        assert_eq!(rec.events, vec![SearchEvent::Exhausted]);
    }

    #[test]
    fn ramps_do_not_change_the_search() {
        let with_ramps = Grid::parse(
            "
            .R...
            R.#R.
            ..#..
            .R#.R
            ...R.
            ",
            c(0, 0),
            c(4, 4),
        )
        .unwrap();
        let plain = Grid::from_cells(
            5,
            5,
            with_ramps
                .iter()
                .map(|(_, t)| if t == CellType::Ramp { CellType::Open } else { t })
                .collect(),
            c(0, 0),
            c(4, 4),
        )
        .unwrap();
        let mut a = Recorder::new();
        let mut b = Recorder::new();
        dfs_path(&with_ramps, &mut a);
        dfs_path(&plain, &mut b);
        assert_eq!(a.events, b.events);
        assert!(a.path().is_some());
    }

    #[test]
    fn each_coordinate_is_visited_once() {
        for seed in 0..50 {
            let g = GridGen::new(GenConfig {
                rows: 15,
                cols: 15,
                p_obstacle: 0.25,
                seed,
                ..GenConfig::default()
            })
            .unwrap()
            .generate();
            let mut dfs = DepthFirst::new();
            let mut rec = Recorder::new();
            dfs.search(&g, g.start(), g.goal(), &mut rec);
            let visits = rec.visits();
            let unique: HashSet<_> = visits.iter().collect();
            assert_eq!(unique.len(), visits.len(), "seed {seed}");
            assert_eq!(visits.len(), dfs.visited_count());
        }
    }

    #[test]
    fn generated_grids_satisfy_search_properties() {
        for &(rows, cols) in &[(1, 1), (1, 7), (6, 1), (10, 10), (20, 20), (13, 31)] {
            for &p_obstacle in &[0.0, 0.15, 0.3, 0.45] {
                for seed in 0..25 {
                    let g = GridGen::new(GenConfig {
                        rows,
                        cols,
                        p_obstacle,
                        seed,
                        ..GenConfig::default()
                    })
                    .unwrap()
                    .generate();

                    let mut dfs = DepthFirst::new();
                    let found = dfs.search(&g, g.start(), g.goal(), &mut ());
                    let region: HashSet<Coord> = reachable(&g, g.start()).into_iter().collect();

                    for v in dfs.visited() {
                        assert!(region.contains(&v), "visited {v} outside reachable region");
                    }
                    assert_eq!(found.is_some(), region.contains(&g.goal()));
                    match &found {
                        Some(path) => assert_valid_path(&g, path),
                        None => assert_eq!(dfs.visited_count(), region.len()),
                    }

                    // Idempotent on the same engine and on a fresh one.
                    let again = dfs.search(&g, g.start(), g.goal(), &mut ());
                    assert_eq!(again, found);
                    assert_eq!(dfs_path(&g, &mut ()), found);
                }
            }
        }
    }

    #[test]
    fn reference_configuration_is_deterministic() {
        let a = GridGen::new(GenConfig::default()).unwrap().generate();
        let b = GridGen::new(GenConfig::default()).unwrap().generate();
        let mut ra = Recorder::new();
        let mut rb = Recorder::new();
        dfs_path(&a, &mut ra);
        dfs_path(&b, &mut rb);
        assert_eq!(ra.events, rb.events);
    }

    #[test]
    fn engine_reuse_across_grid_sizes() {
        let big = Grid::parse(&"........\n".repeat(8), c(0, 0), c(7, 7)).unwrap();
        let small = Grid::parse("..\n#.", c(0, 0), c(1, 1)).unwrap();
        let mut dfs = DepthFirst::new();
        let mut rec = Recorder::new();
        assert!(dfs.search(&big, big.start(), big.goal(), &mut rec).is_some());
        // Rows 0..7 are snaked in full; row 7 is entered at (7, 7).
        assert_eq!(dfs.visited_count(), 7 * 8 + 1);
        assert_eq!(dfs.visited_count(), rec.visits().len());

        let got = dfs.search(&small, small.start(), small.goal(), &mut ());
        assert_eq!(got, Some(vec![c(0, 0), c(0, 1), c(1, 1)]));
        assert_eq!(dfs.visited_count(), 3);
        assert_eq!(dfs.visited().count(), 3);
        assert!(!dfs.is_visited(c(5, 5)));

        let again = dfs.search(&big, big.start(), big.goal(), &mut ());
        assert_eq!(again, dfs_path(&big, &mut ()));
    }

    #[test]
    fn cancelled_before_start() {
        let g = Grid::parse("...\n...", c(0, 0), c(1, 2)).unwrap();
        let ctx = Context::new();
        ctx.cancel();
        let mut rec = Recorder::new();
        let got = DepthFirst::new().search_with(&ctx, &g, g.start(), g.goal(), &mut rec);
        assert_eq!(got, Err(Cancelled));
        assert!(rec.events.is_empty());
    }

    struct CancelAfter {
        ctx: Context,
        left: usize,
        seen: usize,
    }

    impl SearchObserver for CancelAfter {
        fn on_visit(&mut self, _p: Coord) {
            self.seen += 1;
            if self.seen == self.left {
                self.ctx.cancel();
            }
        }

        fn on_path_found(&mut self, _path: &[Coord]) {
            panic!("cancelled search reported a path");
        }

        fn on_exhausted(&mut self) {
            panic!("cancelled search reported exhaustion");
        }
    }

    #[test]
    fn cancelled_mid_search() {
        let g = Grid::parse(&"......\n".repeat(6), c(0, 0), c(5, 5)).unwrap();
        let ctx = Context::new();
        let mut obs = CancelAfter {
            ctx: ctx.clone(),
            left: 3,
            seen: 0,
        };
        let mut dfs = DepthFirst::new();
        let got = dfs.search_with(&ctx, &g, g.start(), g.goal(), &mut obs);
        assert_eq!(got, Err(Cancelled));
        assert_eq!(dfs.visited_count(), 3);
    }

    #[test]
    fn uncancelled_context_matches_plain_search() {
        let g = GridGen::new(GenConfig::default()).unwrap().generate();
        let ctx = Context::new();
        let mut dfs = DepthFirst::new();
        let with = dfs.search_with(&ctx, &g, g.start(), g.goal(), &mut ());
        assert_eq!(with, Ok(dfs_path(&g, &mut ())));
    }
}
