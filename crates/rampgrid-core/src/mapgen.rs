//! Seeded random grid generation.
//!
//! Generation runs in two passes over the cells in row-major order, drawing
//! from one generator that advances monotonically across both:
//!
//! 1. every cell becomes an obstacle with probability `p_obstacle`;
//! 2. every cell that is not an obstacle becomes a ramp with probability
//!    `p_ramp` (obstacles consume no draw).
//!
//! The same seed and dimensions always give the same grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::CellType;
use crate::error::{GridError, GridResult};
use crate::geom::Coord;
use crate::grid::{Grid, check_dims, check_endpoint};

/// Default obstacle probability.
pub const DEFAULT_P_OBSTACLE: f64 = 0.15;
/// Default ramp probability.
pub const DEFAULT_P_RAMP: f64 = 0.10;
/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for [`GridGen`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    pub rows: i32,
    pub cols: i32,
    pub p_obstacle: f64,
    pub p_ramp: f64,
    pub seed: u64,
    /// Overrides [`default_endpoints`]'s start when set.
    pub start: Option<Coord>,
    /// Overrides [`default_endpoints`]'s goal when set.
    pub goal: Option<Coord>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            p_obstacle: DEFAULT_P_OBSTACLE,
            p_ramp: DEFAULT_P_RAMP,
            seed: DEFAULT_SEED,
            start: None,
            goal: None,
        }
    }
}

/// The fixed start and goal for a `rows x cols` grid: start at (5, 5)
/// clamped into the grid, goal at the bottom-right corner.
///
/// For the default 20x20 grid this is (5, 5) and (19, 19).
pub fn default_endpoints(rows: i32, cols: i32) -> (Coord, Coord) {
    let start = Coord::new(5_i32.min(rows - 1), 5_i32.min(cols - 1));
    let goal = Coord::new(rows - 1, cols - 1);
    (start, goal)
}

fn check_probability(name: &'static str, value: f64) -> GridResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GridError::InvalidProbability { name, value });
    }
    Ok(())
}

impl GenConfig {
    /// Check dimensions, probabilities and endpoints, returning the resolved
    /// `(start, goal)`.
    pub fn validate(&self) -> GridResult<(Coord, Coord)> {
        check_dims(self.rows, self.cols)?;
        check_probability("p_obstacle", self.p_obstacle)?;
        check_probability("p_ramp", self.p_ramp)?;
        let (def_start, def_goal) = default_endpoints(self.rows, self.cols);
        let start = self.start.unwrap_or(def_start);
        let goal = self.goal.unwrap_or(def_goal);
        check_endpoint("start", start, self.rows, self.cols)?;
        check_endpoint("goal", goal, self.rows, self.cols)?;
        Ok((start, goal))
    }
}

/// Grid generator driven by a random source `R`.
pub struct GridGen<R: Rng = StdRng> {
    pub rng: R,
    config: GenConfig,
    start: Coord,
    goal: Coord,
}

impl GridGen<StdRng> {
    /// Validate `config` and seed a [`StdRng`] from `config.seed`.
    pub fn new(config: GenConfig) -> GridResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GridGen<R> {
    /// Validate `config` and generate from `rng` instead of the seed.
    pub fn with_rng(config: GenConfig, rng: R) -> GridResult<Self> {
        let (start, goal) = config.validate()?;
        Ok(Self {
            rng,
            config,
            start,
            goal,
        })
    }

    /// Generate a grid.
    ///
    /// Each call advances the generator, so calling it twice on the same
    /// `GridGen` yields two different grids; build a fresh `GridGen` from
    /// the same seed to reproduce one.
    pub fn generate(&mut self) -> Grid {
        let GenConfig {
            rows,
            cols,
            p_obstacle,
            p_ramp,
            ..
        } = self.config;
        let len = (rows as usize) * (cols as usize);

        let mut cells: Vec<CellType> = (0..len)
            .map(|_| {
                let r: f64 = self.rng.random();
                if r < p_obstacle {
                    CellType::Obstacle
                } else {
                    CellType::Open
                }
            })
            .collect();

        for cell in cells.iter_mut().filter(|c| **c == CellType::Open) {
            let r: f64 = self.rng.random();
            if r < p_ramp {
                *cell = CellType::Ramp;
            }
        }

        let grid = Grid::from_parts(rows, cols, cells, self.start, self.goal);
        log::debug!(
            "generated {}x{} grid (seed {}): {} obstacles, {} ramps",
            rows,
            cols,
            self.config.seed,
            grid.count(CellType::Obstacle),
            grid.count(CellType::Ramp),
        );
        for (name, p) in [("start", grid.start()), ("goal", grid.goal())] {
            if grid.at(p) == Some(CellType::Obstacle) {
                log::warn!("{} {} is an obstacle", name, p);
            }
        }
        grid
    }
}
