//! **rampgrid-core**: the grid model used by the rampgrid search.
//!
//! This crate provides coordinates, cell types, the immutable [`Grid`] with
//! its fixed start and goal, and a seeded [`GridGen`] that scatters obstacles
//! and ramps over a grid reproducibly.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod mapgen;

pub use cell::CellType;
pub use error::{GridError, GridResult, ParseCoordError};
pub use geom::Coord;
pub use grid::Grid;
pub use mapgen::{GenConfig, GridGen, default_endpoints};
