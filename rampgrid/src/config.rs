//! Command-line configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use rampgrid_core::Coord;
use rampgrid_core::GenConfig;
use rampgrid_core::mapgen::{DEFAULT_P_OBSTACLE, DEFAULT_P_RAMP, DEFAULT_SEED};
use rampgrid_crossterm::Pacing;

/// Output format for the final report.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Human-readable grid dump and path listing.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Animated depth-first search over a random grid with obstacles and ramps.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub rows: i32,

    /// Number of grid columns
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub cols: i32,

    /// Probability that a cell is an obstacle
    #[arg(long, default_value_t = DEFAULT_P_OBSTACLE, allow_negative_numbers = true)]
    pub obstacle_prob: f64,

    /// Probability that a non-obstacle cell is a ramp
    #[arg(long, default_value_t = DEFAULT_P_RAMP, allow_negative_numbers = true)]
    pub ramp_prob: f64,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Start cell, overriding the default (5, 5)
    #[arg(long, value_name = "ROW,COL")]
    pub start: Option<Coord>,

    /// Goal cell, overriding the default bottom-right corner
    #[arg(long, value_name = "ROW,COL")]
    pub goal: Option<Coord>,

    /// Pause after each visited cell, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub visit_delay_ms: u64,

    /// Pause after each path cell, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub path_delay_ms: u64,

    /// Do not animate on the terminal
    #[arg(long)]
    pub headless: bool,

    /// Exit as soon as the animation ends instead of waiting for a key
    #[arg(long)]
    pub no_wait: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Everything [`run`](crate::run) needs, resolved from [`Args`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub grid: GenConfig,
    pub pacing: Pacing,
    /// Animate on the terminal.
    pub render: bool,
    /// Wait for a key after the animation.
    pub wait: bool,
    pub format: Format,
}

impl Args {
    /// Resolve into a [`RunConfig`]. Rendering is turned off when
    /// `stdout_is_tty` is false, whatever `--headless` says.
    pub fn into_config(self, stdout_is_tty: bool) -> RunConfig {
        let render = stdout_is_tty && !self.headless;
        RunConfig {
            grid: GenConfig {
                rows: self.rows,
                cols: self.cols,
                p_obstacle: self.obstacle_prob,
                p_ramp: self.ramp_prob,
                seed: self.seed,
                start: self.start,
                goal: self.goal,
            },
            pacing: Pacing {
                visit: Duration::from_millis(self.visit_delay_ms),
                path: Duration::from_millis(self.path_delay_ms),
            },
            render,
            wait: render && !self.no_wait,
            format: self.format,
        }
    }
}
