//! rampgrid: build a random grid, search it depth-first and report the path.

pub mod config;
pub mod report;

use std::io::{self, Write};

use anyhow::Context as _;

use rampgrid_core::{Coord, Grid, GridGen};
use rampgrid_crossterm::{TermObserver, TerminalGuard};
use rampgrid_search::{Cancelled, Context, DepthFirst, Path, Recorder, reachable};

use config::{Format, RunConfig};

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found(Path),
    NotFound,
    /// The animation was interrupted from the keyboard.
    Cancelled,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub grid: Grid,
    pub seed: u64,
    pub result: SearchResult,
    /// Coordinates in visit order.
    pub visited: Vec<Coord>,
    /// Number of cells connected to the start.
    pub reachable: usize,
}

/// Generate the grid described by `config`, search it, and write the report
/// to `out`.
///
/// In text mode the grid is printed before the search starts. When
/// `config.render` is set the search is animated on the terminal's
/// alternate screen; `out` is expected to be stdout in that case.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> anyhow::Result<Outcome> {
    let grid = GridGen::new(config.grid.clone())
        .context("invalid grid configuration")?
        .generate();
    log::info!(
        "searching {}x{} grid from {} to {}",
        grid.rows(),
        grid.cols(),
        grid.start(),
        grid.goal()
    );

    if config.format == Format::Text {
        report::write_grid(out, &grid)?;
    }
    out.flush()?;

    let mut recorder = Recorder::new();
    let found = if config.render {
        search_animated(config, &grid, &mut recorder)?
    } else {
        DepthFirst::new()
            .search_with(&Context::new(), &grid, grid.start(), grid.goal(), &mut recorder)
    };

    let result = match found {
        Ok(Some(path)) => SearchResult::Found(path),
        Ok(None) => SearchResult::NotFound,
        Err(Cancelled) => SearchResult::Cancelled,
    };
    let outcome = Outcome {
        reachable: reachable(&grid, grid.start()).len(),
        visited: recorder.visits(),
        seed: config.grid.seed,
        result,
        grid,
    };

    match config.format {
        Format::Text => report::write_result(out, &outcome.result)?,
        Format::Json => report::write_json(out, &outcome)?,
    }
    out.flush()?;
    Ok(outcome)
}

fn search_animated(
    config: &RunConfig,
    grid: &Grid,
    recorder: &mut Recorder,
) -> anyhow::Result<Result<Option<Path>, Cancelled>> {
    let guard = TerminalGuard::enter().context("failed to set up the terminal")?;
    let ctx = Context::new();
    let mut term = TermObserver::new(grid, io::stdout(), config.pacing)
        .with_cancel(ctx.clone())
        .with_exit_prompt(config.wait);
    term.draw_grid();

    let found = DepthFirst::new().search_with(
        &ctx,
        grid,
        grid.start(),
        grid.goal(),
        &mut (&mut term, &mut *recorder),
    );

    if let Err(e) = term.finish() {
        log::warn!("animation incomplete: {e}");
    }
    if config.wait && found.is_ok() {
        guard.wait_for_key().context("failed to read the keyboard")?;
    }
    drop(guard);
    Ok(found)
}
