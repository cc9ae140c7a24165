//! Text and JSON reports.

use std::io::{self, Write};

use serde::Serialize;

use rampgrid_core::{Coord, Grid};

use crate::{Outcome, SearchResult};

/// Print the start, goal and grid dump.
pub fn write_grid<W: Write + ?Sized>(out: &mut W, grid: &Grid) -> io::Result<()> {
    writeln!(out, "Start node: {}", grid.start())?;
    writeln!(out, "Goal node: {}", grid.goal())?;
    writeln!(out, "Grid:")?;
    write!(out, "{grid}")
}

/// Print the search result.
pub fn write_result<W: Write + ?Sized>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    match result {
        SearchResult::Found(path) => {
            writeln!(out, "\nNumber of nodes in the path: {}", path.len())?;
            writeln!(out, "\nPath found:")?;
            for p in path {
                writeln!(out, "{p}")?;
            }
        }
        SearchResult::NotFound => writeln!(out, "\nNo path found.")?,
        SearchResult::Cancelled => writeln!(out, "\nSearch cancelled.")?,
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rows: i32,
    cols: i32,
    seed: u64,
    start: Coord,
    goal: Coord,
    grid: Vec<Vec<u8>>,
    visited: &'a [Coord],
    path: Option<&'a [Coord]>,
    cancelled: bool,
    reachable: usize,
}

/// Print the whole outcome as one pretty-printed JSON object.
pub fn write_json<W: Write + ?Sized>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    let grid = &outcome.grid;
    let report = JsonReport {
        rows: grid.rows(),
        cols: grid.cols(),
        seed: outcome.seed,
        start: grid.start(),
        goal: grid.goal(),
        grid: grid.codes(),
        visited: &outcome.visited,
        path: match &outcome.result {
            SearchResult::Found(p) => Some(p.as_slice()),
            _ => None,
        },
        cancelled: outcome.result == SearchResult::Cancelled,
        reachable: outcome.reachable,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
