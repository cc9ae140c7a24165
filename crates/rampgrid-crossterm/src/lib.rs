//! Crossterm renderer for rampgrid searches.
//!
//! [`TermObserver`] implements [`SearchObserver`]: it draws the grid once,
//! then paints each visited cell and finally the path, pausing between
//! steps so the search can be watched. [`TerminalGuard`] owns the terminal
//! state (alternate screen, raw mode) and restores it on drop.
//!
//! Terminal I/O errors never reach the search: the first one is kept and
//! logged, drawing stops, and [`TermObserver::finish`] reports it.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use rampgrid_core::{CellType, Coord, Grid};
use rampgrid_search::{Context, SearchObserver};

// Colours
/// Open cells keep the terminal's default background.
pub const COL_OPEN: Color = Color::Reset;
pub const COL_OBSTACLE: Color = Color::Rgb { r: 0, g: 0, b: 0 };
pub const COL_RAMP: Color = Color::Rgb { r: 255, g: 165, b: 0 };
pub const COL_START: Color = Color::Rgb { r: 0, g: 128, b: 0 };
pub const COL_GOAL: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const COL_VISITED: Color = Color::Rgb { r: 173, g: 216, b: 230 };
pub const COL_VISITED_RAMP: Color = Color::Rgb { r: 160, g: 82, b: 45 };
pub const COL_PATH: Color = Color::Rgb { r: 255, g: 255, b: 0 };
pub const COL_PATH_RAMP: Color = Color::Rgb { r: 218, g: 165, b: 32 };
const COL_TEXT: Color = Color::Rgb { r: 200, g: 200, b: 200 };

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

/// How far along a cell is in the animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    /// As generated.
    Base,
    /// Popped and visited by the search.
    Visited,
    /// Part of the found path.
    Path,
}

/// Background colour for a cell of type `kind` in state `mark`.
///
/// Obstacles are never visited or on a path, so they keep their colour.
pub fn cell_color(kind: CellType, mark: Mark) -> Color {
    match (kind, mark) {
        (CellType::Obstacle, _) => COL_OBSTACLE,
        (CellType::Open, Mark::Base) => COL_OPEN,
        (CellType::Ramp, Mark::Base) => COL_RAMP,
        (CellType::Open, Mark::Visited) => COL_VISITED,
        (CellType::Ramp, Mark::Visited) => COL_VISITED_RAMP,
        (CellType::Open, Mark::Path) => COL_PATH,
        (CellType::Ramp, Mark::Path) => COL_PATH_RAMP,
    }
}

/// Delays applied after each animation step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub visit: Duration,
    pub path: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            visit: Duration::from_millis(50),
            path: Duration::from_millis(100),
        }
    }
}

impl Pacing {
    /// No delays at all.
    pub const NONE: Self = Self {
        visit: Duration::ZERO,
        path: Duration::ZERO,
    };
}

fn to_u16(v: i32) -> u16 {
    u16::try_from(v.max(0)).unwrap_or(u16::MAX)
}

/// A [`SearchObserver`] that animates the search on a terminal.
pub struct TermObserver<'g, W: Write> {
    grid: &'g Grid,
    out: W,
    pacing: Pacing,
    cancel: Option<Context>,
    exit_prompt: bool,
    error: Option<io::Error>,
}

impl<'g, W: Write> TermObserver<'g, W> {
    /// Create an observer drawing `grid` into `out`.
    pub fn new(grid: &'g Grid, out: W, pacing: Pacing) -> Self {
        Self {
            grid,
            out,
            pacing,
            cancel: None,
            exit_prompt: false,
            error: None,
        }
    }

    /// While pausing, read the keyboard and cancel `ctx` on Esc, `q` or
    /// Ctrl-C. Only use this when attached to a real terminal in raw mode.
    pub fn with_cancel(mut self, ctx: Context) -> Self {
        self.cancel = Some(ctx);
        self
    }

    /// Append "Press any key to exit." to the final status line.
    pub fn with_exit_prompt(mut self, on: bool) -> Self {
        self.exit_prompt = on;
        self
    }

    fn final_status(&mut self, msg: &str) {
        if self.exit_prompt {
            self.status(&format!("{msg} Press any key to exit."));
        } else {
            self.status(msg);
        }
    }

    /// Draw every cell, the start and goal, and the legend.
    pub fn draw_grid(&mut self) {
        let res = self.try_draw_grid();
        self.record(res);
    }

    fn try_draw_grid(&mut self) -> io::Result<()> {
        let grid = self.grid;
        queue!(self.out, terminal::Clear(ClearType::All))?;
        for (p, kind) in grid.iter() {
            self.queue_cell(p, cell_color(kind, Mark::Base))?;
        }
        self.queue_cell(grid.start(), COL_START)?;
        self.queue_cell(grid.goal(), COL_GOAL)?;

        let legend: [(Color, &str); 7] = [
            (COL_START, "start"),
            (COL_GOAL, "goal"),
            (COL_OBSTACLE, "obstacle"),
            (COL_RAMP, "ramp"),
            (COL_VISITED, "visited"),
            (COL_VISITED_RAMP, "visited ramp"),
            (COL_PATH, "path"),
        ];
        queue!(self.out, cursor::MoveTo(0, to_u16(grid.rows() + 1)))?;
        for (color, label) in legend {
            queue!(
                self.out,
                SetBackgroundColor(color),
                Print("  "),
                ResetColor,
                SetForegroundColor(COL_TEXT),
                Print(format!(" {label}  ")),
                ResetColor
            )?;
        }
        self.out.flush()
    }

    /// Write `msg` on the status line under the legend.
    pub fn status(&mut self, msg: &str) {
        let row = to_u16(self.grid.rows() + 2);
        let res = (|| {
            queue!(
                self.out,
                cursor::MoveTo(0, row),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(COL_TEXT),
                Print(msg),
                ResetColor
            )?;
            self.out.flush()
        })();
        self.record(res);
    }

    /// Move the cursor below the drawing and report the first I/O error
    /// seen, if any.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.error.is_none() {
            let row = to_u16(self.grid.rows() + 3);
            let res = queue!(self.out, cursor::MoveTo(0, row)).and_then(|_| self.out.flush());
            self.record(res);
        }
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn queue_cell(&mut self, p: Coord, color: Color) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(to_u16(p.col).saturating_mul(CELL_WIDTH), to_u16(p.row)),
            SetBackgroundColor(color),
            Print("  "),
            ResetColor
        )
    }

    /// Recolour one cell, unless it is the start or goal.
    fn paint(&mut self, p: Coord, mark: Mark) -> io::Result<bool> {
        if p == self.grid.start() || p == self.grid.goal() {
            return Ok(false);
        }
        let Some(kind) = self.grid.at(p) else {
            return Ok(false);
        };
        self.queue_cell(p, cell_color(kind, mark))?;
        self.out.flush()?;
        Ok(true)
    }

    /// Keep the first error and stop drawing.
    fn record(&mut self, res: io::Result<()>) {
        if let Err(e) = res {
            if self.error.is_none() {
                log::warn!("terminal rendering failed, disabling animation: {e}");
                self.error = Some(e);
            }
        }
    }

    fn pause(&mut self, d: Duration) {
        match self.cancel.clone() {
            Some(ctx) => {
                let res = wait_or_cancel(&ctx, d);
                self.record(res);
            }
            None if !d.is_zero() => thread::sleep(d),
            None => {}
        }
    }
}

/// Wait up to `d`, cancelling `ctx` if Esc, `q` or Ctrl-C is pressed.
fn wait_or_cancel(ctx: &Context, d: Duration) -> io::Result<()> {
    let deadline = Instant::now() + d;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if !event::poll(left)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if is_quit(&key) {
                log::info!("animation interrupted from keyboard");
                ctx.cancel();
                return Ok(());
            }
        }
        if left.is_zero() {
            return Ok(());
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl<W: Write> SearchObserver for TermObserver<'_, W> {
    fn on_visit(&mut self, p: Coord) {
        if self.error.is_some() {
            return;
        }
        match self.paint(p, Mark::Visited) {
            Ok(true) => self.pause(self.pacing.visit),
            Ok(false) => {}
            Err(e) => self.record(Err(e)),
        }
    }

    fn on_path_found(&mut self, path: &[Coord]) {
        for &p in path {
            if self.error.is_some() {
                return;
            }
            match self.paint(p, Mark::Path) {
                Ok(true) => self.pause(self.pacing.path),
                Ok(false) => {}
                Err(e) => self.record(Err(e)),
            }
        }
        self.final_status(&format!("Path found: {} nodes.", path.len()));
    }

    fn on_exhausted(&mut self) {
        if self.error.is_none() {
            self.final_status("No path found.");
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal session
// ---------------------------------------------------------------------------

/// Puts stdout into raw mode on the alternate screen with the cursor hidden,
/// and restores it when dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }

    /// Block until a key is pressed.
    pub fn wait_for_key(&self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
