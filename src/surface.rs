//! Double-buffered drawing surface.
//!
//! Two equally sized grids are kept off-screen. Drawing always targets the
//! back grid; [`Surface::present`] emits the back grid to the terminal in one
//! synchronized update and then swaps the roles of the two grids, so a
//! partially drawn frame is never shown.

use std::collections::TryReserveError;
use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate, SetTitle},
};
use log::{debug, trace};

#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    #[error("couldn't allocate a {width}x{height} display buffer")]
    Allocation {
        width: u16,
        height: u16,
        #[source]
        source: TryReserveError,
    },

    #[error("the surface must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u16, height: u16 },

    #[error("couldn't query the terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    #[error("position ({x}, {y}) is outside the {width}x{height} surface")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    #[error("the surface has already been released")]
    Released,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

pub struct Surface<W: Write> {
    out: W,
    viewport: Rectangle,
    grids: [Grid; 2],
    visible: Page,
    state: State,
}

impl Surface<BufWriter<Stdout>> {
    /// Creates a surface drawing to stdout.
    ///
    /// A missing width is taken from the terminal, one column short of the
    /// full width so the last column never wraps. A missing height is the
    /// terminal's row count.
    pub fn create(
        title: &str,
        width: Option<u16>,
        height: Option<u16>,
    ) -> Result<Self, SurfaceError> {
        let (width, height) = match (width, height) {
            (Some(width), Some(height)) => (width, height),
            (width, height) => {
                let terminal = crossterm::terminal::size().map_err(SurfaceError::TerminalSize)?;
                fit_to_terminal(width, height, terminal)
            }
        };

        Self::buffered(io::stdout(), title, width, height)
    }
}

impl<W: Write> Surface<BufWriter<W>> {
    /// Wraps `out` in a buffer large enough for a whole frame, so each
    /// `present` reaches `out` as a single write.
    pub fn buffered(out: W, title: &str, width: u16, height: u16) -> Result<Self, SurfaceError> {
        let out = BufWriter::with_capacity(frame_capacity(width, height), out);
        Self::with_writer(out, title, width, height)
    }
}

/// Fills in the dimensions the caller left open from the terminal's
/// `(columns, rows)`.
fn fit_to_terminal(
    width: Option<u16>,
    height: Option<u16>,
    (columns, rows): (u16, u16),
) -> (u16, u16) {
    (
        width.unwrap_or(columns.saturating_sub(1)),
        height.unwrap_or(rows),
    )
}

// Worst case per cell: a 4-byte glyph behind a colour change. Each row adds
// a cursor move, the frame a synchronized-update pair.
fn frame_capacity(width: u16, height: u16) -> usize {
    const CELL: usize = 4 + 20;
    const ROW: usize = 16;
    const FRAME: usize = 64;

    width as usize * height as usize * CELL + height as usize * ROW + FRAME
}

impl<W: Write> Surface<W> {
    pub fn with_writer(
        mut out: W,
        title: &str,
        width: u16,
        height: u16,
    ) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptyViewport { width, height });
        }

        let viewport = Rectangle::from((width, height));
        let grids = [Grid::allocate(&viewport)?, Grid::allocate(&viewport)?];

        queue!(out, SetTitle(title), Hide)?;
        out.flush()?;

        debug!("created a {width}x{height} surface titled {title:?}");

        Ok(Self {
            out,
            viewport,
            grids,
            visible: Page::First,
            state: State::Ready,
        })
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.viewport.width, self.viewport.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.viewport.contains(Position(x, y))
    }

    /// Fills the whole back grid. The visible grid is untouched.
    pub fn clear(&mut self, glyph: char, style: Style) -> Result<(), SurfaceError> {
        self.ensure_ready()?;
        self.back_mut().fill(Cell { glyph, style });
        Ok(())
    }

    /// Sets one cell of the back grid.
    ///
    /// Positions outside the viewport are rejected with
    /// [`SurfaceError::OutOfBounds`] and leave the grid unchanged.
    pub fn write(&mut self, x: u16, y: u16, glyph: char, style: Style) -> Result<(), SurfaceError> {
        self.ensure_ready()?;

        let position = Position(x, y);
        if !self.viewport.contains(position) {
            trace!("clipped write at ({x}, {y})");
            let (width, height) = self.dimensions();
            return Err(SurfaceError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let index = self.viewport.offset(position);
        self.back_mut().cells[index] = Cell { glyph, style };
        Ok(())
    }

    /// Emits the back grid and makes it the visible one.
    ///
    /// The grid that was visible becomes the new back grid and keeps its
    /// stale contents until the next `clear` or `write`.
    pub fn present(&mut self) -> Result<(), SurfaceError> {
        self.ensure_ready()?;

        let back = self.visible.other();
        let grid = &self.grids[back.index()];
        let Rectangle {
            x: left,
            y: top,
            width,
            height,
        } = self.viewport;

        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut current_style = None;
        let mut cells = grid.cells.iter();
        for y in 0..height {
            queue!(self.out, MoveTo(left, top + y))?;
            for cell in cells.by_ref().take(width as usize) {
                if current_style != Some(cell.style) {
                    queue!(self.out, SetForegroundColor(cell.style.color()))?;
                    current_style = Some(cell.style);
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.visible = back;
        Ok(())
    }

    /// Restores the cursor and colours. Safe to call any number of times.
    pub fn release(&mut self) -> Result<(), SurfaceError> {
        if self.state == State::Released {
            return Ok(());
        }
        self.state = State::Released;

        queue!(self.out, ResetColor, Show)?;
        self.out.flush()?;

        debug!("released the surface");
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.state == State::Released
    }

    pub fn visible_cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.grids[self.visible.index()].get(&self.viewport, Position(x, y))
    }

    pub fn back_cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.grids[self.visible.other().index()].get(&self.viewport, Position(x, y))
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn back_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.visible.other().index()]
    }

    fn ensure_ready(&self) -> Result<(), SurfaceError> {
        match self.state {
            State::Ready => Ok(()),
            State::Released => Err(SurfaceError::Released),
        }
    }
}

impl<W: Write> Drop for Surface<W> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Ready,
    Released,
}

/// Which of the two grids is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    First,
    Second,
}

impl Page {
    fn other(self) -> Self {
        match self {
            Page::First => Page::Second,
            Page::Second => Page::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Page::First => 0,
            Page::Second => 1,
        }
    }
}

struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    fn allocate(rect: &Rectangle) -> Result<Self, SurfaceError> {
        let len = rect.width as usize * rect.height as usize;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|source| SurfaceError::Allocation {
                width: rect.width,
                height: rect.height,
                source,
            })?;
        cells.resize(len, Cell::empty());

        Ok(Self { cells })
    }

    fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    fn get(&self, rect: &Rectangle, position: Position) -> Option<Cell> {
        rect.contains(position)
            .then(|| self.cells[rect.offset(position)])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Position(u16, u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub style: Style,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            glyph: ' ',
            style: Style::default(),
        }
    }
}

/// Foreground colour plus an intensity flag, like a console text attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub hue: Hue,
    pub intense: bool,
}

impl Style {
    pub const fn new(hue: Hue, intense: bool) -> Self {
        Self { hue, intense }
    }

    fn color(self) -> Color {
        match (self.hue, self.intense) {
            (Hue::Black, false) => Color::Black,
            (Hue::Black, true) => Color::DarkGrey,
            (Hue::Blue, false) => Color::DarkBlue,
            (Hue::Blue, true) => Color::Blue,
            (Hue::Green, false) => Color::DarkGreen,
            (Hue::Green, true) => Color::Green,
            (Hue::Cyan, false) => Color::DarkCyan,
            (Hue::Cyan, true) => Color::Cyan,
            (Hue::Red, false) => Color::DarkRed,
            (Hue::Red, true) => Color::Red,
            (Hue::Magenta, false) => Color::DarkMagenta,
            (Hue::Magenta, true) => Color::Magenta,
            (Hue::Yellow, false) => Color::DarkYellow,
            (Hue::Yellow, true) => Color::Yellow,
            (Hue::White, false) => Color::Grey,
            (Hue::White, true) => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hue {
    #[default]
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rectangle {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

impl Rectangle {
    fn left(&self) -> u16 {
        self.x
    }

    fn right(&self) -> u16 {
        self.x + self.width.saturating_sub(1)
    }

    fn top(&self) -> u16 {
        self.y
    }

    fn bottom(&self) -> u16 {
        self.y + self.height.saturating_sub(1)
    }

    fn contains(&self, Position(x, y): Position) -> bool {
        self.left() <= x && x <= self.right() && self.top() <= y && y <= self.bottom()
    }

    fn offset(&self, Position(x, y): Position) -> usize {
        (y - self.y) as usize * self.width as usize + (x - self.x) as usize
    }
}

impl From<(u16, u16)> for Rectangle {
    fn from((width, height): (u16, u16)) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}
