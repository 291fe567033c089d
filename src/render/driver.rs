//! Crossterm terminal output backend.
//!
//! The `Driver` owns a buffered stdout writer and the last frame it flushed.
//! Each call to [`Driver::present`] diffs the new [`CellCanvas`] against that
//! frame and writes only the changed cells.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::cells::{CellCanvas, CellUpdate};
use super::color::Color;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// The driver does NOT enter the alternate screen on creation; call
/// [`enter`](Self::enter) explicitly and [`leave`](Self::leave) on the way out.
pub struct Driver {
    writer: BufWriter<Stdout>,
    previous: Option<CellCanvas>,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
            previous: None,
        })
    }

    /// Enter the alternate screen, enable raw mode and mouse capture, hide the cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide
        )?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    /// Undo everything [`enter`](Self::enter) did.
    pub fn leave(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.writer,
            cursor::Show,
            event::DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    /// Set the terminal window title.
    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.writer, terminal::SetTitle(title))
    }

    /// Write the cells of `frame` that changed since the last present, then flush.
    pub fn present(&mut self, frame: &CellCanvas) -> io::Result<()> {
        let updates = match &self.previous {
            Some(previous) => frame.diff(previous),
            None => frame.diff(&CellCanvas::new(0, 0)),
        };
        self.apply_updates(&updates)?;
        self.writer.flush()?;
        self.previous = Some(frame.clone());
        Ok(())
    }

    /// Forget the last frame so the next present rewrites every cell.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Queue one move/colour/print sequence per update.
    fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            if let Some(fg) = update.cell.fg {
                queue!(self.writer, SetForegroundColor(to_terminal(fg)))?;
            }
            if let Some(bg) = update.cell.bg {
                queue!(self.writer, SetBackgroundColor(to_terminal(bg)))?;
            }
            queue!(self.writer, Print(update.cell.ch), ResetColor)?;
        }
        Ok(())
    }
}

/// Convert an engine colour into a crossterm truecolour.
pub fn to_terminal(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
