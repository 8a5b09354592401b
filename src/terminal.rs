//! Terminal abstraction using crossterm
//!
//! Owns raw mode and the alternate screen for the lifetime of the value.
//! Drawing calls are queued and only reach the screen on [`Terminal::flush`].

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};

use crate::error::Result;

/// Raw-mode terminal session on stdout
pub struct Terminal {
    out: Stdout,
    cols: u16,
    rows: u16,
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { out, cols, rows })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Clear the whole screen
    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from the cursor to the end of its row
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(self.out, terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move the cursor (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.out, cursor::MoveTo(col, row))?;
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Switch a text attribute on (`Attribute::Reset` clears them all)
    pub fn set_attribute(&mut self, attr: Attribute) -> Result<()> {
        queue!(self.out, SetAttribute(attr))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Block until a key is pressed. Releases and repeats are skipped;
    /// resizes update the cached size.
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                }
                _ => {}
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
