use crate::{Coords, TermInt};
use crate::entity::Surface;
use crate::input::InputEvent;
use std::{io::{self, Stdout, Write, stdout}, time::Instant};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Color, Colors};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_COLS: TermInt = 2;
/// Rows above the grid reserved for the status line.
const STATUS_ROWS: TermInt = 1;

const TEXT_COLORS: Colors = Colors { foreground: Some(Color::Black), background: Some(Color::White) };

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    grid: (i32, i32),
    frame: Vec<Color>,
    screen: Vec<Option<Color>>, // what is actually on the terminal, None = unknown
    current_msg: Option<Banner>,
}

struct Banner {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            grid: (0, 0),
            frame: vec![],
            screen: vec![],
            current_msg: None,
        })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn get_terminal_size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    /// Largest grid that fits below the status line.
    pub fn grid_capacity(&self) -> (i32, i32) {
        ((self.width / CELL_COLS) as i32, self.height.saturating_sub(STATUS_ROWS) as i32)
    }

    pub fn set_grid(&mut self, width: i32, height: i32) {
        let cells = (width * height) as usize;
        self.grid = (width, height);
        self.frame = vec![Color::Reset; cells];
        self.screen = vec![None; cells];
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(ev);
                }
            }
        }
    }

    /// Collects input until `deadline`, which paces the frames.
    pub fn read_events_until(&self, deadline: Instant) -> io::Result<Vec<InputEvent>> {
        let mut events = vec![];

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(events);
            }

            if poll(deadline - now)? {
                if let Event::Key(ev) = read()? {
                    events.extend(InputEvent::from_key(&ev));
                }
            }
        }
    }

    /// Writes every grid cell that changed since the last call.
    pub fn present(&mut self) -> io::Result<()> {
        let (w, h) = self.grid;

        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) as usize;
                let color = self.frame[i];
                if self.screen[i] == Some(color) || self.is_covered((x, y)) {
                    continue;
                }

                let (col, row) = to_term((x, y));
                queue!(self.stdout, cursor::MoveTo(col, row), style::SetBackgroundColor(color), style::Print("  "))?;
                self.screen[i] = Some(color);
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn print_status(&mut self, text: &str) -> io::Result<()> {
        let line = format!("{text: <width$}", text = text, width = self.width as usize);
        queue!(self.stdout, cursor::MoveTo(0, 0), style::SetColors(TEXT_COLORS), style::Print(line), style::ResetColor)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, (self.height + STATUS_ROWS) / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2).max(STATUS_ROWS),
        );

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::SetColors(TEXT_COLORS), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::SetColors(TEXT_COLORS), style::Print(padded_line))?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.current_msg = Some(Banner { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Forgets what was under the banner so the next `present` redraws it.
    pub fn hide_message(&mut self) -> io::Result<()> {
        let Some(msg) = self.current_msg.take() else {
            return Ok(());
        };

        let (w, h) = self.grid;
        for y in 0..h {
            for x in 0..w {
                if msg.covers(to_term((x, y))) {
                    self.screen[(y * w + x) as usize] = None;
                }
            }
        }

        self.present()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.current_msg = None;
        self.screen.iter_mut().for_each(|cell| *cell = None);
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn is_covered(&self, pos: Coords) -> bool {
        self.current_msg.as_ref().map_or(false, |msg| msg.covers(to_term(pos)))
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        let (w, h) = self.grid;
        if pos.0 < 0 || pos.1 < 0 || pos.0 >= w || pos.1 >= h {
            return None;
        }
        Some((pos.1 * w + pos.0) as usize)
    }
}

impl Surface for TermManager {
    fn fill(&mut self, color: Color) {
        self.frame.iter_mut().for_each(|cell| *cell = color);
    }

    // Cells off the grid (a snake stepping through the wall) are dropped
    fn set_cell(&mut self, pos: Coords, color: Color) {
        if let Some(i) = self.index(pos) {
            self.frame[i] = color;
        }
    }
}

impl Banner {
    fn covers(&self, (col, row): (TermInt, TermInt)) -> bool {
        // A cell is two columns wide; either half counts
        let (left, top) = self.top_left;
        col + CELL_COLS > left && col < left + self.width && row >= top && row < top + self.height
    }
}

fn to_term(pos: Coords) -> (TermInt, TermInt) {
    (pos.0 as TermInt * CELL_COLS, pos.1 as TermInt + STATUS_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_terminal_coords() {
        assert_eq!(to_term((0, 0)), (0, 1));
        assert_eq!(to_term((3, 4)), (6, 5));
    }

    #[test]
    fn test_banner_coverage() {
        let banner = Banner { top_left: (5, 3), width: 6, height: 2 };

        // Cell at col 4 spans cols 4..6, touching the banner's first column
        assert!(banner.covers((4, 3)));
        assert!(banner.covers((10, 4)));
        assert!(!banner.covers((2, 3)));
        assert!(!banner.covers((11, 3)));
        assert!(!banner.covers((6, 5)));
    }
}
