use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};

use crate::constants::{DEFAULT_DIMENSIONS, Dimensions};
use crate::sprites::{self, Sheet};

/// Rectangle in sheet or playfield coordinates (cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// 2D drawing surface the environment draws onto.
///
/// `src` addresses a region of the given sprite sheet, `dst` a region of the
/// logical playfield. Implementations may scale between the two; the terminal
/// renderer copies 1:1. An `opacity` of 0 draws nothing; fractional values
/// may be approximated (the terminal renderer dims the color).
pub trait Surface {
    fn blit(&mut self, sheet: Sheet, src: Rect, dst: Rect, opacity: f64) -> io::Result<()>;
}

/// Surface that discards every draw call. Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct NoopSurface;

impl Surface for NoopSurface {
    fn blit(&mut self, _sheet: Sheet, _src: Rect, _dst: Rect, _opacity: f64) -> io::Result<()> {
        Ok(())
    }
}

/// Crossterm-backed renderer. Centers the logical playfield in the terminal
/// and clips anything that falls outside either.
pub struct TerminalRenderer {
    stdout: Stdout,
    width: u16,
    height: u16,
    origin: (u16, u16),
    base_sheet: Vec<Vec<u8>>,
    alt_sheet: Vec<Vec<u8>>,
}

impl TerminalRenderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut renderer = Self {
            stdout: io::stdout(),
            width,
            height,
            origin: (0, 0),
            base_sheet: sprites::sheet_grid(Sheet::Base),
            alt_sheet: sprites::sheet_grid(Sheet::Alt),
        };
        renderer.recenter();
        Ok(renderer)
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    pub fn get_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn manual_resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.width = width;
        self.height = height;
        self.recenter();
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))
    }

    /// Playfield size the environment should use: the default arena, clipped
    /// to what the terminal can actually show.
    pub fn arena(&self) -> Dimensions {
        Dimensions {
            width: DEFAULT_DIMENSIONS.width.min(self.width as i32),
            height: DEFAULT_DIMENSIONS.height.min(self.height.saturating_sub(2) as i32),
        }
    }

    fn recenter(&mut self) {
        let arena = self.arena();
        let x = (self.width as i32 - arena.width).max(0) / 2;
        // Leave the top rows for the HUD line.
        let y = ((self.height as i32 - arena.height).max(0) / 2).max(2);
        self.origin = (x as u16, y as u16);
    }

    pub fn render_char(&mut self, x: u16, y: u16, ch: char, color: Color) -> io::Result<()> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetForegroundColor(color),
            Print(ch)
        )
    }

    pub fn render_line_colored(
        &mut self,
        x: u16,
        y: u16,
        line: &str,
        color: Color,
    ) -> io::Result<()> {
        if y >= self.height {
            return Ok(());
        }
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetForegroundColor(color),
            Print(line)
        )
    }

    fn sheet_rows(&self, sheet: Sheet) -> &[Vec<u8>] {
        match sheet {
            Sheet::Base => &self.base_sheet,
            Sheet::Alt => &self.alt_sheet,
        }
    }

    fn color_for(opacity: f64) -> Color {
        if opacity >= 0.95 {
            Color::White
        } else if opacity >= 0.5 {
            Color::Grey
        } else {
            Color::DarkGrey
        }
    }
}

impl Surface for TerminalRenderer {
    fn blit(&mut self, sheet: Sheet, src: Rect, dst: Rect, opacity: f64) -> io::Result<()> {
        if opacity <= 0.0 {
            return Ok(());
        }
        let arena = self.arena();
        let color = Self::color_for(opacity);
        let origin = self.origin;

        for row in 0..src.height {
            for col in 0..src.width {
                let (sx, sy) = ((src.x + col) as usize, (src.y + row) as usize);
                let rows = self.sheet_rows(sheet);
                if sy >= rows.len() || sx >= rows[sy].len() {
                    continue;
                }
                let byte = rows[sy][sx];
                if byte == b' ' {
                    continue;
                }

                let (dx, dy) = (dst.x + col, dst.y + row);
                if dx < 0 || dy < 0 || dx >= arena.width || dy >= arena.height {
                    continue;
                }
                self.render_char(
                    origin.0 + dx as u16,
                    origin.1 + dy as u16,
                    byte as char,
                    color,
                )?;
            }
        }
        Ok(())
    }
}
