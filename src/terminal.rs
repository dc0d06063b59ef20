use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    interactive: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the screen: raw mode, alternate screen, mouse capture
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

        Ok(Self {
            width,
            height,
            buffer: Self::blank(width, height),
            interactive: true,
        })
    }

    /// Buffer-only terminal for printing to stdout
    pub fn offscreen(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: Self::blank(width, height),
            interactive: false,
        }
    }

    fn blank(width: u16, height: u16) -> Vec<Vec<Cell>> {
        vec![vec![Cell::default(); width as usize]; height as usize]
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = Self::blank(width, height);
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Set a string centred on the row
    pub fn set_centered(&mut self, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        let x = (self.width as i32 - s.chars().count() as i32) / 2;
        self.set_str(x.max(0), y, s, fg, bold);
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(stdout, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(stdout, SetAttribute(Attribute::Bold))?;
                }

                if let Some(color) = cell.fg {
                    queue!(stdout, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
                } else {
                    queue!(stdout, Print(cell.ch))?;
                }

                if cell.bold {
                    queue!(stdout, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        stdout.flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for the next input event
    pub fn next_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if poll(timeout)? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }

    /// Print buffer to stdout with ANSI colors (for print mode)
    pub fn print_to_stdout(&self) {
        for row in &self.buffer {
            let last = row.iter().rposition(|c| c.ch != ' ').map_or(0, |i| i + 1);
            for cell in &row[..last] {
                if cell.ch == ' ' {
                    print!(" ");
                    continue;
                }

                if cell.bold {
                    print!("\x1b[1m");
                }

                if let Some(color) = cell.fg {
                    match color {
                        Color::Rgb { r, g, b } => {
                            print!("\x1b[38;2;{};{};{}m", r, g, b);
                        }
                        Color::AnsiValue(v) => {
                            print!("\x1b[38;5;{}m", v);
                        }
                        // Standard colors (0-7)
                        Color::Black => print!("\x1b[30m"),
                        Color::DarkRed => print!("\x1b[31m"),
                        Color::DarkGreen => print!("\x1b[32m"),
                        Color::DarkYellow => print!("\x1b[33m"),
                        Color::DarkBlue => print!("\x1b[34m"),
                        Color::DarkMagenta => print!("\x1b[35m"),
                        Color::DarkCyan => print!("\x1b[36m"),
                        Color::Grey => print!("\x1b[37m"),
                        // Bright colors (8-15)
                        Color::DarkGrey => print!("\x1b[90m"),
                        Color::Red => print!("\x1b[91m"),
                        Color::Green => print!("\x1b[92m"),
                        Color::Yellow => print!("\x1b[93m"),
                        Color::Blue => print!("\x1b[94m"),
                        Color::Magenta => print!("\x1b[95m"),
                        Color::Cyan => print!("\x1b[96m"),
                        Color::White => print!("\x1b[97m"),
                        _ => {}
                    }
                }

                print!("{}", cell.ch);
                print!("\x1b[0m");
            }
            println!();
        }
    }
}

#[cfg(test)]
impl Terminal {
    /// Buffer contents as plain text, one string per row
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.buffer
            .iter()
            .map(|row| row.iter().map(|c| c.ch).collect())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.interactive {
            let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
