//! Terminal presentation of the grid and score.
//!
//! Commands are batched with `queue!` and flushed once per frame. Lines end
//! in `\r\n` because the terminal is in raw mode while the game runs.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use slide_engine::engine::{Game, Tile};

use crate::config;

/// Foreground color for a tile value, one tier per power of two.
pub fn tile_color(value: Tile) -> Color {
    match value {
        0 => Color::DarkGrey,
        2 => Color::Cyan,
        4 => Color::Magenta,
        8 => Color::Red,
        16 => Color::Green,
        32 => Color::Yellow,
        64 => Color::DarkYellow,
        128 => Color::DarkCyan,
        256 => Color::Blue,
        512 => Color::DarkMagenta,
        1024 => Color::DarkBlue,
        _ => Color::DarkRed,
    }
}

pub struct Renderer {
    cell_width: usize,
    colors: bool,
    clear: bool,
}

impl Renderer {
    pub fn new(display: &config::Display) -> Self {
        Renderer {
            cell_width: display.cell_width,
            colors: display.colors,
            clear: true,
        }
    }

    /// Render into a plain buffer: no screen clearing, no cursor motion.
    #[cfg(test)]
    fn plain(cell_width: usize, colors: bool) -> Self {
        Renderer {
            cell_width,
            colors,
            clear: false,
        }
    }

    pub fn draw<W: Write>(&self, out: &mut W, game: &Game) -> io::Result<()> {
        if self.clear {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        queue!(out, Print("\r\n"))?;
        for row in game.grid().rows() {
            for &value in row {
                let text = format!("{:>width$}", value, width = self.cell_width);
                self.colored(out, tile_color(value), text)?;
            }
            queue!(out, Print("\r\n\r\n"))?;
        }
        queue!(out, Print(format!("Score: {}\r\n\r\n", game.score())))?;
        out.flush()
    }

    pub fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(
            out,
            Print("Use the arrow keys to move the tiles. Press Esc or q to quit.\r\n")
        )?;
        out.flush()
    }

    pub fn announce_loss<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.colored(out, Color::Red, "Game over!\r\n".to_string())?;
        queue!(out, Print("Press any key to exit.\r\n"))?;
        out.flush()
    }

    fn colored<W: Write>(&self, out: &mut W, color: Color, text: String) -> io::Result<()> {
        if self.colors {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            queue!(out, Print(text))
        }
    }
}
