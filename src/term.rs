//! Term module - crossterm renderer and terminal guard
//!
//! `Terminal::new` switches to the alternate screen in raw mode; dropping
//! the guard restores the terminal even when the runner errors out.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::field::Tile;
use crate::session::Session;
use crate::types::{Rgb, GHOST_COLOR};

/// Raw-mode alternate-screen guard plus renderer
pub struct Terminal {
    out: Stdout,
    enhanced_keys: bool,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        // Key-release events need the kitty keyboard protocol.
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        Ok(Self { out, enhanced_keys })
    }

    /// Whether the terminal reports key releases
    pub fn reports_key_release(&self) -> bool {
        self.enhanced_keys
    }

    fn color(rgb: Rgb) -> Color {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }

    /// Render the full frame: bordered field, then the HUD beside it
    pub fn draw(&mut self, session: &Session) -> Result<()> {
        let field = session.field();
        let w = field.width() as u16;
        let h = field.height() as u16;

        queue!(self.out, ResetColor, MoveTo(0, 0), Print("┌"))?;
        for _ in 0..w {
            queue!(self.out, Print("──"))?;
        }
        queue!(self.out, Print("┐"))?;

        for row in 0..field.height() {
            queue!(self.out, MoveTo(0, row as u16 + 1), ResetColor, Print("│"))?;
            for col in 0..field.width() {
                match field.tile(row, col) {
                    Some(Tile::Occupied(color)) => {
                        queue!(self.out, SetForegroundColor(Self::color(color)), Print("██"))?;
                    }
                    Some(Tile::Ghost) => {
                        queue!(
                            self.out,
                            SetForegroundColor(Self::color(GHOST_COLOR)),
                            Print("░░")
                        )?;
                    }
                    _ => queue!(self.out, Print("  "))?,
                }
            }
            queue!(self.out, ResetColor, Print("│"))?;
        }

        queue!(self.out, MoveTo(0, h + 1), Print("└"))?;
        for _ in 0..w {
            queue!(self.out, Print("──"))?;
        }
        queue!(self.out, Print("┘"))?;

        self.draw_hud(session, 2 * w + 4)?;
        self.out.flush()?;
        Ok(())
    }

    fn draw_hud(&mut self, session: &Session, col: u16) -> Result<()> {
        queue!(
            self.out,
            ResetColor,
            MoveTo(col, 1),
            Print(format!("score {:>8}", session.score())),
            MoveTo(col, 2),
            Print(format!("level {:>8}", session.level())),
            MoveTo(col, 3),
            Print(format!("lines {:>8}", session.lines())),
        )?;

        let mut next = String::new();
        for kind in session.preview() {
            next.push(kind.as_char());
            next.push(' ');
        }
        let hold = session.hold_piece().map_or('-', |kind| kind.as_char());
        queue!(
            self.out,
            MoveTo(col, 5),
            Print(format!("next  {}", next)),
            MoveTo(col, 6),
            Print(format!("hold  {}", hold)),
        )?;

        if !session.playing() {
            queue!(self.out, MoveTo(col, 8), Print("GAME OVER"))?;
        }
        queue!(self.out, MoveTo(col, 10), Print("q quits"))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
