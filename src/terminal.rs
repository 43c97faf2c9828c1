//! Local terminal backend
//!
//! Puts the controlling terminal into raw mode on the alternate screen,
//! paints the root grid through the ANSI renderer, and turns stdin bytes
//! into input events. Dropping the display puts the terminal back.

use std::io::{self, Stdout, Write};

use crossterm::{
    ExecutableCommand,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use log::{debug, info, warn};
use tokio::io::{AsyncReadExt, Stdin};

use crate::core::Grid;
use crate::display::Display;
use crate::error::Result;
use crate::game::WINDOW_TITLE;
use crate::input::{InputEvent, InputParser, InputSource};
use crate::renderer::{AnsiRenderer, Renderer};

/// Display backed by the process's terminal
pub struct TerminalDisplay {
    renderer: AnsiRenderer,
    out: Stdout,
    /// Repaint every cell on the next present
    full_redraw: bool,
}

impl TerminalDisplay {
    /// Switch the terminal into game mode for a `cols` x `rows` grid
    pub fn open(cols: usize, rows: usize) -> Result<Self> {
        match terminal::size() {
            Ok(size) if !fits(size, cols, rows) => {
                warn!("Terminal is {}x{}, smaller than the {}x{} grid", size.0, size.1, cols, rows);
            }
            Ok(_) => {}
            Err(e) => debug!("Could not read terminal size: {}", e),
        }

        terminal::enable_raw_mode()?;
        // From here on Drop restores the terminal
        let mut display = Self {
            renderer: AnsiRenderer::new(cols, rows),
            out: io::stdout(),
            full_redraw: true,
        };
        display.setup()?;
        info!("Terminal session started ({} renderer, {}x{})", display.renderer.name(), cols, rows);
        Ok(display)
    }

    fn setup(&mut self) -> Result<()> {
        self.out.execute(EnterAlternateScreen)?;
        self.out.execute(SetTitle(WINDOW_TITLE))?;
        let init = self.renderer.init();
        self.out.write_all(init.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl Display for TerminalDisplay {
    fn present(&mut self, grid: &mut Grid) -> Result<()> {
        if !self.full_redraw && !grid.is_dirty() {
            return Ok(());
        }
        let output = self.renderer.render(grid, self.full_redraw);
        self.full_redraw = false;
        self.out.write_all(output.as_bytes())?;
        self.out.flush()?;
        grid.mark_all_clean();
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let shutdown = self.renderer.shutdown();
        let _ = self.out.write_all(shutdown.as_bytes());
        let _ = self.out.flush();
        let _ = self.out.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        info!("Terminal session restored");
    }
}

/// Input read from the process's stdin
pub struct TerminalInput {
    stdin: Stdin,
    parser: InputParser,
    buf: [u8; 256],
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            stdin: tokio::io::stdin(),
            parser: InputParser::new(),
            buf: [0; 256],
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    async fn wait(&mut self) -> Result<Vec<InputEvent>> {
        loop {
            let n = self.stdin.read(&mut self.buf).await?;
            if n == 0 {
                info!("Input closed");
                return Ok(vec![InputEvent::Quit]);
            }

            let mut events = self.parser.parse(&self.buf[..n]);
            events.extend(self.parser.flush());
            if !events.is_empty() {
                return Ok(events);
            }
            debug!("Read {} byte(s) with no complete key", n);
        }
    }
}

/// Whether a terminal of `size` (cols, rows) can show the whole grid
fn fits(size: (u16, u16), cols: usize, rows: usize) -> bool {
    size.0 as usize >= cols && size.1 as usize >= rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        assert!(fits((80, 24), 21, 12));
        assert!(fits((21, 12), 21, 12));
        assert!(!fits((20, 24), 21, 12));
        assert!(!fits((80, 11), 21, 12));
    }
}
