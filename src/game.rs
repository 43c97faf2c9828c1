//! Game state shared by every screen

use crate::core::Grid;

/// Grid width in columns
pub const CONSOLE_WIDTH: usize = 21;
/// Grid height in rows
pub const CONSOLE_HEIGHT: usize = 12;
/// Terminal window title
pub const WINDOW_TITLE: &str = "ColiEmacs";
/// Escape presses on the typing screen before the program exits
pub const QUIT_PRESSES: u32 = 10;

/// The two drawing surfaces.
///
/// Screens draw into `draw`; entering a screen blits `draw` onto `root`,
/// which is what the display shows.
#[derive(Debug, Clone)]
pub struct Surfaces {
    pub root: Grid,
    pub draw: Grid,
}

impl Surfaces {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            root: Grid::new(cols, rows),
            draw: Grid::new(cols, rows),
        }
    }

    /// Composite the draw surface onto the root surface
    pub fn blit(&mut self) {
        self.root.blit(&self.draw);
    }
}

/// Mutable state that outlives each screen handler
#[derive(Debug, Clone)]
pub struct GameState {
    /// Everything typed on the loop screen so far
    pub typed_text: String,
    /// Escape presses on the loop screen
    pub escape_count: u32,
    pub surfaces: Surfaces,
}

impl GameState {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            typed_text: String::new(),
            escape_count: 0,
            surfaces: Surfaces::new(cols, rows),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(CONSOLE_WIDTH, CONSOLE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_game_state() {
        let game = GameState::default();
        assert!(game.typed_text.is_empty());
        assert_eq!(game.escape_count, 0);
        assert_eq!(game.surfaces.root.cols, CONSOLE_WIDTH);
        assert_eq!(game.surfaces.draw.rows, CONSOLE_HEIGHT);
    }

    #[test]
    fn test_blit_moves_draw_onto_root() {
        let mut surfaces = Surfaces::new(5, 2);
        surfaces.draw.print(0, 0, "Hi");
        assert!(surfaces.root.lines().is_empty());
        surfaces.blit();
        assert_eq!(surfaces.root.lines(), vec!["Hi".to_string()]);
    }
}
