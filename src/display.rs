//! Display - where the root surface ends up

use crate::core::Grid;
use crate::error::Result;

/// A target that can show a composited grid
pub trait Display {
    /// Show `grid` and flush it, then mark the grid clean
    fn present(&mut self, grid: &mut Grid) -> Result<()>;
}

/// Display that keeps every presented frame as text.
///
/// Used to drive the state machine without a terminal.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    frames: Vec<Vec<String>>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames presented so far, oldest first
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    /// The most recent frame
    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Display for HeadlessDisplay {
    fn present(&mut self, grid: &mut Grid) -> Result<()> {
        self.frames.push(grid.lines());
        grid.mark_all_clean();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_records_frames() {
        let mut display = HeadlessDisplay::new();
        let mut grid = Grid::new(8, 3);
        grid.print(0, 1, "HI");

        display.present(&mut grid).unwrap();
        assert!(!grid.is_dirty());
        assert_eq!(display.frames().len(), 1);
        assert_eq!(display.last_frame(), Some(&["".to_string(), "HI".to_string()][..]));
    }
}
