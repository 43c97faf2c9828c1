//! Cell Grid - a fixed-size drawing surface
//!
//! A 2D array of cells. Screens print into an off-screen grid, which is
//! then blitted onto the root grid that the display repaints from.
//! Dirty tracking lets the display send only the cells that changed.

use super::cell::Cell;

/// A 2D array of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Grid width in columns
    pub cols: usize,
    /// Grid height in rows
    pub rows: usize,
    /// The cell buffer (row-major order)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a blank grid with given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        let cells = vec![Cell::default(); cols * rows];
        Self { cols, rows, cells }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.cols && y < self.rows {
            Some(y * self.cols + x)
        } else {
            None
        }
    }

    /// Get a reference to a cell
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to a cell
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a cell at position; out-of-bounds writes are dropped
    pub fn set(&mut self, x: usize, y: usize, char: char) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.set(char);
        }
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Write a string at position, clipped at the right edge
    pub fn print(&mut self, x: usize, y: usize, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            let px = x + i;
            if px >= self.cols {
                break;
            }
            self.set(px, y, ch);
        }
    }

    /// Composite `src` onto this grid, top-left aligned, clipped to the
    /// smaller of the two. Only cells that actually change become dirty.
    pub fn blit(&mut self, src: &Grid) {
        let w = self.cols.min(src.cols);
        let h = self.rows.min(src.rows);
        for y in 0..h {
            for x in 0..w {
                if let (Some(src_cell), Some(i)) = (src.get(x, y), self.index(x, y)) {
                    self.cells[i].copy_from(src_cell);
                }
            }
        }
    }

    /// Mark all cells as clean
    pub fn mark_all_clean(&mut self) {
        for cell in &mut self.cells {
            cell.dirty = false;
        }
    }

    /// Check if any cells are dirty
    pub fn is_dirty(&self) -> bool {
        self.cells.iter().any(|c| c.dirty)
    }

    /// Iterate over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = i % self.cols;
            let y = i / self.cols;
            (x, y, cell)
        })
    }

    /// Iterate over dirty cells with positions
    pub fn iter_dirty(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.iter().filter(|(_, _, cell)| cell.dirty)
    }

    /// Text of one row, trailing blanks trimmed
    pub fn row_text(&self, y: usize) -> String {
        let row: String = (0..self.cols)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.char)
            .collect();
        row.trim_end().to_string()
    }

    /// Text of every row, trailing blank rows dropped
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.rows).map(|y| self.row_text(y)).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }
}
