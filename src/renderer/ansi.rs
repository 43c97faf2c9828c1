//! ANSI Renderer
//!
//! Renders a grid to any ANSI/VT100-compatible terminal:
//! - absolute cursor addressing, one row at a time
//! - one fixed color pair (white on black), set once per full frame
//! - control characters are never sent raw

use crate::core::Grid;
use super::Renderer;

/// ANSI escape sequences
const CSI: &str = "\x1b[";

/// Reset attributes, white on black
const TEXT_SGR: &str = "\x1b[0;37;40m";

/// ANSI Renderer
pub struct AnsiRenderer {
    /// Display dimensions
    pub cols: usize,
    pub rows: usize,
}

impl AnsiRenderer {
    /// Create a new renderer with specified dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    fn move_cursor(&self, x: usize, y: usize) -> String {
        format!("{}{};{}H", CSI, y + 1, x + 1)
    }
}

/// Replace control characters with a space
fn printable(ch: char) -> char {
    if ch < ' ' || ch == '\x7f' { ' ' } else { ch }
}

impl Renderer for AnsiRenderer {
    fn name(&self) -> &str {
        "ansi"
    }

    fn init(&mut self) -> String {
        // Hide cursor, set colors, clear, home
        format!("{}?25l{}{}2J{}H", CSI, TEXT_SGR, CSI, CSI)
    }

    fn shutdown(&self) -> String {
        // Reset attributes, show cursor, clear, home
        format!("{}0m{}?25h{}2J{}H", CSI, CSI, CSI, CSI)
    }

    fn render_full(&mut self, grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.cols * grid.rows * 2 + 64);
        output.push_str(TEXT_SGR);

        for y in 0..grid.rows.min(self.rows) {
            output.push_str(&self.move_cursor(0, y));
            for x in 0..grid.cols.min(self.cols) {
                if let Some(cell) = grid.get(x, y) {
                    output.push(printable(cell.char));
                }
            }
        }

        output
    }

    fn render_dirty(&mut self, grid: &Grid) -> String {
        let dirty_count = grid.iter_dirty().count();

        // More than half the screen changed: a full redraw is cheaper
        let total = grid.cols * grid.rows;
        if dirty_count > total / 2 {
            return self.render_full(grid);
        }

        let mut output = String::with_capacity(dirty_count * 10);
        let mut last: Option<(usize, usize)> = None;

        // Grid iteration is row-major, so cells arrive in screen order
        for (x, y, cell) in grid.iter_dirty() {
            if x >= self.cols || y >= self.rows {
                continue;
            }
            let contiguous = matches!(last, Some((lx, ly)) if ly == y && lx + 1 == x);
            if !contiguous {
                output.push_str(&self.move_cursor(x, y));
            }

            output.push(printable(cell.char));
            last = Some((x, y));
        }

        output
    }
}
