//! Renderers convert a cell grid to terminal output.

pub mod ansi;

pub use ansi::AnsiRenderer;

use crate::core::Grid;

/// Trait for renderers
pub trait Renderer {
    /// Renderer name
    fn name(&self) -> &str;

    /// Initialize sequence
    fn init(&mut self) -> String;

    /// Shutdown sequence
    fn shutdown(&self) -> String;

    /// Render entire grid
    fn render_full(&mut self, grid: &Grid) -> String;

    /// Render only dirty cells
    fn render_dirty(&mut self, grid: &Grid) -> String;

    /// Auto-choose render method
    fn render(&mut self, grid: &Grid, force_full: bool) -> String {
        if force_full {
            self.render_full(grid)
        } else {
            self.render_dirty(grid)
        }
    }
}
