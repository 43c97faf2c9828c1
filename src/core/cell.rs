//! Cell - one character position on a surface
//!
//! Each cell holds a character and a dirty flag so the display only
//! repaints what changed. Every cell is drawn in the same colors.

/// A single character cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The character to display
    pub char: char,
    /// Whether this cell needs repainting
    pub dirty: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            dirty: true,
        }
    }
}

impl Cell {
    /// Set the character, marking dirty only on change
    pub fn set(&mut self, char: char) {
        if self.char != char {
            self.char = char;
            self.dirty = true;
        }
    }

    /// Copy the character of `other`
    pub fn copy_from(&mut self, other: &Cell) {
        self.set(other.char);
    }

    /// Reset to a blank cell
    pub fn clear(&mut self) {
        self.set(' ');
    }
}
