//! Core drawing surfaces:
//! - Cell: Individual character cell
//! - Grid: 2D surface that screens print into and blit between

pub mod cell;
pub mod grid;

pub use cell::Cell;
pub use grid::Grid;
