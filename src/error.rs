//! Error types

use std::io;

use thiserror::Error;

/// Errors raised while driving the terminal.
///
/// Input handling itself never fails; only the I/O around it can.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from terminal reads, writes or mode switches.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;
