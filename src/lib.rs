//! ColiEmacs - a tiny typing toy
//!
//! A title screen, then a screen that echoes what you type in capitals,
//! wrapped to a 21x12 grid. Ten presses of Escape leave.
//!
//! # Overview
//!
//! - `core`: cell grids that screens draw into and blit between
//! - `renderer`: grid to ANSI output
//! - `input`: raw bytes to key events, and the source the game waits on
//! - `screen`: the title and typing screens
//! - `fsm`: the driver that moves between screens
//! - `terminal`: raw-mode terminal display and stdin input
//!
//! # Example
//!
//! ```
//! use coliemacs::{handler_table, Fsm, GameState, HeadlessDisplay, InputEvent, ScriptedInput, StateId};
//!
//! # tokio_test_block_on(async {
//! let input = ScriptedInput::one_by_one([
//!     InputEvent::char('h'),
//!     InputEvent::char('h'),
//!     InputEvent::char('i'),
//!     InputEvent::Quit,
//! ]);
//! let mut fsm = Fsm::new(handler_table(), HeadlessDisplay::new(), input);
//! let game = fsm.run(StateId::Title, GameState::default()).await.unwrap();
//! assert_eq!(game.typed_text, "hi");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod core;
pub mod display;
pub mod error;
pub mod fsm;
pub mod game;
pub mod input;
pub mod renderer;
pub mod screen;
pub mod terminal;

// Re-export commonly used types
pub use crate::core::{Cell, Grid};
pub use display::{Display, HeadlessDisplay};
pub use error::{Error, Result};
pub use fsm::{Entry, Fsm, HandlerFactory, HandlerTable};
pub use game::{GameState, Surfaces, CONSOLE_HEIGHT, CONSOLE_WIDTH};
pub use input::{InputEvent, InputParser, InputSource, Key, Modifiers, ScriptedInput};
pub use renderer::{AnsiRenderer, Renderer};
pub use screen::{handler_table, LoopScreen, ScreenHandler, StateId, TitleScreen};
pub use terminal::{TerminalDisplay, TerminalInput};
