//! ColiEmacs binary
//!
//! Run with: cargo run
//!
//! Takes no arguments. Set `RUST_LOG=debug` and redirect stderr
//! (`coliemacs 2>coliemacs.log`) to trace state changes.

use env_logger::Env;
use log::info;

use coliemacs::{
    handler_table, Fsm, GameState, StateId, TerminalDisplay, TerminalInput, CONSOLE_HEIGHT,
    CONSOLE_WIDTH,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stderr shares the screen with the game, so stay quiet by default
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let display = TerminalDisplay::open(CONSOLE_WIDTH, CONSOLE_HEIGHT)?;
    let mut fsm = Fsm::new(handler_table(), display, TerminalInput::new());
    let result = fsm.run(StateId::Title, GameState::default()).await;

    // Restore the terminal before anything is reported
    drop(fsm);
    let game = result?;

    info!(
        "Typed {} character(s), pressed Escape {} time(s)",
        game.typed_text.len(),
        game.escape_count
    );
    Ok(())
}
