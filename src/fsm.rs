//! Screen state machine
//!
//! Each pass builds the handler for the current state, redraws, waits for
//! one batch of input, dispatches it, and moves to whatever state the
//! handler asked for. A `None` state ends the run.
//!
//! ```text
//!   build handler ─▶ enter / re-enter (draw, blit, present)
//!         ▲                          │
//!         │                          ▼
//!    next state ◀── dispatch ◀── wait for input
//! ```

use std::collections::HashMap;

use log::{debug, info};

use crate::display::Display;
use crate::error::Result;
use crate::game::GameState;
use crate::input::InputSource;
use crate::screen::{ScreenHandler, StateId};

/// Builds the handler for one pass through a state
pub type HandlerFactory = fn(StateId, &GameState) -> Box<dyn ScreenHandler>;

/// State to handler-factory mapping
#[derive(Default)]
pub struct HandlerTable {
    factories: HashMap<StateId, HandlerFactory>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory for `state`, replacing any previous one
    pub fn register(&mut self, state: StateId, factory: HandlerFactory) {
        self.factories.insert(state, factory);
    }

    /// Build a handler for `state`.
    ///
    /// # Panics
    ///
    /// Every reachable state must be registered; a missing entry is a bug.
    pub fn build(&self, state: StateId, game: &GameState) -> Box<dyn ScreenHandler> {
        match self.factories.get(&state) {
            Some(factory) => factory(state, game),
            None => panic!("no screen handler registered for {:?}", state),
        }
    }
}

/// How a pass arrived at its state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Coming from another state, or starting up
    Enter,
    /// Same state as the previous pass
    Reenter,
}

impl Entry {
    pub fn between(last: Option<StateId>, state: StateId) -> Self {
        if last == Some(state) {
            Entry::Reenter
        } else {
            Entry::Enter
        }
    }
}

/// The state machine driver
pub struct Fsm<D, I> {
    handlers: HandlerTable,
    display: D,
    input: I,
    /// State of the previous pass; `None` before the first one
    last_state: Option<StateId>,
    /// How the most recent pass arrived at its state
    last_entry: Option<Entry>,
}

impl<D: Display, I: InputSource> Fsm<D, I> {
    pub fn new(handlers: HandlerTable, display: D, input: I) -> Self {
        Self {
            handlers,
            display,
            input,
            last_state: None,
            last_entry: None,
        }
    }

    /// Run from `initial` until a handler requests exit, returning the final game state
    pub async fn run(&mut self, initial: StateId, mut game: GameState) -> Result<GameState> {
        info!("Starting in {:?}", initial);
        // A new run always enters its first state
        self.last_state = None;
        let mut current = Some(initial);
        while let Some(state) = current {
            current = self.step(state, &mut game).await?;
        }
        info!("Exit requested");
        Ok(game)
    }

    /// One pass through `state`; returns the requested next state
    pub async fn step(&mut self, state: StateId, game: &mut GameState) -> Result<Option<StateId>> {
        let mut handler = self.handlers.build(state, game);

        let entry = Entry::between(self.last_state, state);
        match entry {
            Entry::Enter => self.on_enter(handler.as_ref(), game)?,
            Entry::Reenter => self.on_reenter(handler.as_ref(), game)?,
        }
        self.last_state = Some(state);
        self.last_entry = Some(entry);

        let next = self.handle(handler.as_mut(), game).await?;
        if next != Some(state) {
            debug!("{:?} -> {:?}", state, next);
        }
        Ok(next)
    }

    /// First pass through a state
    fn on_enter(&mut self, handler: &dyn ScreenHandler, game: &mut GameState) -> Result<()> {
        debug!("Entering {:?}", handler.state());
        self.redraw(handler, game)
    }

    /// Another pass through the state the previous pass was in.
    /// Redraws in full for now, the same as `on_enter`.
    fn on_reenter(&mut self, handler: &dyn ScreenHandler, game: &mut GameState) -> Result<()> {
        self.redraw(handler, game)
    }

    fn redraw(&mut self, handler: &dyn ScreenHandler, game: &mut GameState) -> Result<()> {
        handler.draw(game);
        game.surfaces.blit();
        self.display.present(&mut game.surfaces.root)
    }

    /// Wait for a batch of input and dispatch all of it
    async fn handle(&mut self, handler: &mut dyn ScreenHandler, game: &mut GameState) -> Result<Option<StateId>> {
        let events = self.input.wait().await?;
        for event in &events {
            handler.dispatch(event, game);
        }
        Ok(handler.next_state())
    }

    /// State of the most recent pass
    pub fn last_state(&self) -> Option<StateId> {
        self.last_state
    }

    /// Entry kind of the most recent pass
    pub fn last_entry(&self) -> Option<Entry> {
        self.last_entry
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}
