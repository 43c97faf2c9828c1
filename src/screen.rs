//! Screens
//!
//! One handler type per [`StateId`]. A handler is built fresh for every
//! pass of the state machine, draws its screen, and reacts to input by
//! mutating the [`GameState`] and choosing the next state.

use log::debug;

use crate::fsm::HandlerTable;
use crate::game::{GameState, QUIT_PRESSES};
use crate::input::{InputEvent, Key, Modifiers};

/// Greeting shown on the title screen
pub const TITLE_TEXT: &str = "Hello!";

/// Screens the program can be on.
///
/// Leaving the program is `None` in an `Option<StateId>`, never a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Title,
    Loop,
}

/// Per-screen behavior
pub trait ScreenHandler {
    /// The screen this handler draws
    fn state(&self) -> StateId;

    /// Where the state machine goes after this pass; `None` exits
    fn next_state(&self) -> Option<StateId>;

    /// Clear the draw surface and draw this screen onto it
    fn draw(&self, game: &mut GameState);

    /// The user asked to close the program
    fn on_quit(&mut self, game: &mut GameState);

    /// A key was pressed
    fn on_key_down(&mut self, key: Key, modifiers: Modifiers, game: &mut GameState);

    /// Route one event to the matching reaction.
    ///
    /// Every event of a batch is routed; the last transition set wins.
    fn dispatch(&mut self, event: &InputEvent, game: &mut GameState) {
        debug!("{:?}: {:?}", self.state(), event);
        match *event {
            InputEvent::Quit => self.on_quit(game),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(key, modifiers, game),
        }
    }
}

/// Title screen: any key starts typing, Escape leaves
pub struct TitleScreen {
    state: StateId,
    next_state: Option<StateId>,
}

impl TitleScreen {
    pub fn new(state: StateId) -> Self {
        Self {
            state,
            next_state: Some(state),
        }
    }
}

impl ScreenHandler for TitleScreen {
    fn state(&self) -> StateId {
        self.state
    }

    fn next_state(&self) -> Option<StateId> {
        self.next_state
    }

    fn draw(&self, game: &mut GameState) {
        let surface = &mut game.surfaces.draw;
        surface.clear();
        surface.print(0, 0, TITLE_TEXT);
    }

    fn on_quit(&mut self, _game: &mut GameState) {
        self.next_state = None;
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, _game: &mut GameState) {
        self.next_state = match key {
            Key::Escape => None,
            _ => Some(StateId::Loop),
        };
    }
}

/// Typing screen: letters are echoed, Backspace erases, ten Escapes leave
pub struct LoopScreen {
    state: StateId,
    next_state: Option<StateId>,
}

impl LoopScreen {
    pub fn new(state: StateId) -> Self {
        Self {
            state,
            next_state: Some(state),
        }
    }
}

impl ScreenHandler for LoopScreen {
    fn state(&self) -> StateId {
        self.state
    }

    fn next_state(&self) -> Option<StateId> {
        self.next_state
    }

    fn draw(&self, game: &mut GameState) {
        let surface = &mut game.surfaces.draw;
        surface.clear();
        for (y, line) in wrap_lines(&game.typed_text, surface.cols).iter().enumerate() {
            surface.print(0, y, &line.to_uppercase());
        }
    }

    fn on_quit(&mut self, _game: &mut GameState) {
        self.next_state = None;
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, game: &mut GameState) {
        match key {
            Key::Escape => {
                game.escape_count += 1;
                debug!("escape {}/{}", game.escape_count, QUIT_PRESSES);
                if game.escape_count == QUIT_PRESSES {
                    self.next_state = None;
                }
            }
            Key::Backspace => {
                game.typed_text.pop();
            }
            _ => {
                if let Some(c) = key.letter() {
                    game.typed_text.push(c);
                }
            }
        }
    }
}

/// Split `text` into lines of at most `width` characters
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

fn title_screen(state: StateId, _game: &GameState) -> Box<dyn ScreenHandler> {
    Box::new(TitleScreen::new(state))
}

fn loop_screen(state: StateId, _game: &GameState) -> Box<dyn ScreenHandler> {
    Box::new(LoopScreen::new(state))
}

/// Handlers for every screen
pub fn handler_table() -> HandlerTable {
    let mut table = HandlerTable::new();
    table.register(StateId::Title, title_screen);
    table.register(StateId::Loop, loop_screen);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn press(handler: &mut dyn ScreenHandler, game: &mut GameState, key: Key) {
        handler.dispatch(&InputEvent::key(key), game);
    }

    #[test]
    fn test_title_any_key_starts_loop() {
        for key in [Key::Char('h'), Key::Enter, Key::F5, Key::Char('7'), Key::Backspace] {
            let mut game = GameState::default();
            let mut title = TitleScreen::new(StateId::Title);
            press(&mut title, &mut game, key);
            assert_eq!(title.next_state(), Some(StateId::Loop), "{key:?}");
        }
    }

    #[test]
    fn test_title_escape_and_quit_exit() {
        let mut game = GameState::default();
        let mut title = TitleScreen::new(StateId::Title);
        press(&mut title, &mut game, Key::Escape);
        assert_eq!(title.next_state(), None);

        let mut title = TitleScreen::new(StateId::Title);
        title.dispatch(&InputEvent::Quit, &mut game);
        assert_eq!(title.next_state(), None);
    }

    #[test]
    fn test_title_draws_greeting() {
        let mut game = GameState::default();
        game.surfaces.draw.print(3, 4, "stale");
        TitleScreen::new(StateId::Title).draw(&mut game);
        assert_eq!(game.surfaces.draw.lines(), vec![TITLE_TEXT.to_string()]);
    }

    #[test]
    fn test_loop_stays_by_default() {
        let mut game = GameState::default();
        let mut screen = LoopScreen::new(StateId::Loop);
        press(&mut screen, &mut game, Key::Char('a'));
        assert_eq!(screen.next_state(), Some(StateId::Loop));
        assert_eq!(game.typed_text, "a");
    }

    #[test]
    fn test_loop_backspace_on_empty_is_noop() {
        let mut game = GameState::default();
        let mut screen = LoopScreen::new(StateId::Loop);
        press(&mut screen, &mut game, Key::Backspace);
        assert!(game.typed_text.is_empty());
        assert_eq!(screen.next_state(), Some(StateId::Loop));
    }

    #[test]
    fn test_loop_ignores_other_keys() {
        let mut game = GameState::default();
        game.typed_text = "abc".to_string();
        game.escape_count = 3;
        let mut screen = LoopScreen::new(StateId::Loop);
        for key in [Key::Char('1'), Key::Char('A'), Key::Char(' '), Key::Enter, Key::Up, Key::F1] {
            press(&mut screen, &mut game, key);
        }
        assert_eq!(game.typed_text, "abc");
        assert_eq!(game.escape_count, 3);
        assert_eq!(screen.next_state(), Some(StateId::Loop));
    }

    #[test]
    fn test_loop_shifted_letter_types_lowercase() {
        let mut game = GameState::default();
        let mut screen = LoopScreen::new(StateId::Loop);
        let shifted = InputEvent::KeyDown {
            key: Key::Char('q'),
            modifiers: Modifiers { shift: true, ..Default::default() },
        };
        screen.dispatch(&shifted, &mut game);
        assert_eq!(game.typed_text, "q");
    }

    #[test]
    fn test_loop_tenth_escape_exits() {
        let mut game = GameState::default();
        let mut screen = LoopScreen::new(StateId::Loop);
        for _ in 0..9 {
            press(&mut screen, &mut game, Key::Escape);
        }
        assert_eq!(game.escape_count, 9);
        assert_eq!(screen.next_state(), Some(StateId::Loop));

        press(&mut screen, &mut game, Key::Escape);
        assert_eq!(game.escape_count, QUIT_PRESSES);
        assert_eq!(screen.next_state(), None);
    }

    #[test]
    fn test_escape_count_carries_across_handlers() {
        let mut game = GameState::default();
        for _ in 0..9 {
            let mut screen = LoopScreen::new(StateId::Loop);
            press(&mut screen, &mut game, Key::Escape);
            assert_eq!(screen.next_state(), Some(StateId::Loop));
        }
        let mut screen = LoopScreen::new(StateId::Loop);
        press(&mut screen, &mut game, Key::Escape);
        assert_eq!(screen.next_state(), None);
    }

    #[test]
    fn test_loop_quit_exits_regardless_of_count() {
        let mut game = GameState::default();
        let mut screen = LoopScreen::new(StateId::Loop);
        screen.dispatch(&InputEvent::Quit, &mut game);
        assert_eq!(screen.next_state(), None);
        assert_eq!(game.escape_count, 0);
    }

    #[test]
    fn test_later_event_overrides_exit_request() {
        let mut game = GameState::default();
        let mut title = TitleScreen::new(StateId::Title);
        press(&mut title, &mut game, Key::Escape);
        press(&mut title, &mut game, Key::Char('h'));
        assert_eq!(title.next_state(), Some(StateId::Loop));
    }

    #[test]
    fn test_keys_after_tenth_escape_are_still_typed() {
        let mut game = GameState::default();
        let mut screen = LoopScreen::new(StateId::Loop);
        for _ in 0..QUIT_PRESSES {
            press(&mut screen, &mut game, Key::Escape);
        }
        press(&mut screen, &mut game, Key::Char('a'));
        assert_eq!(game.typed_text, "a");
        assert_eq!(screen.next_state(), None);
    }

    #[test]
    fn test_loop_draws_wrapped_uppercase() {
        let mut game = GameState::default();
        game.typed_text = "abcdefghijklmnopqrstuvwxyz".to_string();
        LoopScreen::new(StateId::Loop).draw(&mut game);
        assert_eq!(
            game.surfaces.draw.lines(),
            vec!["ABCDEFGHIJKLMNOPQRSTU".to_string(), "VWXYZ".to_string()]
        );
    }

    #[test]
    fn test_loop_draw_clears_previous_text() {
        let mut game = GameState::default();
        game.typed_text = "hello".to_string();
        let screen = LoopScreen::new(StateId::Loop);
        screen.draw(&mut game);
        game.typed_text.pop();
        screen.draw(&mut game);
        assert_eq!(game.surfaces.draw.lines(), vec!["HELL".to_string()]);
    }

    #[test]
    fn test_wrap_lines_edges() {
        assert!(wrap_lines("", 21).is_empty());
        assert!(wrap_lines("abc", 0).is_empty());
        assert_eq!(wrap_lines("abc", 3), vec!["abc".to_string()]);
        assert_eq!(wrap_lines("abcd", 3), vec!["abc".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_handler_table_covers_every_state() {
        let table = handler_table();
        let game = GameState::default();
        for state in [StateId::Title, StateId::Loop] {
            let handler = table.build(state, &game);
            assert_eq!(handler.state(), state);
            assert_eq!(handler.next_state(), Some(state));
        }
    }

    proptest! {
        #[test]
        fn prop_wrap_line_count_and_content(text in "[a-z]{0,200}", width in 1usize..40) {
            let lines = wrap_lines(&text, width);
            prop_assert_eq!(lines.len(), text.len().div_ceil(width));
            prop_assert!(lines.iter().all(|l| l.chars().count() <= width));
            prop_assert_eq!(lines.concat(), text);
        }

        #[test]
        fn prop_loop_draw_matches_uppercased_text(text in "[a-z]{0,252}") {
            let mut game = GameState::default();
            game.typed_text = text.clone();
            LoopScreen::new(StateId::Loop).draw(&mut game);
            let drawn = game.surfaces.draw.lines();
            prop_assert_eq!(drawn.len(), text.len().div_ceil(game.surfaces.draw.cols));
            prop_assert_eq!(drawn.concat(), text.to_uppercase());
        }

        #[test]
        fn prop_type_then_erase_restores_text(
            start in "[a-z]{0,30}",
            typed in proptest::collection::vec(proptest::char::range('a', 'z'), 0..30),
        ) {
            let mut game = GameState::default();
            game.typed_text = start.clone();
            let mut screen = LoopScreen::new(StateId::Loop);
            for &c in &typed {
                press(&mut screen, &mut game, Key::Char(c));
            }
            for _ in 0..typed.len() {
                press(&mut screen, &mut game, Key::Backspace);
            }
            prop_assert_eq!(game.typed_text, start);
        }
    }
}
