//! Input
//!
//! Turns raw terminal bytes into discrete input events and defines the
//! source the state machine waits on.
//! Handles:
//! - Regular characters, reported as key symbols plus modifiers
//! - Control keys (Enter, Tab, Backspace, Ctrl+letter)
//! - Arrow keys and other CSI / SS3 escape sequences
//! - A bare Escape key press

use std::collections::VecDeque;

use crate::error::Result;

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the program (Ctrl+C, input closed)
    Quit,

    /// A key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    /// Key press without modifiers
    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Plain character key press
    pub fn char(c: char) -> Self {
        Self::key(Key::Char(c))
    }
}

/// Symbolic key codes.
///
/// Letter keys are always the lowercase symbol; Shift is reported in
/// [`Modifiers`], the way a keyboard reports the physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Escape,
    Enter,
    Tab,
    Backspace,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl Key {
    /// The letter for keys `a` through `z`
    pub fn letter(&self) -> Option<char> {
        match *self {
            Key::Char(c) if c.is_ascii_lowercase() => Some(c),
            _ => None,
        }
    }
}

/// Modifier keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Decode an xterm modifier parameter (`1 + bitmask`)
    fn from_xterm(param: u8) -> Self {
        let bits = param.saturating_sub(1);
        Modifiers {
            shift: bits & 0x01 != 0,
            alt: bits & 0x02 != 0,
            ctrl: bits & 0x04 != 0,
        }
    }
}

/// Source of input events for the state machine.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    /// Wait until at least one event is available, then drain every event
    /// queued so far. Never returns an empty batch.
    async fn wait(&mut self) -> Result<Vec<InputEvent>>;
}

/// Replays prepared batches of events.
///
/// Once the script runs out it reports `Quit`, like a closed terminal.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        Self {
            batches: batches.into_iter().filter(|b| !b.is_empty()).collect(),
        }
    }

    /// One batch per event
    pub fn one_by_one<I>(events: I) -> Self
    where
        I: IntoIterator<Item = InputEvent>,
    {
        Self::new(events.into_iter().map(|e| vec![e]))
    }

    /// Batches not yet delivered
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl InputSource for ScriptedInput {
    async fn wait(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.batches.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]))
    }
}

/// Raw byte input parser
pub struct InputParser {
    /// Buffer for incomplete sequences
    buffer: Vec<u8>,
}

impl InputParser {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(32),
        }
    }

    /// Parse input bytes into events.
    /// Incomplete sequences stay buffered for the next call.
    pub fn parse(&mut self, data: &[u8]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.buffer.extend_from_slice(data);

        while !self.buffer.is_empty() {
            match self.try_parse_one() {
                ParseResult::Event(event) => events.push(event),
                ParseResult::Incomplete => break,
                ParseResult::Skip(n) => {
                    self.buffer.drain(0..n);
                }
            }
        }

        events
    }

    /// Resolve a pending escape once a read has been fully parsed.
    ///
    /// Terminals deliver a whole escape sequence in a single read, so an
    /// ESC still buffered at the end of one is the Escape key itself.
    pub fn flush(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while self.buffer.first() == Some(&0x1b) {
            self.buffer.remove(0);
            events.push(InputEvent::key(Key::Escape));
            events.extend(self.parse(&[]));
        }
        events
    }

    fn try_parse_one(&mut self) -> ParseResult {
        let Some(&first) = self.buffer.first() else {
            return ParseResult::Incomplete;
        };

        if first == 0x1b {
            return self.parse_escape();
        }

        // Control characters (< 32) and DEL (0x7f)
        if first < 32 || first == 0x7f {
            let event = match first {
                0x0d | 0x0a => Some(InputEvent::key(Key::Enter)),
                0x09 => Some(InputEvent::key(Key::Tab)),
                0x7f | 0x08 => Some(InputEvent::key(Key::Backspace)),
                0x03 => Some(InputEvent::Quit), // Ctrl+C
                0x01..=0x1a => Some(InputEvent::KeyDown {
                    key: Key::Char((b'a' + first - 1) as char),
                    modifiers: Modifiers { ctrl: true, ..Default::default() },
                }),
                _ => None,
            };
            return match event {
                Some(event) => {
                    self.buffer.remove(0);
                    ParseResult::Event(event)
                }
                None => ParseResult::Skip(1),
            };
        }

        match self.decode_utf8() {
            Utf8::Char(ch, len) => {
                self.buffer.drain(0..len);
                ParseResult::Event(char_event(ch, Modifiers::default()))
            }
            Utf8::Incomplete => ParseResult::Incomplete,
            Utf8::Invalid => ParseResult::Skip(1),
        }
    }

    fn parse_escape(&mut self) -> ParseResult {
        if self.buffer.len() < 2 {
            return ParseResult::Incomplete;
        }

        match self.buffer[1] {
            // CSI sequence: ESC [
            b'[' => self.parse_csi(),
            // SS3 sequence: ESC O (F1-F4 and cursor keys on some terminals)
            b'O' => self.parse_ss3(),
            // Alt+key
            c @ 0x20..=0x7e => {
                self.buffer.drain(0..2);
                let modifiers = Modifiers { alt: true, ..Default::default() };
                ParseResult::Event(char_event(c as char, modifiers))
            }
            // ESC followed by anything else: the ESC was a key press on its own
            _ => {
                self.buffer.remove(0);
                ParseResult::Event(InputEvent::key(Key::Escape))
            }
        }
    }

    /// Parse CSI (Control Sequence Introducer) sequence: ESC [
    fn parse_csi(&mut self) -> ParseResult {
        let end = self.buffer[2..]
            .iter()
            .position(|&b| b.is_ascii_alphabetic() || b == b'~');

        match end {
            None => ParseResult::Incomplete,
            Some(pos) => {
                let end_idx = 2 + pos;
                let final_byte = self.buffer[end_idx];
                let params = String::from_utf8_lossy(&self.buffer[2..end_idx]).into_owned();
                self.buffer.drain(0..=end_idx);

                match decode_csi(&params, final_byte) {
                    Some(event) => ParseResult::Event(event),
                    None => ParseResult::Skip(0),
                }
            }
        }
    }

    /// Parse SS3 sequence: ESC O
    fn parse_ss3(&mut self) -> ParseResult {
        if self.buffer.len() < 3 {
            return ParseResult::Incomplete;
        }

        let key = match self.buffer[2] {
            b'P' => Some(Key::F1),
            b'Q' => Some(Key::F2),
            b'R' => Some(Key::F3),
            b'S' => Some(Key::F4),
            b'A' => Some(Key::Up),
            b'B' => Some(Key::Down),
            b'C' => Some(Key::Right),
            b'D' => Some(Key::Left),
            b'H' => Some(Key::Home),
            b'F' => Some(Key::End),
            _ => None,
        };

        self.buffer.drain(0..3);
        match key {
            Some(key) => ParseResult::Event(InputEvent::key(key)),
            None => ParseResult::Skip(0),
        }
    }

    fn decode_utf8(&self) -> Utf8 {
        let Some(&first) = self.buffer.first() else {
            return Utf8::Incomplete;
        };

        if first < 128 {
            return Utf8::Char(first as char, 1);
        }

        let len = if first & 0xE0 == 0xC0 { 2 }
            else if first & 0xF0 == 0xE0 { 3 }
            else if first & 0xF8 == 0xF0 { 4 }
            else { return Utf8::Invalid };

        if self.buffer.len() < len {
            return Utf8::Incomplete;
        }

        match std::str::from_utf8(&self.buffer[0..len]).ok().and_then(|s| s.chars().next()) {
            Some(c) => Utf8::Char(c, len),
            None => Utf8::Invalid,
        }
    }
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new()
    }
}

enum ParseResult {
    Event(InputEvent),
    Incomplete,
    /// Drop this many bytes (0 when the sequence was already consumed)
    Skip(usize),
}

enum Utf8 {
    Char(char, usize),
    Incomplete,
    Invalid,
}

/// Key event for a typed character; uppercase ASCII becomes Shift+letter
fn char_event(ch: char, mut modifiers: Modifiers) -> InputEvent {
    let key = if ch.is_ascii_uppercase() {
        modifiers.shift = true;
        Key::Char(ch.to_ascii_lowercase())
    } else {
        Key::Char(ch)
    };
    InputEvent::KeyDown { key, modifiers }
}

/// Decode CSI parameters into an event
fn decode_csi(params: &str, final_byte: u8) -> Option<InputEvent> {
    let mut fields = params.split(';').map(|f| f.parse::<u8>().unwrap_or(0));
    let number = fields.next().unwrap_or(0);
    let modifiers = fields.next().map(Modifiers::from_xterm).unwrap_or_default();

    let key = match final_byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'~' => match number {
            1 | 7 => Key::Home,
            2 => Key::Insert,
            3 => Key::Delete,
            4 | 8 => Key::End,
            5 => Key::PageUp,
            6 => Key::PageDown,
            11 => Key::F1,
            12 => Key::F2,
            13 => Key::F3,
            14 => Key::F4,
            15 => Key::F5,
            17 => Key::F6,
            18 => Key::F7,
            19 => Key::F8,
            20 => Key::F9,
            21 => Key::F10,
            23 => Key::F11,
            24 => Key::F12,
            _ => return None,
        },
        _ => return None,
    };

    Some(InputEvent::KeyDown { key, modifiers })
}
