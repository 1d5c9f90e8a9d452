//! Translation of abstract key events into byte sequences.
//!
//! Bindings are looked up in a table; which entry applies depends on the
//! key, the held modifiers and a state mask derived from the terminal
//! modes (application cursor keys, application keypad, alternate screen,
//! newline mode, ANSI vs VT52). Tables are serde-serializable so embedders
//! can ship their own layouts.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::codec::StreamDecoder;
use crate::emulator::Emulator;
use crate::host::{ScrollCommand, TerminalHost};
use crate::modes::Mode;

bitflags! {
    /// Modifiers held during a key event. `KEYPAD` marks keys coming from
    /// the numeric pad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KeyModifier: u8 {
        const SHIFT = 1;
        const ALT = 2;
        const CTRL = 4;
        const META = 8;
        const KEYPAD = 16;
    }
}

bitflags! {
    /// Mode-derived state a binding can require.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KeyboardState: u8 {
        const NEWLINE = 1;
        const ANSI = 2;
        const CURSOR_KEYS = 4;
        const ALTERNATE_SCREEN = 8;
        const APP_KEYPAD = 16;
    }
}

const NO_MODS: KeyModifier = KeyModifier::SHIFT
    .union(KeyModifier::ALT)
    .union(KeyModifier::CTRL)
    .union(KeyModifier::META);

/// Abstract keys, independent of any GUI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Backspace,
    Tab,
    Backtab,
    Enter,
    Escape,
    F(u8),
    Character(char),
}

/// Commands a binding can trigger instead of sending bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyCommand {
    #[default]
    None,
    /// Send the erase character (taken from the backspace binding).
    Erase,
    ScrollPageUp,
    ScrollPageDown,
    ScrollLineUp,
    ScrollLineDown,
    ScrollUpToTop,
    ScrollDownToBottom,
}

/// A key event as delivered by the embedding GUI. `text` is the
/// already-composed character input used when no binding matches.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyModifier,
    pub text: String,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: KeyModifier) -> Self {
        KeyEvent {
            key,
            modifiers,
            text: String::new(),
        }
    }

    pub fn with_text(key: Key, modifiers: KeyModifier, text: impl Into<String>) -> Self {
        KeyEvent {
            key,
            modifiers,
            text: text.into(),
        }
    }
}

/// One table row. The masks select which modifier/state bits a row cares
/// about; unmasked bits match anything. A `*` in `text` expands to the
/// xterm modifier parameter (1 + bitmap) at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    #[serde(default)]
    pub modifiers: KeyModifier,
    #[serde(default)]
    pub modifier_mask: KeyModifier,
    #[serde(default)]
    pub state: KeyboardState,
    #[serde(default)]
    pub state_mask: KeyboardState,
    #[serde(default)]
    pub text: Vec<u8>,
    #[serde(default)]
    pub command: KeyCommand,
}

impl KeyBinding {
    fn matches(&self, key: Key, modifiers: KeyModifier, state: KeyboardState) -> bool {
        self.key == key
            && (modifiers & self.modifier_mask) == self.modifiers
            && (state & self.state_mask) == self.state
    }

    fn has_wildcard(&self) -> bool {
        self.text.contains(&b'*')
    }

    /// Whether sending this entry already accounts for the modifier, so
    /// the generic ESC / meta prefix must not be added on top.
    fn claims(&self, modifier: KeyModifier) -> bool {
        self.modifier_mask.contains(modifier) || self.has_wildcard()
    }
}

/// An ordered binding table; the first matching row wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBindingTable {
    pub name: String,
    entries: Vec<KeyBinding>,
}

impl KeyBindingTable {
    pub fn new(name: impl Into<String>) -> Self {
        KeyBindingTable {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, binding: KeyBinding) {
        self.entries.push(binding);
    }

    pub fn find(
        &self,
        key: Key,
        modifiers: KeyModifier,
        state: KeyboardState,
    ) -> Option<&KeyBinding> {
        self.entries
            .iter()
            .find(|entry| entry.matches(key, modifiers, state))
    }

    /// The byte backspace transmits, used for the `Erase` command.
    pub fn erase_char(&self, state: KeyboardState) -> u8 {
        self.find(Key::Backspace, KeyModifier::empty(), state)
            .and_then(|binding| binding.text.first().copied())
            .unwrap_or(0x08)
    }

    /// The stock xterm-compatible layout.
    pub fn default_table() -> Self {
        use Key::*;
        let mut t = KeyBindingTable::new("default");

        t.add(plain(Escape, b"\x1b"));
        t.add(plain(Tab, b"\t"));
        t.add(modified(Tab, KeyModifier::SHIFT, b"\x1b[Z"));
        t.add(plain(Backtab, b"\x1b[Z"));

        // Application keypad; must precede the generic Enter rows.
        for digit in 0..=9u8 {
            t.add(keypad(Character((b'0' + digit) as char), &[0x1b, b'O', b'p' + digit]));
        }
        for (c, code) in [('*', b'j'), ('+', b'k'), (',', b'l'), ('-', b'm'), ('.', b'n'), ('/', b'o')] {
            t.add(keypad(Character(c), &[0x1b, b'O', code]));
        }
        t.add(keypad(Enter, b"\x1bOM"));

        t.add(in_state(Enter, KeyboardState::NEWLINE, KeyboardState::NEWLINE, b"\r\n"));
        t.add(in_state(Enter, KeyboardState::empty(), KeyboardState::NEWLINE, b"\r"));
        t.add(plain(Backspace, b"\x7f"));

        // Shifted history navigation, primary screen only.
        t.add(command(Up, KeyCommand::ScrollLineUp));
        t.add(command(Down, KeyCommand::ScrollLineDown));
        t.add(command(PageUp, KeyCommand::ScrollPageUp));
        t.add(command(PageDown, KeyCommand::ScrollPageDown));
        t.add(command(Home, KeyCommand::ScrollUpToTop));
        t.add(command(End, KeyCommand::ScrollDownToBottom));

        // Cursor keys: VT52, ANSI and application variants, then the
        // xterm modified forms.
        for (key, letter) in [(Up, b'A'), (Down, b'B'), (Right, b'C'), (Left, b'D')] {
            t.add(in_state(key, KeyboardState::empty(), KeyboardState::ANSI, &[0x1b, letter]));
            t.add(in_state(
                key,
                KeyboardState::ANSI,
                KeyboardState::ANSI.union(KeyboardState::CURSOR_KEYS),
                &[0x1b, b'[', letter],
            ));
            t.add(in_state(
                key,
                KeyboardState::ANSI.union(KeyboardState::CURSOR_KEYS),
                KeyboardState::ANSI.union(KeyboardState::CURSOR_KEYS),
                &[0x1b, b'O', letter],
            ));
            t.add(wildcard(key, &[0x1b, b'[', b'1', b';', b'*', letter]));
        }

        // Editing pad.
        t.add(in_state(Home, KeyboardState::empty(), KeyboardState::CURSOR_KEYS, b"\x1b[H"));
        t.add(in_state(Home, KeyboardState::CURSOR_KEYS, KeyboardState::CURSOR_KEYS, b"\x1bOH"));
        t.add(wildcard(Home, b"\x1b[1;*H"));
        t.add(in_state(End, KeyboardState::empty(), KeyboardState::CURSOR_KEYS, b"\x1b[F"));
        t.add(in_state(End, KeyboardState::CURSOR_KEYS, KeyboardState::CURSOR_KEYS, b"\x1bOF"));
        t.add(wildcard(End, b"\x1b[1;*F"));
        for (key, code) in [(Insert, 2), (Delete, 3), (PageUp, 5), (PageDown, 6)] {
            t.add(plain(key, format!("\x1b[{code}~").as_bytes()));
            t.add(wildcard(key, format!("\x1b[{code};*~").as_bytes()));
        }

        // Function keys.
        for (n, letter) in [(1, b'P'), (2, b'Q'), (3, b'R'), (4, b'S')] {
            t.add(plain(F(n), &[0x1b, b'O', letter]));
            t.add(wildcard(F(n), &[0x1b, b'[', b'1', b';', b'*', letter]));
        }
        for (n, code) in [(5, 15), (6, 17), (7, 18), (8, 19), (9, 20), (10, 21), (11, 23), (12, 24)] {
            t.add(plain(F(n), format!("\x1b[{code}~").as_bytes()));
            t.add(wildcard(F(n), format!("\x1b[{code};*~").as_bytes()));
        }

        t
    }
}

fn plain(key: Key, text: &[u8]) -> KeyBinding {
    KeyBinding {
        key,
        modifiers: KeyModifier::empty(),
        modifier_mask: NO_MODS,
        state: KeyboardState::empty(),
        state_mask: KeyboardState::empty(),
        text: text.to_vec(),
        command: KeyCommand::None,
    }
}

fn modified(key: Key, modifiers: KeyModifier, text: &[u8]) -> KeyBinding {
    KeyBinding {
        modifiers,
        ..plain(key, text)
    }
}

fn in_state(key: Key, state: KeyboardState, state_mask: KeyboardState, text: &[u8]) -> KeyBinding {
    KeyBinding {
        state,
        state_mask,
        ..plain(key, text)
    }
}

/// Matches any remaining modifier combination; `*` in the text carries
/// the modifier parameter.
fn wildcard(key: Key, text: &[u8]) -> KeyBinding {
    KeyBinding {
        modifier_mask: KeyModifier::empty(),
        ..plain(key, text)
    }
}

/// Shift+key history navigation while the primary screen is shown.
fn command(key: Key, command: KeyCommand) -> KeyBinding {
    KeyBinding {
        key,
        modifiers: KeyModifier::SHIFT,
        modifier_mask: NO_MODS,
        state: KeyboardState::empty(),
        state_mask: KeyboardState::ALTERNATE_SCREEN,
        text: Vec::new(),
        command,
    }
}

/// xterm modifier parameter: 1 plus the modifier bitmap.
fn expand_template(text: &[u8], modifiers: KeyModifier, out: &mut Vec<u8>) {
    let mut code = 1;
    if modifiers.contains(KeyModifier::SHIFT) {
        code += 1;
    }
    if modifiers.contains(KeyModifier::ALT) {
        code += 2;
    }
    if modifiers.contains(KeyModifier::CTRL) {
        code += 4;
    }
    if modifiers.contains(KeyModifier::META) {
        code += 8;
    }
    for &byte in text {
        if byte == b'*' {
            out.extend(code.to_string().bytes());
        } else {
            out.push(byte);
        }
    }
}

const MISSING_TRANSLATOR_TEXT: &str = "No keyboard translator available. \
The information needed to convert key presses into characters to send to \
the terminal is missing.\r\n";

impl Emulator {
    /// Encode one key event and transmit it (unless the session is
    /// read-only).
    pub fn send_key_event(&mut self, host: &mut dyn TerminalHost, event: &KeyEvent) {
        // Flow-control side channel; does not suppress the key itself.
        if event.modifiers.contains(KeyModifier::CTRL) && !self.read_only {
            match event.key {
                Key::Character('s') | Key::Character('S') => host.flow_control_key_pressed(true),
                Key::Character('q') | Key::Character('Q') | Key::Character('c')
                | Key::Character('C') => host.flow_control_key_pressed(false),
                _ => {}
            }
        }

        if self.key_bindings.is_none() {
            self.reset(host);
            for cc in MISSING_TRANSLATOR_TEXT.chars() {
                self.receive_char(host, cc);
            }
            return;
        }

        let state = self.keyboard_state(event.modifiers);
        let mut out: Vec<u8> = Vec::new();
        let mut claims_alt = false;
        let mut claims_meta = false;
        let table = self.key_bindings.as_ref().unwrap();
        match table.find(event.key, event.modifiers, state) {
            Some(binding) => {
                claims_alt = binding.claims(KeyModifier::ALT);
                claims_meta = binding.claims(KeyModifier::META);
                match binding.command {
                    KeyCommand::None => {
                        if binding.text.is_empty() {
                            StreamDecoder::encode(self.codec, &event.text, &mut out);
                        } else {
                            expand_template(&binding.text, event.modifiers, &mut out);
                        }
                    }
                    KeyCommand::Erase => out.push(table.erase_char(state)),
                    KeyCommand::ScrollPageUp => return host.scroll_command(ScrollCommand::PageUp),
                    KeyCommand::ScrollPageDown => {
                        return host.scroll_command(ScrollCommand::PageDown)
                    }
                    KeyCommand::ScrollLineUp => return host.scroll_command(ScrollCommand::LineUp),
                    KeyCommand::ScrollLineDown => {
                        return host.scroll_command(ScrollCommand::LineDown)
                    }
                    KeyCommand::ScrollUpToTop => return host.scroll_command(ScrollCommand::ToTop),
                    KeyCommand::ScrollDownToBottom => {
                        return host.scroll_command(ScrollCommand::ToBottom)
                    }
                }
            }
            None => StreamDecoder::encode(self.codec, &event.text, &mut out),
        }

        if event.modifiers.contains(KeyModifier::ALT) && !claims_alt {
            out.insert(0, 0x1B);
        }
        if event.modifiers.contains(KeyModifier::META) && !claims_meta {
            out.splice(0..0, *b"\x18@s");
        }

        if !self.read_only && !out.is_empty() {
            host.send_data(&out);
        }
    }

    fn keyboard_state(&self, modifiers: KeyModifier) -> KeyboardState {
        let mut state = KeyboardState::empty();
        if self.modes.get(Mode::NewLine) {
            state |= KeyboardState::NEWLINE;
        }
        if self.modes.get(Mode::Ansi) {
            state |= KeyboardState::ANSI;
        }
        if self.modes.get(Mode::AppCuKeys) {
            state |= KeyboardState::CURSOR_KEYS;
        }
        if self.modes.get(Mode::AppScreen) {
            state |= KeyboardState::ALTERNATE_SCREEN;
        }
        if self.modes.get(Mode::AppKeyPad) && modifiers.contains(KeyModifier::KEYPAD) {
            state |= KeyboardState::APP_KEYPAD;
        }
        state
    }
}

fn keypad(key: Key, text: &[u8]) -> KeyBinding {
    KeyBinding {
        key,
        modifiers: KeyModifier::KEYPAD,
        modifier_mask: KeyModifier::KEYPAD,
        state: KeyboardState::APP_KEYPAD,
        state_mask: KeyboardState::APP_KEYPAD,
        text: text.to_vec(),
        command: KeyCommand::None,
    }
}
