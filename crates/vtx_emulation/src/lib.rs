//! VT102/xterm terminal emulation core.
//!
//! [`Emulator`] consumes the child process byte stream (through
//! [`vtx_parser_core`]'s tokenizer), applies the semantics to an abstract
//! [`Screen`] pair, encodes keyboard/mouse/focus input, and synthesizes
//! device reports. Rendering, screen storage and PTY plumbing live in the
//! embedding program, wired up through the [`Screen`] and [`TerminalHost`]
//! traits.

mod charset;
pub use charset::CharsetState;

mod codec;
pub use codec::Codec;

mod commands;

mod emulator;
pub use emulator::Emulator;

mod host;
pub use host::{CursorShape, ScrollCommand, TerminalHost};

mod keyboard;
pub use keyboard::{
    Key, KeyBinding, KeyBindingTable, KeyCommand, KeyEvent, KeyModifier, KeyboardState,
};

mod modes;
pub use modes::{Mode, ModeSet};

mod mouse;
pub use mouse::MouseEventKind;

mod screen;
pub use screen::{CellSnapshot, ColorSpace, LineProperty, Rendition, Screen, ScreenMode};

mod session;
pub use session::{attributes, FlushTimer, ManualFlushTimer, ATTRIBUTE_FLUSH_DELAY};

pub use vtx_parser_core::{OscTerminator, ParseError};

#[cfg(test)]
mod test_support;
