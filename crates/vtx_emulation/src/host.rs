//! Outbound interface: bytes for the child process and discrete events for
//! the embedding program.

use vtx_parser_core::{OscTerminator, ParseError};

/// Cursor shapes selectable through DECSCUSR and profile changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Block,
    Underline,
    Beam,
}

impl CursorShape {
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(CursorShape::Block),
            1 => Some(CursorShape::Underline),
            2 => Some(CursorShape::Beam),
            _ => None,
        }
    }
}

/// History-navigation commands bound to keys (the view applies them; the
/// emulation core has no notion of a viewport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    PageUp,
    PageDown,
    LineUp,
    LineDown,
    ToTop,
    ToBottom,
}

/// Event receiver for everything the emulator produces besides screen
/// mutations. All methods except [`send_data`](TerminalHost::send_data)
/// default to no-ops so hosts only implement what they care about.
pub trait TerminalHost {
    /// Bytes for the child process (replies, encoded input).
    fn send_data(&mut self, data: &[u8]);

    fn bell(&mut self) {}

    /// The application asked for a terminal resize (xterm window ops).
    fn image_resize_request(&mut self, _columns: i32, _lines: i32) {}

    fn set_cursor_style_request(&mut self, _shape: CursorShape, _blinking: bool) {}

    fn reset_cursor_style_request(&mut self) {}

    /// A mouse-tracking mode was enabled or disabled.
    fn mouse_tracking_requested(&mut self, _enabled: bool) {}

    fn bracketed_paste_mode_changed(&mut self, _enabled: bool) {}

    fn alternate_scrolling_changed(&mut self, _enabled: bool) {}

    /// Coalesced OSC attribute update.
    fn session_attribute_changed(&mut self, _id: i32, _value: &str) {}

    /// The application queried an attribute (`Pv == "?"`); reply with the
    /// same terminator.
    fn session_attribute_request(&mut self, _id: i32, _terminator: OscTerminator) {}

    /// Ctrl+S / Ctrl+Q / Ctrl+C pressed; `true` means suspend output.
    fn flow_control_key_pressed(&mut self, _suspend: bool) {}

    fn scroll_command(&mut self, _command: ScrollCommand) {}

    /// OSC 8 boundary: a non-empty URL opens a link span, an empty one
    /// closes it.
    fn hyperlink(&mut self, _url: &str) {}

    fn report_error(&mut self, _error: &ParseError) {}
}
