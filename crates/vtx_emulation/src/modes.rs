//! Boolean terminal modes with a saved shadow copy.
//!
//! The side effects of a transition (screen switches, resize requests,
//! mutual exclusion of the mouse protocols) live in the emulator; this is
//! the plain storage both of them work against.

use crate::screen::ScreenMode;

/// Every mode the emulator tracks. The tail of the enumeration is the
/// screen-scoped group that is additionally forwarded to both screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Mode {
    /// ANSI vs VT52 sequence recognition.
    Ansi,
    /// Newline implies carriage return (LNM).
    NewLine,
    /// Cursor keys send application sequences (DECCKM).
    AppCuKeys,
    /// Keypad sends application sequences (DECKPAM).
    AppKeyPad,
    /// Alternate screen active.
    AppScreen,
    /// X11 press/release mouse reporting.
    Mouse1000,
    /// Highlight mouse tracking; accepted but otherwise inert.
    Mouse1001,
    /// Press/release/drag mouse reporting.
    Mouse1002,
    /// Full motion mouse reporting.
    Mouse1003,
    /// UTF-8 extended mouse coordinates.
    Mouse1005,
    /// SGR extended mouse coordinates.
    Mouse1006,
    /// Alternate scrolling of the history with the wheel.
    Mouse1007,
    /// URXVT extended mouse coordinates.
    Mouse1015,
    /// Focus in/out reporting.
    FocusEvents,
    /// 132-column line width (DECCOLM).
    Columns132,
    /// Whether DECCOLM may resize the screen.
    Allow132Columns,
    /// Paste wrapped in `ESC [ 200~` / `ESC [ 201~`.
    BracketedPaste,
    // Screen-scoped modes, forwarded to both screens.
    Cursor,
    Insert,
    Origin,
    Wrap,
    ReverseVideo,
}

pub(crate) const MODE_COUNT: usize = Mode::ReverseVideo as usize + 1;

pub(crate) const MOUSE_TRACKING_MODES: [Mode; 4] = [
    Mode::Mouse1000,
    Mode::Mouse1001,
    Mode::Mouse1002,
    Mode::Mouse1003,
];

pub(crate) const MOUSE_ENCODING_MODES: [Mode; 3] =
    [Mode::Mouse1005, Mode::Mouse1006, Mode::Mouse1015];

impl Mode {
    /// The screen-local counterpart for modes the screens track themselves.
    /// `NewLine` is both a keyboard concern and a screen concern, so it
    /// appears here as well.
    pub(crate) fn screen_mode(self) -> Option<ScreenMode> {
        match self {
            Mode::Cursor => Some(ScreenMode::Cursor),
            Mode::Insert => Some(ScreenMode::Insert),
            Mode::Origin => Some(ScreenMode::Origin),
            Mode::Wrap => Some(ScreenMode::Wrap),
            Mode::ReverseVideo => Some(ScreenMode::ReverseVideo),
            Mode::NewLine => Some(ScreenMode::NewLine),
            _ => None,
        }
    }
}

/// Current and saved value per mode.
#[derive(Debug, Clone)]
pub struct ModeSet {
    current: [bool; MODE_COUNT],
    saved: [bool; MODE_COUNT],
}

impl Default for ModeSet {
    fn default() -> Self {
        let mut modes = ModeSet {
            current: [false; MODE_COUNT],
            saved: [false; MODE_COUNT],
        };
        modes.current[Mode::Ansi as usize] = true;
        modes.current[Mode::Wrap as usize] = true;
        modes
    }
}

impl ModeSet {
    pub fn get(&self, mode: Mode) -> bool {
        self.current[mode as usize]
    }

    pub fn set(&mut self, mode: Mode, value: bool) {
        self.current[mode as usize] = value;
    }

    pub fn save(&mut self, mode: Mode) {
        self.saved[mode as usize] = self.current[mode as usize];
    }

    pub fn saved(&self, mode: Mode) -> bool {
        self.saved[mode as usize]
    }
}
