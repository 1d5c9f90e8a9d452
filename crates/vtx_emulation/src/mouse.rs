//! Pointer and focus reporting toward the child process.

use crate::emulator::Emulator;
use crate::host::TerminalHost;
use crate::modes::Mode;

/// What happened to the pointer. The numeric values follow the classic
/// encoding (press 0, drag 1, release 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press = 0,
    Drag = 1,
    Release = 2,
}

impl Emulator {
    /// Encode one pointer event. `cb` is the button/wheel code (0..=2
    /// buttons, 4+ wheel), `cx`/`cy` the 1-based cell position. The caller
    /// is expected to consult `mouse_tracking_requested` before routing
    /// pointer events here at all.
    pub fn send_mouse_event(
        &mut self,
        host: &mut dyn TerminalHost,
        cb: i32,
        cx: i32,
        cy: i32,
        kind: MouseEventKind,
    ) {
        if self.read_only || cx < 1 || cy < 1 {
            return;
        }
        // Press/release-only protocol: no drag reports.
        if kind == MouseEventKind::Drag && self.modes.get(Mode::Mouse1000) {
            return;
        }

        let mut cb = cb;
        // Outside the SGR protocol the released button is not
        // distinguishable; a release marker replaces it.
        if kind == MouseEventKind::Release && !self.modes.get(Mode::Mouse1006) {
            cb = 3;
        }
        // The button-event protocol does not report the release marker.
        if cb == 3 && self.modes.get(Mode::Mouse1002) {
            return;
        }
        if cb >= 4 {
            cb += 0x3C;
        }
        if (self.modes.get(Mode::Mouse1002) || self.modes.get(Mode::Mouse1003))
            && kind == MouseEventKind::Drag
        {
            cb += 0x20;
        }

        // Encoding preference: 1006 > 1015 > 1005 > X10.
        if self.modes.get(Mode::Mouse1006) {
            let final_char = if kind == MouseEventKind::Release { 'm' } else { 'M' };
            host.send_data(format!("\x1b[<{cb};{cx};{cy}{final_char}").as_bytes());
        } else if self.modes.get(Mode::Mouse1015) {
            host.send_data(format!("\x1b[{};{cx};{cy}M", cb + 0x20).as_bytes());
        } else if self.modes.get(Mode::Mouse1005) {
            if cx <= 2015 && cy <= 2015 {
                // Coordinates above 95 become two-byte UTF-8.
                let mut reply = String::from("\x1b[M");
                for value in [cb + 0x20, cx + 0x20, cy + 0x20] {
                    if let Some(encoded) = char::from_u32(value as u32) {
                        reply.push(encoded);
                    }
                }
                host.send_data(reply.as_bytes());
            }
        } else if cx <= 223 && cy <= 223 {
            host.send_data(&[
                0x1B,
                b'[',
                b'M',
                (cb + 0x20) as u8,
                (cx + 0x20) as u8,
                (cy + 0x20) as u8,
            ]);
        }
    }

    /// Focus reporting (`CSI I` / `CSI O`), gated by the focus-events mode.
    pub fn focus_changed(&mut self, host: &mut dyn TerminalHost, focused: bool) {
        if self.modes.get(Mode::FocusEvents) {
            host.send_data(if focused { b"\x1b[I" } else { b"\x1b[O" });
        }
    }
}
