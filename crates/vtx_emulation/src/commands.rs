//! Reply generators for the device queries. Every reply is a plain 7-bit
//! byte string pushed through [`TerminalHost::send_data`].

use crate::emulator::Emulator;
use crate::host::{CursorShape, TerminalHost};
use crate::modes::Mode;
#[cfg(feature = "checksum-report")]
use crate::screen::Rendition;
use crate::screen::ScreenMode;

impl Emulator {
    /// Sequence: `CSI Ps c` or `ESC Z`</p>
    /// Mnemonic: DA1 / DECID</p>
    /// Description: Primary device attributes</p>
    ///
    /// Identifies as a VT100 with advanced video option, or as a VT52 when
    /// ANSI mode is off.
    pub(crate) fn report_terminal_type(&mut self, host: &mut dyn TerminalHost) {
        if self.modes.get(Mode::Ansi) {
            host.send_data(b"\x1b[?1;2c");
        } else {
            host.send_data(b"\x1b/Z");
        }
    }

    /// Sequence: `CSI > c`</p>
    /// Mnemonic: DA2</p>
    /// Description: Secondary device attributes</p>
    pub(crate) fn report_secondary_attributes(&mut self, host: &mut dyn TerminalHost) {
        host.send_data(b"\x1b[>0;115;0c");
    }

    /// Sequence: `CSI = c`</p>
    /// Mnemonic: DA3</p>
    /// Description: Tertiary device attributes</p>
    ///
    /// The reply carries a fixed site/serial identification in a DCS
    /// envelope.
    pub(crate) fn report_tertiary_attributes(&mut self, host: &mut dyn TerminalHost) {
        host.send_data(b"\x1bP!|7E4B4445\x1b\\");
    }

    /// Sequence: `CSI 5 n`</p>
    /// Mnemonic: DSR</p>
    /// Description: Operating status report ("no malfunction")</p>
    pub(crate) fn report_status(&mut self, host: &mut dyn TerminalHost) {
        host.send_data(b"\x1b[0n");
    }

    /// Sequence: `CSI 6 n`</p>
    /// Mnemonic: CPR</p>
    /// Description: Cursor position report, 1-based</p>
    ///
    /// In origin mode the row is reported relative to the top margin.
    pub(crate) fn report_cursor_position(&mut self, host: &mut dyn TerminalHost) {
        let screen = self.screen_ref();
        let mut y = screen.cursor_y() + 1;
        let x = screen.cursor_x() + 1;
        if screen.get_mode(ScreenMode::Origin) {
            y -= screen.top_margin();
        }
        host.send_data(format!("\x1b[{y};{x}R").as_bytes());
    }

    /// Sequence: `CSI 18 t`</p>
    /// Description: Report the text-area size in characters</p>
    pub(crate) fn report_size(&mut self, host: &mut dyn TerminalHost) {
        let screen = self.screen_ref();
        host.send_data(format!("\x1b[8;{};{}t", screen.lines(), screen.columns()).as_bytes());
    }

    /// Sequence: `CSI Ps x`</p>
    /// Mnemonic: DECREQTPARM</p>
    /// Description: Terminal parameters report</p>
    ///
    /// No parity, 8 bits per character, 19200 baud both ways.
    pub(crate) fn report_terminal_params(&mut self, host: &mut dyn TerminalHost, solicited: i32) {
        host.send_data(format!("\x1b[{solicited};1;1;112;112;1;0x").as_bytes());
    }

    /// Sequence: `CSI Ps SP q`</p>
    /// Mnemonic: DECSCUSR</p>
    /// Description: Select the cursor style</p>
    pub(crate) fn set_cursor_style(&mut self, host: &mut dyn TerminalHost, n: u16) {
        match n {
            0 => host.reset_cursor_style_request(),
            1 => host.set_cursor_style_request(CursorShape::Block, true),
            2 => host.set_cursor_style_request(CursorShape::Block, false),
            3 => host.set_cursor_style_request(CursorShape::Underline, true),
            4 => host.set_cursor_style_request(CursorShape::Underline, false),
            5 => host.set_cursor_style_request(CursorShape::Beam, true),
            6 => host.set_cursor_style_request(CursorShape::Beam, false),
            _ => self.unhandled(
                host,
                vtx_parser_core::Token::CsiPsp {
                    final_byte: b'q',
                    n,
                },
            ),
        }
    }

    /// Sequence: `CSI Pid ; Pp ; Pt ; Pl ; Pb ; Pr * y`</p>
    /// Mnemonic: DECRQCRA</p>
    /// Description: Checksum of a rectangular area</p>
    ///
    /// Per cell the character value contributes (0x20 for concealed
    /// cells), plus 0x80 for bold, 0x40 for blink, 0x20 for reverse and
    /// 0x10 for underline. The reply carries the two's complement of the
    /// sum, clipped to 16 bits, as four uppercase hex digits.
    #[cfg(feature = "checksum-report")]
    pub(crate) fn report_checksum_of_rectangular_area(
        &mut self,
        host: &mut dyn TerminalHost,
        args: &[i32],
    ) {
        let screen = self.screen_ref();
        let lines = screen.lines();
        let columns = screen.columns();

        let id = args.first().copied().unwrap_or(0);
        let page = args.get(1).copied().unwrap_or(0);
        if page > 1 {
            return;
        }
        let arg_or = |index: usize, default: i32| match args.get(index) {
            Some(&value) if value != 0 => value,
            _ => default,
        };
        let mut top = arg_or(2, 1).max(1);
        let left = arg_or(3, 1).max(1);
        let mut bottom = arg_or(4, lines);
        let right = arg_or(5, columns).min(columns);

        if screen.get_mode(ScreenMode::Origin) {
            let margin = screen.top_margin();
            top += margin;
            bottom += margin;
        }
        bottom = bottom.min(lines);
        if top > bottom || left > right {
            return;
        }

        let mut sum: u32 = 0;
        for y in top..=bottom {
            for x in left..=right {
                let cell = screen.cell(y - 1, x - 1);
                let value = if cell.rendition.contains(Rendition::CONCEAL) {
                    0x20
                } else {
                    cell.character as u32
                };
                sum = sum.wrapping_add(value);
                if cell.rendition.contains(Rendition::BOLD) {
                    sum = sum.wrapping_add(0x80);
                }
                if cell.rendition.contains(Rendition::BLINK) {
                    sum = sum.wrapping_add(0x40);
                }
                if cell.rendition.contains(Rendition::REVERSE) {
                    sum = sum.wrapping_add(0x20);
                }
                if cell.rendition.contains(Rendition::UNDERLINE) {
                    sum = sum.wrapping_add(0x10);
                }
            }
        }
        let checksum = sum.wrapping_neg() & 0xFFFF;
        host.send_data(format!("\x1bP{id}!~{checksum:04X}\x1b\\").as_bytes());
    }
}
