//! The emulation core: token dispatch, mode transitions, screen switching.
//!
//! Useful references: <https://vt100.net/docs/vt102-ug/chapter5.html> and
//! <https://invisible-island.net/xterm/ctlseqs/ctlseqs.html>

use std::collections::BTreeMap;

use vtx_parser_core::{OscTerminator, ParseError, Token, TokenSink, Tokenizer};

use crate::charset::CharsetState;
use crate::codec::{Codec, StreamDecoder};
use crate::host::TerminalHost;
use crate::keyboard::KeyBindingTable;
use crate::modes::{Mode, ModeSet, MOUSE_ENCODING_MODES, MOUSE_TRACKING_MODES};
use crate::screen::{ColorSpace, LineProperty, Rendition, Screen, ScreenMode};
use crate::session::FlushTimer;

/// Everything the tokenizer can hand over for one input character.
pub(crate) enum TokenEvent {
    Token(Token),
    Osc(String, OscTerminator),
    Checksum(Vec<i32>),
    Error(ParseError),
}

struct CollectSink<'a> {
    out: &'a mut Vec<TokenEvent>,
}

impl TokenSink for CollectSink<'_> {
    fn token(&mut self, token: Token) {
        self.out.push(TokenEvent::Token(token));
    }

    fn osc(&mut self, body: &str, terminator: OscTerminator) {
        self.out.push(TokenEvent::Osc(body.to_string(), terminator));
    }

    fn checksum_request(&mut self, args: &[i32]) {
        self.out.push(TokenEvent::Checksum(args.to_vec()));
    }

    fn report_error(&mut self, error: ParseError) {
        self.out.push(TokenEvent::Error(error));
    }
}

/// A VT102/xterm emulation core driving two [`Screen`]s (primary and
/// alternate) and reporting everything else through a [`TerminalHost`].
///
/// Single-threaded by design: the PTY byte stream, the input encoders and
/// the attribute-flush timer callback must all run on the owning thread.
pub struct Emulator {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) modes: ModeSet,
    pub(crate) charsets: [CharsetState; 2],
    screens: [Box<dyn Screen>; 2],
    pub(crate) current_screen: usize,
    pub(crate) codec: Codec,
    decoder: StreamDecoder,
    pub(crate) key_bindings: Option<KeyBindingTable>,
    pub(crate) read_only: bool,
    pub(crate) pending_attributes: BTreeMap<i32, String>,
    pub(crate) flush_timer: Box<dyn FlushTimer>,
    scratch_events: Vec<TokenEvent>,
    scratch_chars: Vec<char>,
}

impl Emulator {
    pub fn new(
        primary: Box<dyn Screen>,
        alternate: Box<dyn Screen>,
        flush_timer: Box<dyn FlushTimer>,
    ) -> Self {
        Emulator {
            tokenizer: Tokenizer::new(),
            modes: ModeSet::default(),
            charsets: [CharsetState::default(); 2],
            screens: [primary, alternate],
            current_screen: 0,
            codec: Codec::default(),
            decoder: StreamDecoder::default(),
            key_bindings: Some(KeyBindingTable::default_table()),
            read_only: false,
            pending_attributes: BTreeMap::new(),
            flush_timer,
            scratch_events: Vec::new(),
            scratch_chars: Vec::new(),
        }
    }

    pub fn screen(&mut self) -> &mut dyn Screen {
        self.screens[self.current_screen].as_mut()
    }

    pub fn screen_ref(&self) -> &dyn Screen {
        self.screens[self.current_screen].as_ref()
    }

    pub fn using_alternate_screen(&self) -> bool {
        self.current_screen == 1
    }

    pub fn get_mode(&self, mode: Mode) -> bool {
        self.modes.get(mode)
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Swap the stream codec; any partially decoded multi-byte sequence is
    /// dropped.
    pub fn set_codec(&mut self, codec: Codec) {
        self.codec = codec;
        self.decoder.reset();
    }

    /// `None` disables key encoding entirely; the next key press will put
    /// an error message on the screen instead.
    pub fn set_key_bindings(&mut self, table: Option<KeyBindingTable>) {
        self.key_bindings = table;
    }

    /// Read-only sessions never transmit to the child.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Raw bytes from the child process.
    pub fn receive_bytes(&mut self, host: &mut dyn TerminalHost, data: &[u8]) {
        let mut chars = std::mem::take(&mut self.scratch_chars);
        chars.clear();
        self.decoder.decode(self.codec, data, &mut chars);
        for i in 0..chars.len() {
            self.receive_char(host, chars[i]);
        }
        self.scratch_chars = chars;
    }

    /// One already-decoded code point from the child process.
    pub fn receive_char(&mut self, host: &mut dyn TerminalHost, cc: char) {
        let mut events = std::mem::take(&mut self.scratch_events);
        events.clear();
        self.tokenizer.advance(cc, &mut CollectSink { out: &mut events });
        for event in events.drain(..) {
            self.dispatch_event(host, event);
        }
        self.scratch_events = events;
    }

    fn dispatch_event(&mut self, host: &mut dyn TerminalHost, event: TokenEvent) {
        match event {
            TokenEvent::Token(token) => self.dispatch_token(host, token),
            TokenEvent::Osc(body, terminator) => {
                self.process_session_attribute(host, &body, terminator);
            }
            TokenEvent::Checksum(args) => {
                #[cfg(feature = "checksum-report")]
                self.report_checksum_of_rectangular_area(host, &args);
                #[cfg(not(feature = "checksum-report"))]
                let _ = args;
            }
            TokenEvent::Error(error) => host.report_error(&error),
        }
    }

    fn dispatch_token(&mut self, host: &mut dyn TerminalHost, token: Token) {
        match token {
            Token::Chr(c) => {
                let translated = self.charsets[self.current_screen].apply(c);
                self.screen().display_character(translated);
            }
            Token::Ctl(c) => self.dispatch_control(host, c),
            Token::Esc(f) => self.dispatch_escape(host, f),
            Token::EscCs { inter, designator } => self.dispatch_charset(host, inter, designator),
            Token::EscDe(f) => self.dispatch_line_attributes(host, f),
            Token::CsiPs { final_byte, n, p, q } => self.dispatch_csi_ps(host, final_byte, n, p, q),
            Token::CsiPn { final_byte, p, q } => self.dispatch_csi_pn(host, final_byte, p, q),
            Token::CsiPr { final_byte, n } => self.dispatch_private(host, final_byte, n),
            Token::CsiPe(b'p') => self.soft_reset(),
            Token::CsiSp(b'q') => host.reset_cursor_style_request(),
            Token::CsiPsp {
                final_byte: b'q',
                n,
            } => self.set_cursor_style(host, n),
            Token::CsiPq {
                final_byte: b'c',
                n: 0,
            } => self.report_tertiary_attributes(host),
            Token::CsiPg {
                final_byte: b'c',
                n: 0,
            } => self.report_secondary_attributes(host),
            Token::Vt52 { final_byte, p, q } => self.dispatch_vt52(host, final_byte, p, q),
            _ => self.unhandled(host, token),
        }
    }

    fn dispatch_control(&mut self, host: &mut dyn TerminalHost, c: u8) {
        match c {
            0x07 => host.bell(),
            0x08 => self.screen().backspace(),
            0x09 => self.screen().tab(1),
            0x0A | 0x0B | 0x0C => self.screen().new_line(),
            0x0D => self.screen().to_start_of_line(),
            0x0E => self.use_charset(1),
            0x0F => self.use_charset(0),
            // CAN and SUB already aborted the sequence in the tokenizer;
            // the remaining controls have no effect here.
            _ => {}
        }
    }

    fn dispatch_escape(&mut self, host: &mut dyn TerminalHost, f: u8) {
        match f {
            b'D' => self.screen().index(),
            b'E' => self.screen().next_line(),
            b'H' => self.screen().change_tab_stop(true),
            b'M' => self.screen().reverse_index(),
            b'Z' => self.report_terminal_type(host),
            b'c' => self.reset(host),
            b'n' => self.use_charset(2),
            b'o' => self.use_charset(3),
            b'7' => self.save_cursor(),
            b'8' => self.restore_cursor(),
            b'=' => self.set_mode(host, Mode::AppKeyPad),
            b'>' => self.reset_mode(host, Mode::AppKeyPad),
            b'<' => self.set_mode(host, Mode::Ansi),
            _ => self.unhandled(host, Token::Esc(f)),
        }
    }

    fn dispatch_charset(&mut self, host: &mut dyn TerminalHost, inter: u8, designator: u8) {
        match inter {
            b'(' => self.set_charset(0, designator),
            b')' => self.set_charset(1, designator),
            b'*' => self.set_charset(2, designator),
            b'+' => self.set_charset(3, designator),
            b'%' => match designator {
                b'G' => self.set_codec(Codec::Utf8),
                b'@' => self.set_codec(Codec::Locale),
                _ => self.unhandled(host, Token::EscCs { inter, designator }),
            },
            _ => self.unhandled(host, Token::EscCs { inter, designator }),
        }
    }

    fn dispatch_line_attributes(&mut self, host: &mut dyn TerminalHost, f: u8) {
        match f {
            b'3' => {
                self.screen().set_line_property(LineProperty::DoubleWidth, true);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightTop, true);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightBottom, false);
            }
            b'4' => {
                self.screen().set_line_property(LineProperty::DoubleWidth, true);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightTop, false);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightBottom, true);
            }
            b'5' => {
                self.screen().set_line_property(LineProperty::DoubleWidth, false);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightTop, false);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightBottom, false);
            }
            b'6' => {
                self.screen().set_line_property(LineProperty::DoubleWidth, true);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightTop, false);
                self.screen()
                    .set_line_property(LineProperty::DoubleHeightBottom, false);
            }
            b'8' => self.screen().help_align(),
            _ => self.unhandled(host, Token::EscDe(f)),
        }
    }

    fn dispatch_csi_ps(&mut self, host: &mut dyn TerminalHost, final_byte: u8, n: u16, p: i32, q: i32) {
        match (final_byte, n) {
            (b'K', 0) => self.screen().clear_to_end_of_line(),
            (b'K', 1) => self.screen().clear_to_begin_of_line(),
            (b'K', 2) => self.screen().clear_entire_line(),
            (b'J', 0) => self.screen().clear_to_end_of_screen(),
            (b'J', 1) => self.screen().clear_to_begin_of_screen(),
            // 3 also clears the history where the screen keeps one.
            (b'J', 2 | 3) => self.screen().clear_entire_screen(),
            (b'g', 0) => self.screen().change_tab_stop(false),
            (b'g', 3) => self.screen().clear_tab_stops(),
            (b'h', 4) => self.set_mode(host, Mode::Insert),
            (b'h', 20) => self.set_mode(host, Mode::NewLine),
            (b'l', 4) => self.reset_mode(host, Mode::Insert),
            (b'l', 20) => self.reset_mode(host, Mode::NewLine),
            (b's', 0) => self.save_cursor(),
            (b'u', 0) => self.restore_cursor(),
            (b'n', 5) => self.report_status(host),
            (b'n', 6) => self.report_cursor_position(host),
            // DECLL: keyboard LEDs are not emulated.
            (b'q', _) => {}
            (b'x', 0) => self.report_terminal_params(host, 2),
            (b'x', 1) => self.report_terminal_params(host, 3),
            (b't', 8) => self.resize_image(host, p, q),
            (b't', 18) => self.report_size(host),
            (b'm', _) => self.dispatch_rendition(host, n, p, q),
            _ => self.unhandled(host, Token::CsiPs { final_byte, n, p, q }),
        }
    }

    fn dispatch_rendition(&mut self, host: &mut dyn TerminalHost, n: u16, p: i32, q: i32) {
        match n {
            0 => self.screen().set_default_rendition(),
            1 => self.screen().set_rendition(Rendition::BOLD),
            2 => self.screen().set_rendition(Rendition::FAINT),
            3 => self.screen().set_rendition(Rendition::ITALIC),
            4 => self.screen().set_rendition(Rendition::UNDERLINE),
            5 | 6 => self.screen().set_rendition(Rendition::BLINK),
            7 => self.screen().set_rendition(Rendition::REVERSE),
            8 => self.screen().set_rendition(Rendition::CONCEAL),
            9 => self.screen().set_rendition(Rendition::STRIKEOUT),
            // Font selection; glyph mapping is the display's business.
            10..=12 => {}
            53 => self.screen().set_rendition(Rendition::OVERLINE),
            21 => self.screen().reset_rendition(Rendition::BOLD),
            22 => self
                .screen()
                .reset_rendition(Rendition::BOLD | Rendition::FAINT),
            23 => self.screen().reset_rendition(Rendition::ITALIC),
            24 => self.screen().reset_rendition(Rendition::UNDERLINE),
            25 => self.screen().reset_rendition(Rendition::BLINK),
            27 => self.screen().reset_rendition(Rendition::REVERSE),
            28 => self.screen().reset_rendition(Rendition::CONCEAL),
            29 => self.screen().reset_rendition(Rendition::STRIKEOUT),
            55 => self.screen().reset_rendition(Rendition::OVERLINE),
            30..=37 => self
                .screen()
                .set_fore_color(ColorSpace::System, i32::from(n) - 30),
            38 => match p {
                5 => self.screen().set_fore_color(ColorSpace::Indexed, q),
                2 => self.screen().set_fore_color(ColorSpace::Rgb, q),
                _ => self.unhandled(host, Token::CsiPs { final_byte: b'm', n, p, q }),
            },
            39 => self.screen().set_fore_color(ColorSpace::Default, 0),
            40..=47 => self
                .screen()
                .set_back_color(ColorSpace::System, i32::from(n) - 40),
            48 => match p {
                5 => self.screen().set_back_color(ColorSpace::Indexed, q),
                2 => self.screen().set_back_color(ColorSpace::Rgb, q),
                _ => self.unhandled(host, Token::CsiPs { final_byte: b'm', n, p, q }),
            },
            49 => self.screen().set_back_color(ColorSpace::Default, 0),
            90..=97 => self
                .screen()
                .set_fore_color(ColorSpace::System, i32::from(n) - 90 + 8),
            100..=107 => self
                .screen()
                .set_back_color(ColorSpace::System, i32::from(n) - 100 + 8),
            _ => self.unhandled(host, Token::CsiPs { final_byte: b'm', n, p, q }),
        }
    }

    fn dispatch_csi_pn(&mut self, host: &mut dyn TerminalHost, final_byte: u8, p: i32, q: i32) {
        match final_byte {
            b'@' => self.screen().insert_chars(one(p)),
            b'A' => self.screen().cursor_up(one(p)),
            b'B' => self.screen().cursor_down(one(p)),
            b'C' => self.screen().cursor_right(one(p)),
            b'D' => self.screen().cursor_left(one(p)),
            b'E' => {
                self.screen().cursor_down(one(p));
                self.screen().to_start_of_line();
            }
            b'F' => {
                self.screen().cursor_up(one(p));
                self.screen().to_start_of_line();
            }
            b'G' => self.screen().set_cursor_x(one(p)),
            b'H' | b'f' => self.screen().set_cursor_yx(one(p), one(q)),
            b'I' => self.screen().tab(one(p)),
            b'L' => self.screen().insert_lines(one(p)),
            b'M' => self.screen().delete_lines(one(p)),
            b'P' => self.screen().delete_chars(one(p)),
            b'S' => self.screen().scroll_up(one(p)),
            b'T' => self.screen().scroll_down(one(p)),
            b'X' => self.screen().erase_chars(one(p)),
            b'Z' => self.screen().backtab(one(p)),
            b'b' => self.screen().repeat_chars(one(p)),
            // DA1; the parameter is ignored as on the hardware.
            b'c' => self.report_terminal_type(host),
            b'd' => self.screen().set_cursor_y(one(p)),
            b'r' => {
                if p == 0 && q == 0 {
                    self.screen().set_default_margins();
                } else {
                    let bottom = if q == 0 { self.screen_ref().lines() } else { q };
                    self.screen().set_margins(one(p), bottom);
                }
            }
            _ => self.unhandled(host, Token::CsiPn { final_byte, p, q }),
        }
    }

    fn dispatch_private(&mut self, host: &mut dyn TerminalHost, final_byte: u8, n: u16) {
        match final_byte {
            b'h' => self.set_private_mode(host, n),
            b'l' => self.reset_private_mode(host, n),
            b's' => {
                if let Some(mode) = private_mode(n) {
                    self.modes.save(mode);
                    if let Some(screen_mode) = mode.screen_mode() {
                        self.screens[0].save_mode(screen_mode);
                        self.screens[1].save_mode(screen_mode);
                    }
                }
            }
            b'r' => {
                if let Some(mode) = private_mode(n) {
                    if let Some(screen_mode) = mode.screen_mode() {
                        self.screens[0].restore_mode(screen_mode);
                        self.screens[1].restore_mode(screen_mode);
                    }
                    if self.modes.saved(mode) {
                        self.set_mode(host, mode);
                    } else {
                        self.reset_mode(host, mode);
                    }
                }
            }
            _ => self.unhandled(host, Token::CsiPr { final_byte, n }),
        }
    }

    fn set_private_mode(&mut self, host: &mut dyn TerminalHost, n: u16) {
        match n {
            // Smooth scroll, autorepeat and cursor blink are left to the
            // display layer.
            4 | 8 | 12 => {}
            5 => self.set_mode(host, Mode::ReverseVideo),
            1047 => self.set_mode(host, Mode::AppScreen),
            1048 => self.save_cursor(),
            1049 => {
                self.save_cursor();
                self.screens[1].clear_entire_screen();
                self.set_mode(host, Mode::AppScreen);
            }
            _ => {
                if let Some(mode) = private_mode(n) {
                    self.set_mode(host, mode);
                } else {
                    self.unhandled(host, Token::CsiPr { final_byte: b'h', n });
                }
            }
        }
    }

    fn reset_private_mode(&mut self, host: &mut dyn TerminalHost, n: u16) {
        match n {
            4 | 8 | 12 => {}
            5 => self.reset_mode(host, Mode::ReverseVideo),
            1047 => {
                // The alternate screen keeps no history; leaving it wipes
                // its contents.
                if self.modes.get(Mode::AppScreen) {
                    self.screens[1].clear_entire_screen();
                }
                self.reset_mode(host, Mode::AppScreen);
            }
            1048 => self.restore_cursor(),
            1049 => {
                self.reset_mode(host, Mode::AppScreen);
                self.restore_cursor();
            }
            _ => {
                if let Some(mode) = private_mode(n) {
                    self.reset_mode(host, mode);
                } else {
                    self.unhandled(host, Token::CsiPr { final_byte: b'l', n });
                }
            }
        }
    }

    fn dispatch_vt52(&mut self, host: &mut dyn TerminalHost, f: u8, p: i32, q: i32) {
        match f {
            b'A' => self.screen().cursor_up(1),
            b'B' => self.screen().cursor_down(1),
            b'C' => self.screen().cursor_right(1),
            b'D' => self.screen().cursor_left(1),
            b'F' => self.set_and_use_charset(0, b'0'),
            b'G' => self.set_and_use_charset(0, b'B'),
            b'H' => self.screen().set_cursor_yx(1, 1),
            b'I' => self.screen().reverse_index(),
            b'J' => self.screen().clear_to_end_of_screen(),
            b'K' => self.screen().clear_to_end_of_line(),
            // Coordinates arrive as raw bytes offset by 0x20, 1-based.
            b'Y' => self.screen().set_cursor_yx(p - 31, q - 31),
            b'Z' => host.send_data(b"\x1b/Z"),
            b'<' => self.set_mode(host, Mode::Ansi),
            b'=' => self.set_mode(host, Mode::AppKeyPad),
            b'>' => self.reset_mode(host, Mode::AppKeyPad),
            _ => self.unhandled(host, Token::Vt52 { final_byte: f, p, q }),
        }
    }

    /// Set a mode, applying its transition side effects.
    pub fn set_mode(&mut self, host: &mut dyn TerminalHost, mode: Mode) {
        match mode {
            Mode::Columns132 => {
                if self.modes.get(Mode::Allow132Columns) {
                    self.clear_screen_and_set_columns(host, 132);
                } else {
                    // Resizing is not permitted; the mode is not recorded.
                    return;
                }
            }
            Mode::Ansi => self.tokenizer.set_ansi_mode(true),
            m if MOUSE_TRACKING_MODES.contains(&m) => {
                for tracking in MOUSE_TRACKING_MODES {
                    self.modes.set(tracking, false);
                }
                host.mouse_tracking_requested(true);
            }
            m if MOUSE_ENCODING_MODES.contains(&m) => {
                for encoding in MOUSE_ENCODING_MODES {
                    self.modes.set(encoding, false);
                }
            }
            Mode::Mouse1007 => host.alternate_scrolling_changed(true),
            Mode::BracketedPaste => host.bracketed_paste_mode_changed(true),
            Mode::AppScreen => {
                self.screens[1].clear_selection();
                self.screens[1].set_default_rendition();
                self.current_screen = 1;
            }
            _ => {}
        }
        self.modes.set(mode, true);
        if let Some(screen_mode) = mode.screen_mode() {
            self.screens[0].set_mode(screen_mode);
            self.screens[1].set_mode(screen_mode);
        }
    }

    /// Reset a mode, applying its transition side effects.
    pub fn reset_mode(&mut self, host: &mut dyn TerminalHost, mode: Mode) {
        match mode {
            Mode::Columns132 => {
                if self.modes.get(Mode::Allow132Columns) {
                    self.clear_screen_and_set_columns(host, 80);
                }
            }
            Mode::Ansi => self.tokenizer.set_ansi_mode(false),
            m if MOUSE_TRACKING_MODES.contains(&m) => {
                for tracking in MOUSE_TRACKING_MODES {
                    self.modes.set(tracking, false);
                }
                host.mouse_tracking_requested(false);
            }
            Mode::Mouse1007 => host.alternate_scrolling_changed(false),
            Mode::BracketedPaste => host.bracketed_paste_mode_changed(false),
            Mode::AppScreen => {
                self.screens[0].clear_selection();
                self.current_screen = 0;
            }
            _ => {}
        }
        self.modes.set(mode, false);
        if let Some(screen_mode) = mode.screen_mode() {
            self.screens[0].reset_mode(screen_mode);
            self.screens[1].reset_mode(screen_mode);
        }
    }

    pub(crate) fn use_charset(&mut self, n: usize) {
        self.charsets[self.current_screen].use_slot(n);
    }

    /// Designate slot `n` on both screens.
    pub(crate) fn set_charset(&mut self, n: usize, cs: u8) {
        self.charsets[0].designate(n, cs);
        self.charsets[1].designate(n, cs);
    }

    /// Designate and activate in one step, current screen only.
    pub(crate) fn set_and_use_charset(&mut self, n: usize, cs: u8) {
        self.charsets[self.current_screen].designate(n, cs);
        self.charsets[self.current_screen].use_slot(n);
    }

    pub(crate) fn save_cursor(&mut self) {
        self.charsets[self.current_screen].save();
        self.screen().save_cursor();
    }

    pub(crate) fn restore_cursor(&mut self) {
        self.charsets[self.current_screen].restore();
        self.screen().restore_cursor();
    }

    fn clear_screen_and_set_columns(&mut self, host: &mut dyn TerminalHost, columns: i32) {
        let lines = self.screen_ref().lines();
        for screen in self.screens.iter_mut() {
            screen.set_image_size(lines, columns);
        }
        self.screen().clear_entire_screen();
        self.screen().set_default_margins();
        self.screen().set_cursor_yx(1, 1);
        host.image_resize_request(columns, lines);
    }

    fn resize_image(&mut self, host: &mut dyn TerminalHost, lines: i32, columns: i32) {
        if lines < 1 || columns < 1 {
            return;
        }
        for screen in self.screens.iter_mut() {
            screen.set_image_size(lines, columns);
        }
        host.image_resize_request(columns, lines);
    }

    /// Full reset (RIS). `Allow132Columns` and `Mouse1007` survive; both
    /// screens are wiped and the host is asked for the default cursor
    /// style.
    pub fn reset(&mut self, host: &mut dyn TerminalHost) {
        self.tokenizer.reset();
        self.reset_modes(host);
        self.charsets = [CharsetState::default(); 2];
        for screen in self.screens.iter_mut() {
            screen.clear_entire_screen();
            screen.set_default_rendition();
            screen.set_default_margins();
            screen.set_cursor_yx(1, 1);
        }
        host.reset_cursor_style_request();
    }

    fn reset_modes(&mut self, host: &mut dyn TerminalHost) {
        // Allow132Columns and Mouse1007 are deliberately not touched.
        let defaults_off = [
            Mode::Columns132,
            Mode::Mouse1000,
            Mode::Mouse1001,
            Mode::Mouse1002,
            Mode::Mouse1003,
            Mode::Mouse1005,
            Mode::Mouse1006,
            Mode::Mouse1015,
            Mode::FocusEvents,
            Mode::BracketedPaste,
            Mode::AppScreen,
            Mode::AppCuKeys,
            Mode::AppKeyPad,
            Mode::NewLine,
            Mode::Insert,
            Mode::Origin,
            Mode::ReverseVideo,
        ];
        for mode in defaults_off {
            self.reset_mode(host, mode);
            self.modes.save(mode);
        }
        let defaults_on = [Mode::Wrap, Mode::Cursor, Mode::Ansi];
        for mode in defaults_on {
            self.set_mode(host, mode);
            self.modes.save(mode);
        }
    }

    /// DECSTR. A far smaller affair than the full reset.
    pub(crate) fn soft_reset(&mut self) {
        self.screen().set_mode(ScreenMode::Cursor);
        self.screen().reset_mode(ScreenMode::Insert);
        self.screen().reset_mode(ScreenMode::Origin);
        self.screen().set_mode(ScreenMode::Wrap);
        self.modes.set(Mode::Cursor, true);
        self.modes.set(Mode::Insert, false);
        self.modes.set(Mode::Origin, false);
        self.modes.set(Mode::Wrap, true);
        self.screen().set_default_rendition();
        self.screen().set_default_margins();
    }

    pub(crate) fn unhandled(&mut self, host: &mut dyn TerminalHost, token: Token) {
        let error = ParseError::UndecodableSequence(format!("{token:?}"));
        log::debug!("unhandled token: {token:?}");
        host.report_error(&error);
    }
}

/// Omitted or zero parameters default to 1 for count-like arguments.
fn one(n: i32) -> i32 {
    if n == 0 {
        1
    } else {
        n
    }
}

fn private_mode(n: u16) -> Option<Mode> {
    match n {
        1 => Some(Mode::AppCuKeys),
        2 => Some(Mode::Ansi),
        3 => Some(Mode::Columns132),
        6 => Some(Mode::Origin),
        7 => Some(Mode::Wrap),
        25 => Some(Mode::Cursor),
        40 => Some(Mode::Allow132Columns),
        47 => Some(Mode::AppScreen),
        1000 => Some(Mode::Mouse1000),
        1001 => Some(Mode::Mouse1001),
        1002 => Some(Mode::Mouse1002),
        1003 => Some(Mode::Mouse1003),
        1004 => Some(Mode::FocusEvents),
        1005 => Some(Mode::Mouse1005),
        1006 => Some(Mode::Mouse1006),
        1007 => Some(Mode::Mouse1007),
        1015 => Some(Mode::Mouse1015),
        2004 => Some(Mode::BracketedPaste),
        _ => None,
    }
}
