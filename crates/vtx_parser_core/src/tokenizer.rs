//! The recognition state machine.
//!
//! Sequences are assembled in a bounded buffer of code points; after every
//! input character the buffer is matched against the recognition rules in
//! priority order. Numeric parameters accumulate separately in `argv`.
//!
//! Useful references: <https://vt100.net/docs/vt102-ug/chapter5.html> and
//! <https://invisible-island.net/xterm/ctlseqs/ctlseqs.html>

use crate::{
    char_class, sequence_dump, CharClass, OscTerminator, ParseError, Token, TokenSink, BEL, CAN,
    ESC, MAXARGS, MAX_ARGUMENT, MAX_TOKEN_LENGTH, SUB,
};

pub struct Tokenizer {
    buffer: Vec<u32>,
    argv: [i32; MAXARGS],
    argc: usize,
    ansi: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            buffer: Vec::with_capacity(32),
            argv: [0; MAXARGS],
            argc: 0,
            ansi: true,
        }
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort any partially assembled sequence.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.argv = [0; MAXARGS];
        self.argc = 0;
    }

    /// Switch between ANSI and VT52 recognition. Mirrors the `Ansi` mode of
    /// the emulation layer.
    pub fn set_ansi_mode(&mut self, ansi: bool) {
        self.ansi = ansi;
    }

    pub fn ansi_mode(&self) -> bool {
        self.ansi
    }

    /// Consume one code point, emitting any tokens it completes.
    pub fn advance(&mut self, cc: char, sink: &mut dyn TokenSink) {
        let cc_u = cc as u32;
        if cc_u == 0x7F {
            // VT100: DEL is ignored on input.
            return;
        }
        if cc_u < 0x20 {
            let lead = if self.buffer.len() >= 2 && self.buffer[0] == ESC {
                self.buffer[1]
            } else {
                0
            };
            if lead == u32::from(b']') {
                // OSC swallows controls except BEL and ESC.
                if cc_u != BEL && cc_u != ESC {
                    return;
                }
            } else if lead == u32::from(b'P') {
                // DCS swallows controls except ESC.
                if cc_u != ESC {
                    return;
                }
            } else {
                // DEC quirk: controls pass transparently through an ongoing
                // escape sequence. CAN, SUB and a stray ESC abort it.
                if cc_u == CAN || cc_u == SUB || cc_u == ESC {
                    self.reset();
                }
                if cc_u != ESC {
                    sink.token(Token::Ctl(cc_u as u8));
                    return;
                }
            }
        }
        self.add_to_buffer(cc_u);
        if self.ansi {
            self.advance_ansi(cc, sink);
        } else {
            self.advance_vt52(cc, sink);
        }
    }

    fn advance_ansi(&mut self, cc: char, sink: &mut dyn TokenSink) {
        let cc_u = cc as u32;
        let p = self.buffer.len();

        // A lone ESC opens a sequence.
        if p == 1 && cc_u == ESC {
            return;
        }
        // 8-bit CSI: the C1 control 0x9B stands for `ESC [`.
        if p == 1 && cc_u == ESC + 128 {
            self.buffer[0] = ESC;
            self.advance('[', sink);
            return;
        }
        // Start of a multi-character group (`ESC [`, `ESC ]`, `ESC (`, …).
        if p == 2 && char_class(self.buffer[1]).contains(CharClass::GRP) {
            return;
        }

        let lead = if p >= 2 && self.buffer[0] == ESC {
            self.buffer[1]
        } else {
            0
        };
        if lead == u32::from(b']') {
            self.advance_osc(cc, sink);
            return;
        }
        if lead == u32::from(b'P') {
            // Device control strings are consumed and ignored.
            if p >= 4 && self.buffer[p - 2] == ESC && cc_u == u32::from(b'\\') {
                self.reset();
            }
            return;
        }

        // A single printable character is the most common token by far.
        if p == 1 && cc_u >= 0x20 {
            sink.token(Token::Chr(cc));
            self.reset();
            return;
        }
        // `ESC <final>`
        if p == 2 {
            if self.buffer[1] < 256 {
                sink.token(Token::Esc(self.buffer[1] as u8));
                self.reset();
            } else {
                self.undecodable(sink);
            }
            return;
        }
        // `ESC ( B` and friends designate a charset.
        if p == 3 && char_class(self.buffer[1]).contains(CharClass::SCS) {
            if self.buffer[2] < 256 {
                sink.token(Token::EscCs {
                    inter: self.buffer[1] as u8,
                    designator: self.buffer[2] as u8,
                });
                self.reset();
            } else {
                self.undecodable(sink);
            }
            return;
        }
        // `ESC # <final>` (DEC line attributes, DECALN).
        if p == 3 && self.buffer[1] == u32::from(b'#') {
            if self.buffer[2] < 256 {
                sink.token(Token::EscDe(self.buffer[2] as u8));
                self.reset();
            } else {
                self.undecodable(sink);
            }
            return;
        }

        // Everything below is a control sequence.
        if p >= 3 && self.buffer[1] == u32::from(b'[') {
            // Private-parameter markers only note themselves.
            if p == 3
                && (cc_u == u32::from(b'?')
                    || cc_u == u32::from(b'>')
                    || cc_u == u32::from(b'=')
                    || cc_u == u32::from(b'!'))
            {
                return;
            }
            if char_class(cc_u).contains(CharClass::DIG) {
                self.add_digit((cc_u - u32::from(b'0')) as i32);
                return;
            }
            if cc_u == u32::from(b';') {
                self.add_argument();
                return;
            }
            // `CSI … * y` requests a region checksum.
            if cc_u == u32::from(b'y') && p >= 4 && self.buffer[p - 2] == u32::from(b'*') {
                let args: Vec<i32> = self.argv[..=self.argc].to_vec();
                sink.checksum_request(&args);
                self.reset();
                return;
            }
            // Intermediates (space included) wait for the final byte.
            if char_class(cc_u).contains(CharClass::INT) {
                return;
            }
            if (0x40..=0x7E).contains(&cc_u) {
                self.dispatch_csi(cc_u as u8, sink);
                self.reset();
                return;
            }
        }
        self.undecodable(sink);
    }

    /// OSC accumulation. Terminates on BEL, on `ESC \`, or leniently on
    /// `ESC <other>`, in which case the ESC opens the next sequence and the
    /// other byte is fed back in.
    fn advance_osc(&mut self, cc: char, sink: &mut dyn TokenSink) {
        let cc_u = cc as u32;
        let p = self.buffer.len();
        if cc_u == BEL {
            self.dispatch_osc(p - 1, OscTerminator::Bell, sink);
            self.reset();
            return;
        }
        if p >= 4 && self.buffer[p - 2] == ESC && cc_u != ESC {
            self.dispatch_osc(p - 2, OscTerminator::StringTerminator, sink);
            self.reset();
            if cc_u != u32::from(b'\\') {
                self.buffer.push(ESC);
                self.advance(cc, sink);
            }
        }
    }

    fn dispatch_osc(&mut self, end: usize, terminator: OscTerminator, sink: &mut dyn TokenSink) {
        let body: String = self.buffer[2..end]
            .iter()
            .filter_map(|&cc| char::from_u32(cc))
            .collect();
        sink.osc(&body, terminator);
    }

    /// Classify a completed control sequence by its final byte and private
    /// markers, emitting one token per parameter where the catalogue calls
    /// for it.
    fn dispatch_csi(&mut self, final_byte: u8, sink: &mut dyn TokenSink) {
        let p = self.buffer.len();
        // Space-intermediate forms (DECSCUSR).
        if p >= 4 && self.buffer[p - 2] == u32::from(b' ') {
            if p == 4 {
                sink.token(Token::CsiSp(final_byte));
            } else {
                sink.token(Token::CsiPsp {
                    final_byte,
                    n: self.argv[0] as u16,
                });
            }
            return;
        }
        match self.buffer[2] {
            q if q == u32::from(b'?') => {
                for i in 0..=self.argc {
                    sink.token(Token::CsiPr {
                        final_byte,
                        n: self.argv[i] as u16,
                    });
                }
            }
            q if q == u32::from(b'!') => {
                sink.token(Token::CsiPe(final_byte));
            }
            q if q == u32::from(b'>') => {
                for i in 0..=self.argc {
                    sink.token(Token::CsiPg {
                        final_byte,
                        n: self.argv[i] as u16,
                    });
                }
            }
            q if q == u32::from(b'=') => {
                for i in 0..=self.argc {
                    sink.token(Token::CsiPq {
                        final_byte,
                        n: self.argv[i] as u16,
                    });
                }
            }
            _ => {
                let class = char_class(u32::from(final_byte));
                if class.contains(CharClass::CPS) {
                    // Window operations: the selector plus two geometry args.
                    sink.token(Token::CsiPs {
                        final_byte,
                        n: self.argv[0] as u16,
                        p: self.argv[1],
                        q: self.argv[2],
                    });
                } else if class.contains(CharClass::CPN) {
                    sink.token(Token::CsiPn {
                        final_byte,
                        p: self.argv[0],
                        q: self.argv[1],
                    });
                } else {
                    self.dispatch_csi_params(final_byte, sink);
                }
            }
        }
    }

    /// Per-parameter emission with the SGR extended-color forms folded into
    /// single tokens: `38;2;r;g;b` / `48;2;r;g;b` and `38;5;i` / `48;5;i`.
    fn dispatch_csi_params(&mut self, final_byte: u8, sink: &mut dyn TokenSink) {
        let mut i = 0;
        while i <= self.argc {
            let n = self.argv[i];
            if final_byte == b'm'
                && (n == 38 || n == 48)
                && self.argc >= i + 4
                && self.argv[i + 1] == 2
            {
                let value = ((self.argv[i + 2] & 0xFF) << 16)
                    | ((self.argv[i + 3] & 0xFF) << 8)
                    | (self.argv[i + 4] & 0xFF);
                sink.token(Token::CsiPs {
                    final_byte,
                    n: n as u16,
                    p: 2,
                    q: value,
                });
                i += 5;
            } else if final_byte == b'm'
                && (n == 38 || n == 48)
                && self.argc >= i + 2
                && self.argv[i + 1] == 5
            {
                sink.token(Token::CsiPs {
                    final_byte,
                    n: n as u16,
                    p: 5,
                    q: self.argv[i + 2],
                });
                i += 3;
            } else {
                sink.token(Token::CsiPs {
                    final_byte,
                    n: n as u16,
                    p: 0,
                    q: 0,
                });
                i += 1;
            }
        }
    }

    fn advance_vt52(&mut self, cc: char, sink: &mut dyn TokenSink) {
        let cc_u = cc as u32;
        let p = self.buffer.len();
        if p == 1 && cc_u == ESC {
            return;
        }
        if p == 1 && cc_u >= 0x20 {
            sink.token(Token::Chr(cc));
            self.reset();
            return;
        }
        // `ESC Y` takes two coordinate bytes.
        if p == 2 && cc_u == u32::from(b'Y') {
            return;
        }
        if p == 3 && self.buffer[1] == u32::from(b'Y') {
            return;
        }
        if p < 4 {
            if self.buffer[1] < 256 {
                sink.token(Token::Vt52 {
                    final_byte: self.buffer[1] as u8,
                    p: 0,
                    q: 0,
                });
                self.reset();
            } else {
                self.undecodable(sink);
            }
            return;
        }
        sink.token(Token::Vt52 {
            final_byte: b'Y',
            p: self.buffer[2] as i32,
            q: self.buffer[3] as i32,
        });
        self.reset();
    }

    fn add_to_buffer(&mut self, cc: u32) {
        if self.buffer.len() < MAX_TOKEN_LENGTH {
            self.buffer.push(cc);
        } else {
            // Oversized sequences keep overwriting the last slot.
            *self.buffer.last_mut().unwrap() = cc;
        }
    }

    fn add_digit(&mut self, digit: i32) {
        self.argv[self.argc] = (self.argv[self.argc] * 10 + digit).min(MAX_ARGUMENT);
    }

    fn add_argument(&mut self) {
        self.argc = (self.argc + 1).min(MAXARGS - 1);
        self.argv[self.argc] = 0;
    }

    fn undecodable(&mut self, sink: &mut dyn TokenSink) {
        let dump = sequence_dump(&self.buffer);
        log::debug!("undecodable sequence: {dump}");
        sink.report_error(ParseError::UndecodableSequence(dump));
        self.reset();
    }

    #[cfg(test)]
    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }

    #[cfg(test)]
    pub(crate) fn arg_state(&self) -> (usize, [i32; MAXARGS]) {
        (self.argc, self.argv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingSink {
        tokens: Vec<Token>,
        oscs: Vec<(String, OscTerminator)>,
        checksums: Vec<Vec<i32>>,
        errors: Vec<ParseError>,
    }

    impl TokenSink for RecordingSink {
        fn token(&mut self, token: Token) {
            self.tokens.push(token);
        }
        fn osc(&mut self, body: &str, terminator: OscTerminator) {
            self.oscs.push((body.to_string(), terminator));
        }
        fn checksum_request(&mut self, args: &[i32]) {
            self.checksums.push(args.to_vec());
        }
        fn report_error(&mut self, error: ParseError) {
            self.errors.push(error);
        }
    }

    fn feed(tokenizer: &mut Tokenizer, input: &str) -> RecordingSink {
        let mut sink = RecordingSink::default();
        for cc in input.chars() {
            tokenizer.advance(cc, &mut sink);
        }
        sink
    }

    fn tokens_of(input: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, input);
        assert_eq!(Vec::<ParseError>::new(), sink.errors);
        sink.tokens
    }

    #[test]
    fn plain_characters() {
        assert_eq!(
            vec![Token::Chr('h'), Token::Chr('i')],
            tokens_of("hi")
        );
    }

    #[test]
    fn control_characters() {
        assert_eq!(
            vec![Token::Ctl(0x0D), Token::Ctl(0x0A), Token::Ctl(0x07)],
            tokens_of("\r\n\x07")
        );
    }

    #[test]
    fn simple_escape() {
        assert_eq!(vec![Token::Esc(b'7')], tokens_of("\x1b7"));
    }

    #[test]
    fn charset_designation() {
        assert_eq!(
            vec![Token::EscCs {
                inter: b'(',
                designator: b'0'
            }],
            tokens_of("\x1b(0")
        );
        assert_eq!(
            vec![Token::EscCs {
                inter: b'%',
                designator: b'G'
            }],
            tokens_of("\x1b%G")
        );
    }

    #[test]
    fn dec_alignment_test() {
        assert_eq!(vec![Token::EscDe(b'8')], tokens_of("\x1b#8"));
    }

    #[test]
    fn sgr_single_parameter() {
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b'm',
                n: 31,
                p: 0,
                q: 0
            }],
            tokens_of("\x1b[31m")
        );
    }

    #[test]
    fn sgr_empty_parameter_is_zero() {
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b'm',
                n: 0,
                p: 0,
                q: 0
            }],
            tokens_of("\x1b[m")
        );
    }

    #[test]
    fn sgr_multiple_parameters() {
        assert_eq!(
            vec![
                Token::CsiPs {
                    final_byte: b'm',
                    n: 1,
                    p: 0,
                    q: 0
                },
                Token::CsiPs {
                    final_byte: b'm',
                    n: 31,
                    p: 0,
                    q: 0
                },
                Token::CsiPs {
                    final_byte: b'm',
                    n: 45,
                    p: 0,
                    q: 0
                },
            ],
            tokens_of("\x1b[1;31;45m")
        );
    }

    #[test]
    fn sgr_rgb_color_folds_into_one_token() {
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b'm',
                n: 38,
                p: 2,
                q: (10 << 16) | (20 << 8) | 30
            }],
            tokens_of("\x1b[38;2;10;20;30m")
        );
    }

    #[test]
    fn sgr_indexed_color_folds_into_one_token() {
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b'm',
                n: 48,
                p: 5,
                q: 196
            }],
            tokens_of("\x1b[48;5;196m")
        );
    }

    #[test]
    fn sgr_extended_color_mixed_with_plain_attributes() {
        assert_eq!(
            vec![
                Token::CsiPs {
                    final_byte: b'm',
                    n: 1,
                    p: 0,
                    q: 0
                },
                Token::CsiPs {
                    final_byte: b'm',
                    n: 38,
                    p: 5,
                    q: 208
                },
                Token::CsiPs {
                    final_byte: b'm',
                    n: 4,
                    p: 0,
                    q: 0
                },
            ],
            tokens_of("\x1b[1;38;5;208;4m")
        );
    }

    #[test]
    fn cursor_position_carries_two_arguments() {
        assert_eq!(
            vec![Token::CsiPn {
                final_byte: b'H',
                p: 2,
                q: 3
            }],
            tokens_of("\x1b[2;3H")
        );
        assert_eq!(
            vec![Token::CsiPn {
                final_byte: b'H',
                p: 0,
                q: 0
            }],
            tokens_of("\x1b[H")
        );
    }

    #[test]
    fn window_operations_carry_geometry() {
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b't',
                n: 8,
                p: 24,
                q: 80
            }],
            tokens_of("\x1b[8;24;80t")
        );
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b't',
                n: 18,
                p: 0,
                q: 0
            }],
            tokens_of("\x1b[18t")
        );
    }

    #[test]
    fn private_modes_emit_one_token_per_parameter() {
        assert_eq!(
            vec![
                Token::CsiPr {
                    final_byte: b'h',
                    n: 1
                },
                Token::CsiPr {
                    final_byte: b'h',
                    n: 1049
                },
            ],
            tokens_of("\x1b[?1;1049h")
        );
    }

    #[test]
    fn private_greater_and_equals_forms() {
        assert_eq!(
            vec![Token::CsiPg {
                final_byte: b'c',
                n: 0
            }],
            tokens_of("\x1b[>c")
        );
        assert_eq!(
            vec![Token::CsiPq {
                final_byte: b'c',
                n: 0
            }],
            tokens_of("\x1b[=c")
        );
    }

    #[test]
    fn exclamation_form() {
        assert_eq!(vec![Token::CsiPe(b'p')], tokens_of("\x1b[!p"));
    }

    #[test]
    fn space_intermediate_forms() {
        assert_eq!(vec![Token::CsiSp(b'q')], tokens_of("\x1b[ q"));
        assert_eq!(
            vec![Token::CsiPsp {
                final_byte: b'q',
                n: 3
            }],
            tokens_of("\x1b[3 q")
        );
    }

    #[test]
    fn checksum_request_hands_over_all_arguments() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1b[1;1;1;1;1;2*y");
        assert_eq!(vec![vec![1, 1, 1, 1, 1, 2]], sink.checksums);
        assert!(sink.tokens.is_empty());
    }

    #[test]
    fn eight_bit_csi_behaves_like_esc_bracket() {
        assert_eq!(
            vec![Token::CsiPs {
                final_byte: b'm',
                n: 31,
                p: 0,
                q: 0
            }],
            tokens_of("\u{9b}31m")
        );
    }

    #[test]
    fn osc_terminated_by_bel() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1b]0;hello\x07");
        assert_eq!(
            vec![("0;hello".to_string(), OscTerminator::Bell)],
            sink.oscs
        );
    }

    #[test]
    fn osc_terminated_by_st() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1b]8;;https://example.com\x1b\\");
        assert_eq!(
            vec![(
                "8;;https://example.com".to_string(),
                OscTerminator::StringTerminator
            )],
            sink.oscs
        );
    }

    #[test]
    fn osc_terminated_by_stray_escape_refeeds_next_sequence() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1b]0;title\x1b[31mx");
        assert_eq!(
            vec![("0;title".to_string(), OscTerminator::StringTerminator)],
            sink.oscs
        );
        assert_eq!(
            vec![
                Token::CsiPs {
                    final_byte: b'm',
                    n: 31,
                    p: 0,
                    q: 0
                },
                Token::Chr('x'),
            ],
            sink.tokens
        );
    }

    #[test]
    fn osc_swallows_controls() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1b]0;he\rll\no\x07");
        assert_eq!(vec![("0;hello".to_string(), OscTerminator::Bell)], sink.oscs);
        assert!(sink.tokens.is_empty());
    }

    #[test]
    fn dcs_is_consumed_and_ignored() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1bPsome device control\x1b\\A");
        assert_eq!(vec![Token::Chr('A')], sink.tokens);
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn controls_pass_through_an_ongoing_sequence() {
        assert_eq!(
            vec![
                Token::Ctl(0x08),
                Token::CsiPs {
                    final_byte: b'm',
                    n: 3,
                    p: 0,
                    q: 0
                },
            ],
            tokens_of("\x1b[3\x08m")
        );
    }

    #[test]
    fn cancel_aborts_the_sequence() {
        assert_eq!(
            vec![Token::Ctl(0x18), Token::Chr('m')],
            tokens_of("\x1b[3\x18m")
        );
    }

    #[test]
    fn stray_escape_aborts_the_sequence() {
        assert_eq!(vec![Token::Esc(b'7')], tokens_of("\x1b[3\x1b7"));
    }

    #[test]
    fn argument_values_clamp() {
        assert_eq!(
            vec![Token::CsiPn {
                final_byte: b'A',
                p: MAX_ARGUMENT,
                q: 0
            }],
            tokens_of("\x1b[99999999A")
        );
    }

    #[test]
    fn argument_count_clamps() {
        let mut input = String::from("\x1b[");
        for i in 0..17 {
            if i > 0 {
                input.push(';');
            }
            input.push_str(&(i + 1).to_string());
        }
        input.push('m');
        let tokens = tokens_of(&input);
        assert_eq!(MAXARGS, tokens.len());
        // The overflowing parameters kept replacing the last slot.
        assert_eq!(
            Token::CsiPs {
                final_byte: b'm',
                n: 17,
                p: 0,
                q: 0
            },
            *tokens.last().unwrap()
        );
    }

    #[test]
    fn argument_state_is_bounded_after_arbitrary_input() {
        let mut tokenizer = Tokenizer::new();
        let mut input = String::from("\x1b[");
        for _ in 0..100 {
            input.push_str("12345678901234567890;");
        }
        feed(&mut tokenizer, &input);
        let (argc, argv) = tokenizer.arg_state();
        assert!(argc <= MAXARGS - 1);
        assert!(argv.iter().all(|&v| v <= MAX_ARGUMENT));
        assert!(tokenizer.buffered() <= MAX_TOKEN_LENGTH);
    }

    #[test]
    fn oversized_token_does_not_grow_the_buffer() {
        let mut tokenizer = Tokenizer::new();
        let mut sink = RecordingSink::default();
        tokenizer.advance('\u{1b}', &mut sink);
        tokenizer.advance(']', &mut sink);
        for _ in 0..(MAX_TOKEN_LENGTH + 100) {
            tokenizer.advance('x', &mut sink);
        }
        assert_eq!(MAX_TOKEN_LENGTH, tokenizer.buffered());
        tokenizer.advance('\u{7}', &mut sink);
        assert_eq!(1, sink.oscs.len());
        assert_eq!(0, tokenizer.buffered());
    }

    #[test]
    fn unrecognized_sequence_reports_and_recovers() {
        let mut tokenizer = Tokenizer::new();
        let sink = feed(&mut tokenizer, "\x1b[\u{e9}ok");
        assert_eq!(1, sink.errors.len());
        assert_eq!(vec![Token::Chr('o'), Token::Chr('k')], sink.tokens);
    }

    #[test]
    fn vt52_finals() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_ansi_mode(false);
        let sink = feed(&mut tokenizer, "\x1bA\x1bZ");
        assert_eq!(
            vec![
                Token::Vt52 {
                    final_byte: b'A',
                    p: 0,
                    q: 0
                },
                Token::Vt52 {
                    final_byte: b'Z',
                    p: 0,
                    q: 0
                },
            ],
            sink.tokens
        );
    }

    #[test]
    fn vt52_direct_cursor_address_consumes_two_bytes() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_ansi_mode(false);
        let sink = feed(&mut tokenizer, "\x1bY!(");
        assert_eq!(
            vec![Token::Vt52 {
                final_byte: b'Y',
                p: 0x21,
                q: 0x28
            }],
            sink.tokens
        );
    }

    #[test]
    fn vt52_plain_characters_still_print() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_ansi_mode(false);
        let sink = feed(&mut tokenizer, "ab");
        assert_eq!(vec![Token::Chr('a'), Token::Chr('b')], sink.tokens);
    }
}
