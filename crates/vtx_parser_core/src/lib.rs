//! Escape-sequence tokenizer for VT100/VT102/xterm byte streams.
//!
//! The tokenizer consumes Unicode code points (one at a time) and emits
//! typed [`Token`]s through a [`TokenSink`]. It knows nothing about screens,
//! modes or replies; the emulation layer dispatches the tokens.

use bitflags::bitflags;

mod error;
pub use error::{sequence_dump, ParseError};

mod tokenizer;
pub use tokenizer::Tokenizer;

/// Upper bound on the number of code points a single sequence may occupy.
/// Longer sequences keep overwriting the last slot and will fail
/// recognition instead of growing memory.
pub const MAX_TOKEN_LENGTH: usize = 80 * 1024;

/// Maximum number of numeric parameters a control sequence can carry.
pub const MAXARGS: usize = 15;

/// Numeric parameters saturate at this value while digits accumulate.
pub const MAX_ARGUMENT: i32 = 40960;

pub const ESC: u32 = 0x1B;
pub const BEL: u32 = 0x07;
pub const CAN: u32 = 0x18;
pub const SUB: u32 = 0x1A;

bitflags! {
    /// Character classes consulted during sequence recognition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharClass: u8 {
        /// C0 control (0x00..=0x1F).
        const CTL = 1;
        /// Printable (0x20 and above).
        const CHR = 2;
        /// CSI parametric final bytes (`@ABCDEFGHILMPSTXZbcdfry`).
        const CPN = 4;
        /// ASCII digit.
        const DIG = 8;
        /// Charset-designation intermediates (`(`, `)`, `+`, `*`, `%`).
        const SCS = 16;
        /// Bytes that open a multi-character group after ESC.
        const GRP = 32;
        /// Window-operation final byte (`t`).
        const CPS = 64;
        /// CSI intermediate bytes (0x20..=0x2F).
        const INT = 128;
    }
}

const fn build_char_class_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 32 {
        table[i] |= CharClass::CTL.bits();
        i += 1;
    }
    let mut i = 32;
    while i < 256 {
        table[i] |= CharClass::CHR.bits();
        i += 1;
    }
    let mut i = 0x20;
    while i <= 0x2F {
        table[i] |= CharClass::INT.bits();
        i += 1;
    }
    let mut i = b'0' as usize;
    while i <= b'9' as usize {
        table[i] |= CharClass::DIG.bits();
        i += 1;
    }
    let scs = b"()+*%";
    let mut i = 0;
    while i < scs.len() {
        table[scs[i] as usize] |= CharClass::SCS.bits();
        i += 1;
    }
    let grp = b"()+*#[]%";
    let mut i = 0;
    while i < grp.len() {
        table[grp[i] as usize] |= CharClass::GRP.bits();
        i += 1;
    }
    let cpn = b"@ABCDEFGHILMPSTXZbcdfry";
    let mut i = 0;
    while i < cpn.len() {
        table[cpn[i] as usize] |= CharClass::CPN.bits();
        i += 1;
    }
    table[b't' as usize] |= CharClass::CPS.bits();
    table
}

static CHAR_CLASS: [u8; 256] = build_char_class_table();

/// Class lookup for an arbitrary code point. Everything outside the 8-bit
/// range is a plain printable character.
#[inline]
pub fn char_class(cc: u32) -> CharClass {
    if cc < 256 {
        CharClass::from_bits_truncate(CHAR_CLASS[cc as usize])
    } else {
        CharClass::CHR
    }
}

/// How a completed OSC string was terminated. Replies to attribute queries
/// mirror the terminator the application used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscTerminator {
    /// BEL (0x07).
    Bell,
    /// `ESC \` or the lenient `ESC <other>` form.
    StringTerminator,
}

/// One recognized escape-sequence token.
///
/// CSI sequences with several `;`-separated parameters are emitted once per
/// parameter (`CsiPs`, `CsiPr`, `CsiPq`, `CsiPg`), with two exceptions that
/// need their arguments together: the parametric cursor commands (`CsiPn`)
/// and the folded SGR extended-color and window-operation forms carried in
/// the `p`/`q` fields of `CsiPs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Plain printable code point.
    Chr(char),
    /// C0 control byte seen outside (or transparently inside) a sequence.
    Ctl(u8),
    /// `ESC` + final byte.
    Esc(u8),
    /// `ESC` + charset intermediate + designator, e.g. `ESC ( 0`.
    EscCs { inter: u8, designator: u8 },
    /// `ESC #` + final byte (DEC line attributes, DECALN).
    EscDe(u8),
    /// CSI + parameter + final byte. For SGR 38/48 extended colors `p` is
    /// the color-format selector (2 = RGB, 5 = indexed) and `q` the packed
    /// color value; for the window operations (final `t`) `p`/`q` are the
    /// second and third parameters.
    CsiPs { final_byte: u8, n: u16, p: i32, q: i32 },
    /// CSI parametric final with up to two arguments (cursor addressing).
    CsiPn { final_byte: u8, p: i32, q: i32 },
    /// CSI `?` private form, one token per parameter.
    CsiPr { final_byte: u8, n: u16 },
    /// CSI `!` private form.
    CsiPe(u8),
    /// CSI + space + final byte, no parameter.
    CsiSp(u8),
    /// CSI + parameter + space + final byte.
    CsiPsp { final_byte: u8, n: u16 },
    /// CSI `=` private form, one token per parameter.
    CsiPq { final_byte: u8, n: u16 },
    /// CSI `>` private form, one token per parameter.
    CsiPg { final_byte: u8, n: u16 },
    /// VT52 sequence; `p`/`q` carry the raw `ESC Y` coordinate bytes.
    Vt52 { final_byte: u8, p: i32, q: i32 },
}

/// Receiver for the tokenizer's output.
pub trait TokenSink {
    fn token(&mut self, token: Token);

    /// A completed OSC string: the raw `Pa ; Pv` body and its terminator.
    fn osc(&mut self, body: &str, terminator: OscTerminator);

    /// A `CSI … * y` checksum request with all accumulated parameters.
    fn checksum_request(&mut self, _args: &[i32]) {}

    /// Report a recoverable decoding problem. Default implementation does
    /// nothing; the tokenizer has already logged and reset itself.
    fn report_error(&mut self, _error: ParseError) {}
}
