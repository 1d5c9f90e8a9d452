//! Decoding of raw PTY bytes into the code points the tokenizer consumes.

/// The per-session text codec. `ESC % G` selects UTF-8, `ESC % @` the
/// locale codec (modeled as Latin-1: every byte is its own code point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    #[default]
    Utf8,
    Locale,
}

struct CharCollector<'a> {
    out: &'a mut Vec<char>,
}

impl utf8parse::Receiver for CharCollector<'_> {
    fn codepoint(&mut self, c: char) {
        self.out.push(c);
    }

    fn invalid_sequence(&mut self) {
        self.out.push('\u{FFFD}');
    }
}

/// Incremental decoder; UTF-8 sequences may span `decode` calls.
#[derive(Default)]
pub(crate) struct StreamDecoder {
    utf8: utf8parse::Parser,
}

impl StreamDecoder {
    pub(crate) fn decode(&mut self, codec: Codec, data: &[u8], out: &mut Vec<char>) {
        match codec {
            Codec::Utf8 => {
                let mut collector = CharCollector { out };
                for &byte in data {
                    self.utf8.advance(&mut collector, byte);
                }
            }
            Codec::Locale => {
                out.extend(data.iter().map(|&b| char::from(b)));
            }
        }
    }

    /// Drop any partially accumulated multi-byte sequence (codec switch).
    pub(crate) fn reset(&mut self) {
        self.utf8 = utf8parse::Parser::default();
    }

    /// Encode text for transmission to the child.
    pub(crate) fn encode(codec: Codec, text: &str, out: &mut Vec<u8>) {
        match codec {
            Codec::Utf8 => out.extend_from_slice(text.as_bytes()),
            Codec::Locale => {
                for c in text.chars() {
                    let cc = c as u32;
                    out.push(if cc < 256 { cc as u8 } else { b'?' });
                }
            }
        }
    }
}
