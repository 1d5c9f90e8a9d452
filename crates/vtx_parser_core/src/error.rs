use thiserror::Error;

/// Recoverable decoding problems. The tokenizer resets and keeps consuming
/// input after reporting one of these; they never propagate to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A sequence that matched no recognition rule. Carries a hex dump of
    /// the token buffer at the point of failure.
    #[error("undecodable sequence: {0}")]
    UndecodableSequence(String),
    /// An OSC body that did not parse as `Pa ; Pv`.
    #[error("malformed operating system command: {0}")]
    MalformedOsc(String),
}

/// Hex dump of a token buffer for error reporting, truncated to keep log
/// lines readable.
pub fn sequence_dump(buffer: &[u32]) -> String {
    const MAX_DUMP: usize = 32;
    let mut out = String::new();
    for (i, cc) in buffer.iter().take(MAX_DUMP).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{cc:02X}"));
    }
    if buffer.len() > MAX_DUMP {
        out.push_str(&format!(" … ({} more)", buffer.len() - MAX_DUMP));
    }
    out
}
