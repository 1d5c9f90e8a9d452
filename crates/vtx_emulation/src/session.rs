//! OSC session attributes: title changes, hyperlinks, profile commands.
//!
//! Rapid attribute updates (busy shells rewrite the title on every prompt)
//! are coalesced: values are parked in an ordered map and delivered when
//! the injected single-shot timer fires.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use vtx_parser_core::{OscTerminator, ParseError};

use crate::emulator::Emulator;
use crate::host::{CursorShape, TerminalHost};

/// Delay the embedder's timer should use between arming and calling
/// [`Emulator::flush_session_attributes`].
pub const ATTRIBUTE_FLUSH_DELAY: Duration = Duration::from_millis(20);

/// Well-known attribute ids.
pub mod attributes {
    pub const ICON_AND_WINDOW_TITLE: i32 = 0;
    pub const ICON_TITLE: i32 = 1;
    pub const WINDOW_TITLE: i32 = 2;
    pub const CURRENT_DIRECTORY: i32 = 7;
    pub const HYPERLINK: i32 = 8;
    pub const PROFILE_CHANGE: i32 = 50;
}

/// Single-shot timer driving the attribute flush. Injected so tests (and
/// event loops of any flavor) control time themselves: when the armed
/// delay elapses, call [`Emulator::flush_session_attributes`].
pub trait FlushTimer {
    /// Start the single shot; a no-op while already armed.
    fn arm(&mut self);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Minimal [`FlushTimer`] that only tracks the armed flag; suitable for
/// hosts that poll for pending updates.
#[derive(Debug, Default)]
pub struct ManualFlushTimer {
    armed: bool,
}

impl FlushTimer for ManualFlushTimer {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

lazy_static! {
    static ref CURSOR_SHAPE: Regex = Regex::new(r"CursorShape=\s*(\d+)").unwrap();
}

impl Emulator {
    /// Handle a completed OSC body of the form `Pa ; Pv`.
    pub(crate) fn process_session_attribute(
        &mut self,
        host: &mut dyn TerminalHost,
        body: &str,
        terminator: OscTerminator,
    ) {
        let Some((id_part, value)) = body.split_once(';') else {
            return self.malformed_osc(host, body);
        };
        let Ok(id) = id_part.parse::<i32>() else {
            return self.malformed_osc(host, body);
        };

        if id == attributes::HYPERLINK {
            // `Pv` is `id-part ; URI`; only the URI reaches the extractor.
            let url = value.split_once(';').map(|(_, url)| url).unwrap_or("");
            host.hyperlink(url);
            return;
        }
        if value == "?" {
            host.session_attribute_request(id, terminator);
            return;
        }
        if id == attributes::PROFILE_CHANGE {
            if let Some(captures) = CURSOR_SHAPE.captures(value) {
                let digits = &captures[1];
                let shape = digits
                    .chars()
                    .last()
                    .and_then(|d| d.to_digit(10))
                    .and_then(|d| CursorShape::from_index(d as i32));
                if let Some(shape) = shape {
                    host.set_cursor_style_request(shape, true);
                } else {
                    log::warn!("unrecognized cursor shape in profile change: {value}");
                }
                return;
            }
        }

        self.pending_attributes.insert(id, value.to_string());
        if !self.flush_timer.is_armed() {
            self.flush_timer.arm();
        }
    }

    /// Deliver the parked attribute updates in attribute-id order. Called
    /// by the embedder when the armed [`FlushTimer`] fires.
    pub fn flush_session_attributes(&mut self, host: &mut dyn TerminalHost) {
        let pending = std::mem::take(&mut self.pending_attributes);
        for (id, value) in pending {
            host.session_attribute_changed(id, &value);
        }
        self.flush_timer.disarm();
    }

    fn malformed_osc(&mut self, host: &mut dyn TerminalHost, body: &str) {
        let shortened: String = body.chars().take(40).collect();
        log::debug!("malformed operating system command: {shortened}");
        host.report_error(&ParseError::MalformedOsc(shortened));
    }
}
