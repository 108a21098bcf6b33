use crate::error::protocol::ProtocolError;
use crate::protocol::Message;

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;

/// Serialize a message to compact JSON and append the line terminator.
///
/// Compact JSON escapes control characters, so the payload can never
/// contain a raw `\n`; the terminator is the only newline in the output.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
#[track_caller]
pub fn encode_line<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    let mut line = serde_json::to_vec(message).map_err(|e| ProtocolError::Encode {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;
    line.push(b'\n');
    Ok(line)
}

/// Incremental decoder for one connection's byte stream.
///
/// Bytes accumulate until a `\n` arrives; each complete line is removed
/// from the buffer once parsed, so a healthy connection leaks nothing
/// across messages. A line that fails to parse is reported as an error and
/// dropped - the stream itself survives.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly read bytes, however the TCP segments happened to split.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Pop the next complete line as a parsed message.
    ///
    /// Returns `None` when no full line is buffered yet. Blank lines are
    /// skipped; a malformed line yields `Some(Err(_))` and is consumed.
    pub fn next_message(&mut self) -> Option<Result<Message, ProtocolError>> {
        loop {
            let newline = self.buffer.iter().position(|&b| b == b'\n')?;
            let line: Vec<u8> = self.buffer.drain(..=newline).take(newline).collect();

            let text = match String::from_utf8(line) {
                Ok(text) => text,
                Err(e) => {
                    return Some(Err(ProtocolError::Decode {
                        message: format!("Non-UTF-8 line: {e}"),
                        location: ErrorLocation::from(Location::caller()),
                    }));
                }
            };

            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            return Some(Message::parse(trimmed));
        }
    }
}
