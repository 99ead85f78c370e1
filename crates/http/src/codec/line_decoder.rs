//! Line splitting for the non-blocking path.
//!
//! [`LineDecoder`] cuts terminated lines out of a [`BytesMut`] filled by a
//! `FramedRead`. It only consumes whole lines, so whatever follows the last
//! line a framer asked for stays in the buffer for the body forwarder.

use std::cmp;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::protocol::ParseError;

/// Maximum length in bytes of one request, status or header line
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Decoder yielding lines with their `\n` or `\r\n` terminator removed.
#[derive(Debug, Clone)]
pub struct LineDecoder {
    max_length: usize,
    /// Where to resume searching for `\n`, so a slowly arriving line is not rescanned.
    next_index: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_BYTES)
    }

    /// Creates a decoder rejecting lines longer than `max_length` bytes,
    /// terminator excluded.
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length, next_index: 0 }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineDecoder {
    type Item = Bytes;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // a `\r` before `\n` is not counted against the limit
        let read_to = cmp::min(self.max_length.saturating_add(2), src.len());

        match src[self.next_index..read_to].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                let newline = self.next_index + offset;
                self.next_index = 0;

                let mut line = src.split_to(newline + 1);
                line.truncate(newline);
                if line.last() == Some(&b'\r') {
                    line.truncate(newline - 1);
                }

                if line.len() > self.max_length {
                    return Err(ParseError::line_too_long(self.max_length));
                }
                Ok(Some(line.freeze()))
            }
            None if src.len() > self.max_length.saturating_add(1) => Err(ParseError::line_too_long(self.max_length)),
            None => {
                self.next_index = read_to;
                Ok(None)
            }
        }
    }
}
