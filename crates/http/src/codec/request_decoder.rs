//! HTTP request head decoder module
//!
//! This module drives the request framer from a byte buffer instead of a
//! blocking reader, so a proxy session can read client requests through a
//! `FramedRead` over any tokio `AsyncRead`.
//!
//! # Example
//!
//! ```no_run
//! use micro_proxy_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET http://example.com/ HTTP/1.1\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer);
//! ```

use std::io;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::LineDecoder;
use crate::codec::head::RequestFramer;
use crate::protocol::{ParseError, Request};

/// A decoder for proxy request heads.
///
/// Only head bytes are consumed. After a [`Request`] is yielded, whatever
/// follows in the buffer is body data and belongs to the body forwarder
/// (see `FramedRead::read_buffer_mut`).
///
/// # State Machine
///
/// The decoder maintains its state through the `framer` field:
/// - `None`: waiting for a request line
/// - `Some(RequestFramer)`: reading header lines
#[derive(Debug)]
pub struct RequestDecoder {
    line_decoder: LineDecoder,
    framer: Option<RequestFramer>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a decoder whose lines may not exceed `max_line_length` bytes
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self { line_decoder: LineDecoder::with_max_length(max_line_length), framer: None }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { line_decoder: LineDecoder::new(), framer: None }
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode a request head from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the blank line ending the head was reached
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the head is malformed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(line) = self.line_decoder.decode(src)? {
            match &mut self.framer {
                None => self.framer = Some(RequestFramer::start(&line)?),
                Some(framer) => {
                    if framer.feed(&line)?.is_complete() {
                        return Ok(self.framer.take().map(RequestFramer::finish));
                    }
                }
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None if buf.is_empty() && self.framer.is_none() => Ok(None),
            None => Err(ParseError::read(RequestFramer::READ_CONTEXT, io::Error::from(io::ErrorKind::UnexpectedEof))),
        }
    }
}
