//! Origin response head framing.
//!
//! The origin's `Connection` header is dropped and replaced by
//! `Connection: Keep-Alive`, since the client leg stays open no matter how the
//! origin leg ends. While the response may still carry a body, `Content-Length`
//! and `Transfer-Encoding` are interpreted to tell the body forwarder how many
//! bytes follow the head.

use tracing::{debug, trace};

use super::{Feed, split_start_line};
use crate::codec::LineSource;
use crate::protocol::header::{KnownHeader, split_header};
use crate::protocol::raw::RawHead;
use crate::protocol::{ParseError, Response, response_may_have_body};

const READ_CONTEXT: &str = "reading response header";

const CONNECTION_KEEP_ALIVE: &[u8] = b"Connection: Keep-Alive";
const CHUNKED: &[u8] = b"chunked";

/// Reads a status line and its headers, leaving any body in the stream.
///
/// `request_method` is the method of the request this response answers; a
/// response to `HEAD` never has a body.
///
/// # Errors
///
/// - [`ParseError::MalformedLine`] if the status line has fewer than three tokens
/// - [`ParseError::MultilineHeaderUnsupported`] for a `Content-Length` or
///   `Transfer-Encoding` line without a colon
/// - [`ParseError::ContentLengthParse`] if `Content-Length` is not a decimal
///   between zero and `i64::MAX`
/// - [`ParseError::LineTooLong`] if a line exceeds [`MAX_LINE_BYTES`](crate::codec::MAX_LINE_BYTES)
/// - [`ParseError::Read`] if the stream fails or ends inside the head
pub fn parse_response<S: LineSource + ?Sized>(source: &mut S, request_method: &str) -> Result<Response, ParseError> {
    let line = source.next_line().map_err(|e| ParseError::read(READ_CONTEXT, e))?;
    let mut framer = ResponseFramer::start(&line, request_method)?;

    loop {
        let line = source.next_line().map_err(|e| ParseError::read(READ_CONTEXT, e))?;
        if framer.feed(&line)?.is_complete() {
            return Ok(framer.finish());
        }
    }
}

#[derive(Debug)]
pub(crate) struct ResponseFramer {
    status: String,
    reason: String,
    has_body: bool,
    content_length: u64,
    chunking: bool,
    raw: RawHead,
}

impl ResponseFramer {
    pub(crate) const READ_CONTEXT: &'static str = READ_CONTEXT;

    pub(crate) fn start(line: &[u8], request_method: &str) -> Result<Self, ParseError> {
        let Some((_version, status, reason)) = split_start_line(line) else {
            return Err(ParseError::malformed_line("response status", String::from_utf8_lossy(line)));
        };

        let status = String::from_utf8_lossy(status).into_owned();
        let reason = String::from_utf8_lossy(reason).into_owned();
        let has_body = response_may_have_body(request_method, &status);
        trace!(%status, %reason, method = request_method, has_body, "parsed status line");

        let mut raw = RawHead::new();
        raw.push_line(line);

        Ok(Self { status, reason, has_body, content_length: 0, chunking: false, raw })
    }

    pub(crate) fn feed(&mut self, line: &[u8]) -> Result<Feed, ParseError> {
        if line.is_empty() {
            self.raw.push_line(CONNECTION_KEEP_ALIVE);
            return Ok(Feed::Complete);
        }

        let header = split_header(line);
        let known = header.known();
        if known == Some(KnownHeader::Connection) {
            return Ok(Feed::NeedMore);
        }
        self.raw.push_line(line);

        if !self.has_body {
            return Ok(Feed::NeedMore);
        }

        match known {
            Some(KnownHeader::ContentLength) => {
                let value = String::from_utf8_lossy(header.require_value()?);
                // non-negative and within `i64`
                self.content_length = value
                    .parse::<i64>()
                    .and_then(|_| value.parse::<u64>())
                    .map_err(|e| ParseError::content_length(&value, e))?;
                if self.content_length == 0 {
                    self.has_body = false;
                }
            }
            Some(KnownHeader::TransferEncoding) => {
                let value = header.require_value()?;
                if value.eq_ignore_ascii_case(CHUNKED) {
                    self.chunking = true;
                } else {
                    debug!(transfer_encoding = %String::from_utf8_lossy(value), "transfer-encoding not supported");
                }
            }
            _ => {}
        }
        Ok(Feed::NeedMore)
    }

    pub(crate) fn finish(self) -> Response {
        let raw = self.raw.finish();
        trace!(
            has_body = self.has_body,
            content_length = self.content_length,
            chunking = self.chunking,
            head_size = raw.len(),
            "parsed response head"
        );
        Response::new(self.status, self.reason, self.has_body, self.content_length, self.chunking, raw)
    }
}
