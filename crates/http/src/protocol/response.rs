//! Origin response head.
//!
//! Besides the head rewritten for the client, a [`Response`] carries the
//! framing flags the body-forwarding side depends on.

use std::fmt;

use bytes::Bytes;
use http::{Method, StatusCode};

use crate::protocol::PayloadSize;

/// An origin response head, rewritten for the client.
#[derive(Debug, Clone)]
pub struct Response {
    status: String,
    reason: String,
    has_body: bool,
    content_length: u64,
    chunking: bool,
    raw: Bytes,
}

impl Response {
    pub(crate) fn new(status: String, reason: String, has_body: bool, content_length: u64, chunking: bool, raw: Bytes) -> Self {
        Self { status, reason, has_body, content_length, chunking, raw }
    }

    /// Returns the status code token exactly as the origin sent it.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the status code, if the token is a valid one.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_bytes(self.status.as_bytes()).ok()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn has_body(&self) -> bool {
        self.has_body
    }

    /// The last `Content-Length` seen while the response could still have a body.
    ///
    /// Only meaningful when [`has_body`](Self::has_body) is true and
    /// [`chunking`](Self::chunking) is false.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    pub fn chunking(&self) -> bool {
        self.chunking
    }

    /// Decides how the body is delimited.
    ///
    /// When an origin sends both `Content-Length` and `Transfer-Encoding: chunked`,
    /// chunked wins, whatever order the headers arrived in.
    pub fn payload_size(&self) -> PayloadSize {
        if !self.has_body {
            PayloadSize::Empty
        } else if self.chunking {
            PayloadSize::Chunked
        } else if self.content_length > 0 {
            PayloadSize::Length(self.content_length)
        } else {
            PayloadSize::UntilEof
        }
    }

    /// Returns the head to forward to the client, blank line included.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Consumes the response and returns the head to forward.
    pub fn into_raw(self) -> Bytes {
        self.raw
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.raw))
    }
}

/// Whether a response to `method` with `status` may carry a body.
///
/// Responses to `HEAD`, `1xx`, `204` and `304` never do.
pub fn response_may_have_body(method: &str, status: &str) -> bool {
    !(method == Method::HEAD
        || status == StatusCode::NOT_MODIFIED.as_str()
        || status == StatusCode::NO_CONTENT.as_str()
        || status.starts_with('1'))
}
