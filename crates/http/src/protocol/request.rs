//! Proxy request head.
//!
//! A [`Request`] is produced by one parse pass over the client stream and is
//! immutable afterwards. The parsed fields are metadata for routing and
//! persistence decisions; [`Request::raw`] is what actually goes to the origin.

use std::fmt;

use bytes::Bytes;

use crate::protocol::Url;

/// A client request head, rewritten for the origin server.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    url: Url,
    proto: String,
    keep_alive: bool,
    raw: Bytes,
}

impl Request {
    pub(crate) fn new(method: String, url: Url, proto: String, keep_alive: bool, raw: Bytes) -> Self {
        Self { method, url, proto, keep_alive, raw }
    }

    /// Returns the request method exactly as the client sent it.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the protocol version token of the client's request line.
    ///
    /// The forwarded request line always says `HTTP/1.1`, whatever this is.
    pub fn proto(&self) -> &str {
        &self.proto
    }

    /// Whether the client asked to keep its connection to the proxy open,
    /// through `Connection` or `Proxy-Connection`.
    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// Returns the head to forward to the origin, blank line included.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Consumes the request and returns the head to forward.
    pub fn into_raw(self) -> Bytes {
        self.raw
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Request] {} {}", self.method, self.url)
    }
}
