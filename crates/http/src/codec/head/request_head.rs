//! Client request head framing.
//!
//! The request line is rewritten to origin-form with a fixed `HTTP/1.1`
//! version, followed by `Connection: close`: connections to the origin are
//! never reused. `Connection` and `Proxy-Connection` describe the client leg
//! only, so they are consumed here and not forwarded. Every other header line
//! is copied through untouched, in order.

use tracing::trace;

use super::{Feed, split_start_line};
use crate::codec::LineSource;
use crate::protocol::header::{KnownHeader, split_header};
use crate::protocol::raw::RawHead;
use crate::protocol::{ParseError, Request, Url};

const READ_CONTEXT: &str = "reading client request";

const FORWARD_VERSION: &[u8] = b"HTTP/1.1";
const CONNECTION_CLOSE: &[u8] = b"Connection: close";
const KEEP_ALIVE: &[u8] = b"keep-alive";

/// Reads a request line and its headers, leaving any body in the stream.
///
/// # Errors
///
/// - [`ParseError::MalformedLine`] if the request line has fewer than three tokens
/// - [`ParseError::InvalidUri`] or [`ParseError::UnsupportedScheme`] for a bad target
/// - [`ParseError::MultilineHeaderUnsupported`] for a `Connection` or
///   `Proxy-Connection` line without a colon
/// - [`ParseError::LineTooLong`] if a line exceeds [`MAX_LINE_BYTES`](crate::codec::MAX_LINE_BYTES)
/// - [`ParseError::Read`] if the stream fails or ends inside the head
pub fn parse_request<S: LineSource + ?Sized>(source: &mut S) -> Result<Request, ParseError> {
    let line = source.next_line().map_err(|e| ParseError::read(READ_CONTEXT, e))?;
    let mut framer = RequestFramer::start(&line)?;

    loop {
        let line = source.next_line().map_err(|e| ParseError::read(READ_CONTEXT, e))?;
        if framer.feed(&line)?.is_complete() {
            return Ok(framer.finish());
        }
    }
}

#[derive(Debug)]
pub(crate) struct RequestFramer {
    method: String,
    url: Url,
    proto: String,
    keep_alive: bool,
    raw: RawHead,
}

impl RequestFramer {
    pub(crate) const READ_CONTEXT: &'static str = READ_CONTEXT;

    pub(crate) fn start(line: &[u8]) -> Result<Self, ParseError> {
        let Some((method, target, proto)) = split_start_line(line) else {
            return Err(ParseError::malformed_line("request", String::from_utf8_lossy(line)));
        };

        let Ok(target) = std::str::from_utf8(target) else {
            return Err(ParseError::invalid_uri(String::from_utf8_lossy(target)));
        };
        let url = Url::parse(target)?;

        let mut raw = RawHead::new();
        raw.push_parts(&[method, b" ", url.path().as_bytes(), b" ", FORWARD_VERSION]);
        raw.push_line(CONNECTION_CLOSE);

        let method = String::from_utf8_lossy(method).into_owned();
        let proto = String::from_utf8_lossy(proto).into_owned();
        trace!(%method, host = url.host(), path = url.path(), %proto, "parsed request line");

        Ok(Self { method, url, proto, keep_alive: false, raw })
    }

    pub(crate) fn feed(&mut self, line: &[u8]) -> Result<Feed, ParseError> {
        if line.is_empty() {
            return Ok(Feed::Complete);
        }

        let header = split_header(line);
        match header.known() {
            Some(KnownHeader::Connection | KnownHeader::ProxyConnection) => {
                // the last one wins when a client sends both
                self.keep_alive = header.require_value()?.eq_ignore_ascii_case(KEEP_ALIVE);
            }
            _ => self.raw.push_line(line),
        }
        Ok(Feed::NeedMore)
    }

    pub(crate) fn finish(self) -> Request {
        let raw = self.raw.finish();
        trace!(keep_alive = self.keep_alive, head_size = raw.len(), "parsed request head");
        Request::new(self.method, self.url, self.proto, self.keep_alive, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MAX_LINE_BYTES;
    use crate::protocol::ErrorKind;
    use indoc::indoc;
    use std::io;

    fn parse(input: &str) -> Result<Request, ParseError> {
        let mut input = input.as_bytes();
        parse_request(&mut input)
    }

    /// `indoc!` fixtures use bare `\n`; the forwarded head always uses `\r\n`.
    fn crlf(s: &str) -> String {
        s.replace('\n', "\r\n")
    }

    #[test]
    fn proxy_connection_keep_alive() {
        let request = parse("GET http://example.com/a HTTP/1.1\r\nProxy-Connection: keep-alive\r\n\r\n").unwrap();

        assert!(request.keep_alive());
        assert_eq!(&request.raw()[..], b"GET /a HTTP/1.1\r\nConnection: close\r\n\r\n");
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET http://127.0.0.1:8080/index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*
        Proxy-Connection: Keep-Alive

        "##};

        let request = parse(str).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.proto(), "HTTP/1.1");
        assert_eq!(request.url().host(), "127.0.0.1:8080");
        assert_eq!(request.url().path(), "/index.html");
        assert!(request.keep_alive());

        let expected = indoc! {r##"
        GET /index.html HTTP/1.1
        Connection: close
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};
        assert_eq!(&request.raw()[..], crlf(expected).as_bytes());
    }

    #[test]
    fn headers_forwarded_in_order() {
        let str = indoc! {r##"
        POST http://example.com/submit?a=1&b=%2F HTTP/1.0
        Host: example.com
        Connection: keep-alive
        Cookie: a=1
        Content-Length: 5
        Cookie: b=2
        sec-ch-ua: "#Not_A Brand";v="99", "Chromium";v="109"

        hello"##};

        let mut input = str.as_bytes();
        let request = parse_request(&mut input).unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(request.proto(), "HTTP/1.0");
        assert_eq!(request.url().path(), "/submit?a=1&b=%2F");
        assert!(request.keep_alive());
        // the body is left in the stream
        assert_eq!(input, b"hello");

        let expected = indoc! {r##"
        POST /submit?a=1&b=%2F HTTP/1.1
        Connection: close
        Host: example.com
        Cookie: a=1
        Content-Length: 5
        Cookie: b=2
        sec-ch-ua: "#Not_A Brand";v="99", "Chromium";v="109"

        "##};
        assert_eq!(&request.raw()[..], crlf(expected).as_bytes());
    }

    #[test]
    fn connection_close_clears_keep_alive() {
        let request =
            parse("GET http://example.com/ HTTP/1.1\r\nProxy-Connection: keep-alive\r\nConnection: close\r\n\r\n").unwrap();
        assert!(!request.keep_alive());

        let request = parse("GET http://example.com/ HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
        assert!(!request.keep_alive());
    }

    #[test]
    fn connection_header_ignores_case() {
        let request = parse("GET http://example.com/ HTTP/1.1\r\nCONNECTION :  KEEP-ALIVE \r\n\r\n").unwrap();

        assert!(request.keep_alive());
        assert_eq!(&request.raw()[..], b"GET / HTTP/1.1\r\nConnection: close\r\n\r\n");
    }

    #[test]
    fn host_only_target() {
        let request = parse("GET example.com HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.url().host(), "example.com");
        assert_eq!(request.url().path(), "/");
        assert_eq!(request.to_string(), "[Request] GET example.com/");
    }

    #[test]
    fn malformed_request_line() {
        assert_eq!(parse("GET http://example.com/\r\n\r\n").unwrap_err().kind(), ErrorKind::MalformedLine);
        assert_eq!(parse("\r\n").unwrap_err().kind(), ErrorKind::MalformedLine);
    }

    #[test]
    fn uri_errors_propagate() {
        assert_eq!(parse("GET /index.html HTTP/1.1\r\n\r\n").unwrap_err().kind(), ErrorKind::InvalidUri);
        assert_eq!(parse("GET ftp://example.com/ HTTP/1.1\r\n\r\n").unwrap_err().kind(), ErrorKind::UnsupportedScheme);
    }

    #[test]
    fn folded_connection_header() {
        let err = parse("GET http://example.com/ HTTP/1.1\r\nProxy-Connection\r\n\r\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MultilineHeaderUnsupported);
    }

    #[test]
    fn folded_other_header_passes_through() {
        let request = parse("GET http://example.com/ HTTP/1.1\r\nX-Long: a\r\n b\r\n\r\n").unwrap();
        assert_eq!(&request.raw()[..], b"GET / HTTP/1.1\r\nConnection: close\r\nX-Long: a\r\n b\r\n\r\n");
    }

    #[test]
    fn truncated_head() {
        let err = parse("GET http://example.com/ HTTP/1.1\r\nHost: example.com\r\n").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(err.to_string().starts_with(READ_CONTEXT));
        assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::UnexpectedEof));

        assert_eq!(parse("").unwrap_err().kind(), ErrorKind::Read);
    }

    #[test]
    fn oversized_lines_rejected() {
        let target = format!("GET http://example.com/{} HTTP/1.1\r\n\r\n", "a".repeat(MAX_LINE_BYTES));
        assert_eq!(parse(&target).unwrap_err().kind(), ErrorKind::LineTooLong);

        // a client that never ends its header line
        let header = format!("GET http://example.com/ HTTP/1.1\r\nCookie: {}", "a".repeat(MAX_LINE_BYTES * 2));
        assert_eq!(parse(&header).unwrap_err().kind(), ErrorKind::LineTooLong);
    }

    #[test]
    fn raw_head_handed_over() {
        let request = parse("PUT http://example.com/a HTTP/1.0\r\nHost: example.com\r\n\r\n").unwrap();
        assert_eq!(request.to_string(), "[Request] PUT example.com/a");
        assert_eq!(&request.into_raw()[..], b"PUT /a HTTP/1.1\r\nConnection: close\r\nHost: example.com\r\n\r\n");
    }
}
