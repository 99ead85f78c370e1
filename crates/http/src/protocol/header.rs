//! Header line splitting and the headers a proxy has to interpret.
//!
//! Header lines are never collected into a map. Each line is split on the fly,
//! looked up in [`HEADERS_OF_INTEREST`], and otherwise passed through opaquely.

use crate::protocol::ParseError;

/// Header names that drive framing or connection persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownHeader {
    Connection,
    /// Non-standard, but some clients send it instead of `Connection` when
    /// talking to a proxy.
    ProxyConnection,
    ContentLength,
    TransferEncoding,
}

/// Lowercase header names of interest, shared by both framers.
static HEADERS_OF_INTEREST: [(&str, KnownHeader); 4] = [
    ("connection", KnownHeader::Connection),
    ("proxy-connection", KnownHeader::ProxyConnection),
    ("content-length", KnownHeader::ContentLength),
    ("transfer-encoding", KnownHeader::TransferEncoding),
];

impl KnownHeader {
    /// Case-insensitive lookup of a header name.
    pub fn lookup(name: &[u8]) -> Option<Self> {
        HEADERS_OF_INTEREST.iter().find(|(known, _)| known.as_bytes().eq_ignore_ascii_case(name)).map(|&(_, header)| header)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KnownHeader::Connection => HEADERS_OF_INTEREST[0].0,
            KnownHeader::ProxyConnection => HEADERS_OF_INTEREST[1].0,
            KnownHeader::ContentLength => HEADERS_OF_INTEREST[2].0,
            KnownHeader::TransferEncoding => HEADERS_OF_INTEREST[3].0,
        }
    }
}

/// One header line split at its first colon.
///
/// Both parts are trimmed of surrounding ASCII whitespace. A line without a
/// colon has no value; folded continuation lines look like that and are never
/// joined with the previous header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    line: &'a [u8],
    name: &'a [u8],
    value: Option<&'a [u8]>,
}

pub fn split_header(line: &[u8]) -> HeaderLine<'_> {
    match line.iter().position(|&b| b == b':') {
        Some(colon) => HeaderLine { line, name: line[..colon].trim_ascii(), value: Some(line[colon + 1..].trim_ascii()) },
        None => HeaderLine { line, name: line.trim_ascii(), value: None },
    }
}

impl<'a> HeaderLine<'a> {
    /// The line as it was read, without its terminator.
    pub fn line(&self) -> &'a [u8] {
        self.line
    }

    pub fn name(&self) -> &'a [u8] {
        self.name
    }

    pub fn value(&self) -> Option<&'a [u8]> {
        self.value
    }

    pub fn known(&self) -> Option<KnownHeader> {
        KnownHeader::lookup(self.name)
    }

    /// Returns the value of a header that must be a complete `name: value` pair.
    ///
    /// # Errors
    ///
    /// [`ParseError::MultilineHeaderUnsupported`] when the line has no colon.
    pub fn require_value(&self) -> Result<&'a [u8], ParseError> {
        self.value.ok_or_else(|| ParseError::multiline_header(String::from_utf8_lossy(self.line)))
    }
}
