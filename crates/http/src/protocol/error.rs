use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Flat classification of a [`ParseError`], for callers that only need to decide
/// how to tear the connection leg down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedLine,
    InvalidUri,
    UnsupportedScheme,
    MultilineHeaderUnsupported,
    ContentLengthParse,
    NotCrlf,
    LineTooLong,
    Read,
}

/// Errors raised while framing a request or response head.
///
/// Every variant is fatal for the message being parsed: the caller must abort
/// the in-flight request or response and reset the affected connection leg.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed http {what} line: {line:?}")]
    MalformedLine { what: &'static str, line: String },

    #[error("invalid proxy request uri: {uri:?}")]
    InvalidUri { uri: String },

    #[error("{scheme} protocol not supported")]
    UnsupportedScheme { scheme: String },

    #[error("multi-line header not supported: {line:?}")]
    MultilineHeaderUnsupported { line: String },

    #[error("response content-length {value:?}: {source}")]
    ContentLengthParse {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("not crlf")]
    NotCrlf,

    #[error("line length exceed the limit {max_len}")]
    LineTooLong { max_len: usize },

    #[error("{context}: {source}")]
    Read {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_line<S: ToString>(what: &'static str, line: S) -> Self {
        Self::MalformedLine { what, line: line.to_string() }
    }

    pub fn invalid_uri<S: ToString>(uri: S) -> Self {
        Self::InvalidUri { uri: uri.to_string() }
    }

    pub fn unsupported_scheme<S: ToString>(scheme: S) -> Self {
        Self::UnsupportedScheme { scheme: scheme.to_string() }
    }

    pub fn multiline_header<S: ToString>(line: S) -> Self {
        Self::MultilineHeaderUnsupported { line: line.to_string() }
    }

    pub fn content_length<S: ToString>(value: S, source: ParseIntError) -> Self {
        Self::ContentLengthParse { value: value.to_string(), source }
    }

    pub fn line_too_long(max_len: usize) -> Self {
        Self::LineTooLong { max_len }
    }

    /// Wraps a stream failure with the step that was reading when it happened.
    ///
    /// An over-long line reported by a [`LineSource`](crate::codec::LineSource)
    /// comes back as [`ParseError::LineTooLong`] rather than a read failure.
    pub fn read<E: Into<io::Error>>(context: &'static str, e: E) -> Self {
        let source = e.into();
        match source.get_ref().and_then(|inner| inner.downcast_ref::<ParseError>()) {
            Some(&ParseError::LineTooLong { max_len }) => Self::line_too_long(max_len),
            _ => Self::Read { context, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedLine { .. } => ErrorKind::MalformedLine,
            Self::InvalidUri { .. } => ErrorKind::InvalidUri,
            Self::UnsupportedScheme { .. } => ErrorKind::UnsupportedScheme,
            Self::MultilineHeaderUnsupported { .. } => ErrorKind::MultilineHeaderUnsupported,
            Self::ContentLengthParse { .. } => ErrorKind::ContentLengthParse,
            Self::NotCrlf => ErrorKind::NotCrlf,
            Self::LineTooLong { .. } => ErrorKind::LineTooLong,
            Self::Read { .. } => ErrorKind::Read,
        }
    }

    /// Returns the underlying stream failure, if this error wraps one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Needed by [`tokio_util::codec::Decoder`], which surfaces transport failures
/// through the decoder's error type.
impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::read("reading stream", e)
    }
}
