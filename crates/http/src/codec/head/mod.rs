//! Request and response head framing.
//!
//! Both framers are line driven: they are started with the first line of a
//! head, fed one header line at a time and finished at the blank line. The
//! blocking entry points ([`parse_request`], [`parse_response`]) and the
//! `tokio_util` decoders share this state, so both paths produce identical
//! bytes for identical input.

mod request_head;
mod response_head;

pub use request_head::parse_request;
pub use response_head::parse_response;

pub(crate) use request_head::RequestFramer;
pub(crate) use response_head::ResponseFramer;

/// Outcome of feeding one header line to a framer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Feed {
    NeedMore,
    /// The blank line ending the head was consumed.
    Complete,
}

impl Feed {
    pub(crate) fn is_complete(self) -> bool {
        matches!(self, Feed::Complete)
    }
}

/// Splits a request or status line on single spaces into three tokens, the
/// last one keeping any further spaces.
fn split_start_line(line: &[u8]) -> Option<(&[u8], &[u8], &[u8])> {
    let mut tokens = line.splitn(3, |&b| b == b' ');
    Some((tokens.next()?, tokens.next()?, tokens.next()?))
}
