use bytes::{BufMut, Bytes, BytesMut};

/// Initial buffer size allocated for a rewritten head
const INIT_HEAD_SIZE: usize = 1024;

const CRLF: &[u8] = b"\r\n";

/// Append-only builder for the bytes forwarded to the opposite connection leg.
///
/// Lines are pushed without terminator and always end up `\r\n` terminated.
/// [`RawHead::finish`] writes the blank line closing the head and freezes the
/// buffer, so a half-built head is never handed out.
#[derive(Debug)]
pub(crate) struct RawHead {
    buf: BytesMut,
}

impl RawHead {
    pub(crate) fn new() -> Self {
        Self { buf: BytesMut::with_capacity(INIT_HEAD_SIZE) }
    }

    pub(crate) fn push_line(&mut self, line: &[u8]) {
        self.buf.put_slice(line);
        self.buf.put_slice(CRLF);
    }

    pub(crate) fn push_parts(&mut self, parts: &[&[u8]]) {
        for part in parts {
            self.buf.put_slice(part);
        }
        self.buf.put_slice(CRLF);
    }

    pub(crate) fn finish(mut self) -> Bytes {
        self.buf.put_slice(CRLF);
        self.buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_appends_blank_line() {
        let mut raw = RawHead::new();
        raw.push_parts(&[b"GET", b" ", b"/", b" ", b"HTTP/1.1"]);
        raw.push_line(b"Host: example.com");

        assert_eq!(&raw.finish()[..], b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
    }

    #[test]
    fn empty_head() {
        assert_eq!(&RawHead::new().finish()[..], b"\r\n");
    }
}
