//! Blocking line-oriented input for the head framers.
//!
//! The framers never touch a socket. They pull lines from a [`LineSource`],
//! which every [`BufRead`] already is, so a `BufReader<TcpStream>` or a byte
//! slice can be handed to [`parse_request`](crate::codec::parse_request) as is.
//! Timeouts and cancellation belong to the source and reach the framers as
//! read errors.

use std::io::{self, BufRead, Read};

use crate::codec::MAX_LINE_BYTES;
use crate::ensure;
use crate::protocol::ParseError;

const CRLF: [u8; 2] = *b"\r\n";

/// A buffered stream the framers read from.
pub trait LineSource {
    /// Reads one line and strips its `\n` or `\r\n` terminator.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if the stream ends before a
    /// terminator, with [`io::ErrorKind::InvalidData`] carrying
    /// [`ParseError::LineTooLong`] past [`MAX_LINE_BYTES`], and with whatever
    /// the stream reports otherwise.
    fn next_line(&mut self) -> io::Result<Vec<u8>>;

    /// Fills `buf` with raw bytes, failing if the stream ends first.
    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<R: BufRead + ?Sized> LineSource for R {
    fn next_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        // a `\r` before `\n` is not counted against the limit
        Read::take(&mut *self, MAX_LINE_BYTES as u64 + 2).read_until(b'\n', &mut line)?;
        if line.last() != Some(&b'\n') {
            if line.len() > MAX_LINE_BYTES {
                return Err(line_too_long());
            }
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed before end of line"));
        }
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.len() > MAX_LINE_BYTES {
            return Err(line_too_long());
        }
        Ok(line)
    }

    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.read_exact(buf)
    }
}

fn line_too_long() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, ParseError::line_too_long(MAX_LINE_BYTES))
}

/// Reads two raw bytes and checks they are `\r\n`.
///
/// Body forwarders call this after a chunk's data to stay in sync with the
/// chunk framing.
///
/// # Errors
///
/// [`ParseError::NotCrlf`] for any other two bytes, [`ParseError::Read`] if the
/// stream fails or ends early.
pub fn read_check_crlf<S: LineSource + ?Sized>(source: &mut S) -> Result<(), ParseError> {
    let mut buf = [0u8; 2];
    source.read_raw(&mut buf).map_err(|e| ParseError::read("reading crlf", e))?;
    ensure!(buf == CRLF, ParseError::NotCrlf);
    Ok(())
}
