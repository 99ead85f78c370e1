use std::io;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::LineDecoder;
use crate::codec::head::ResponseFramer;
use crate::protocol::{ParseError, Response};

/// A decoder for origin response heads.
///
/// Whether a response may have a body depends on the request it answers, so
/// the decoder is created with that request's method. Like [`RequestDecoder`](crate::codec::RequestDecoder),
/// it leaves body bytes in the buffer.
#[derive(Debug)]
pub struct ResponseDecoder {
    line_decoder: LineDecoder,
    request_method: String,
    framer: Option<ResponseFramer>,
}

impl ResponseDecoder {
    pub fn new<M: Into<String>>(request_method: M) -> Self {
        Self { line_decoder: LineDecoder::new(), request_method: request_method.into(), framer: None }
    }

    pub fn with_max_line_length<M: Into<String>>(request_method: M, max_line_length: usize) -> Self {
        Self { line_decoder: LineDecoder::with_max_length(max_line_length), request_method: request_method.into(), framer: None }
    }

    /// Sets the method of the request whose response is decoded next.
    pub fn set_request_method<M: Into<String>>(&mut self, request_method: M) {
        self.request_method = request_method.into();
    }

    pub fn request_method(&self) -> &str {
        &self.request_method
    }
}

impl Decoder for ResponseDecoder {
    type Item = Response;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(line) = self.line_decoder.decode(src)? {
            match &mut self.framer {
                None => self.framer = Some(ResponseFramer::start(&line, &self.request_method)?),
                Some(framer) => {
                    if framer.feed(&line)?.is_complete() {
                        return Ok(self.framer.take().map(ResponseFramer::finish));
                    }
                }
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(response) => Ok(Some(response)),
            None if buf.is_empty() && self.framer.is_none() => Ok(None),
            None => Err(ParseError::read(ResponseFramer::READ_CONTEXT, io::Error::from(io::ErrorKind::UnexpectedEof))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ErrorKind, PayloadSize};
    use futures::StreamExt;
    use tokio_util::codec::FramedRead;

    #[test]
    fn leaves_body_in_buffer() {
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello"[..]);
        let response = ResponseDecoder::new("GET").decode(&mut buf).unwrap().unwrap();

        assert_eq!(response.payload_size(), PayloadSize::Length(5));
        assert_eq!(&response.raw()[..], b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: Keep-Alive\r\n\r\n");
        assert_eq!(&buf[..], b"hello");
    }

    #[test]
    fn method_decides_body() {
        let input = &b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n"[..];
        let mut decoder = ResponseDecoder::new("HEAD");

        let response = decoder.decode(&mut BytesMut::from(input)).unwrap().unwrap();
        assert!(!response.has_body());

        decoder.set_request_method("GET");
        assert_eq!(decoder.request_method(), "GET");
        let response = decoder.decode(&mut BytesMut::from(input)).unwrap().unwrap();
        assert!(response.has_body());
    }

    #[test]
    fn eof_inside_head() {
        let mut decoder = ResponseDecoder::new("GET");
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n"[..]);

        let err = decoder.decode_eof(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(err.to_string().starts_with("reading response header"));
    }

    #[test]
    fn line_too_long() {
        let mut decoder = ResponseDecoder::with_max_line_length("GET", 16);
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nX-Padding: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n\r\n"[..]);

        assert_eq!(decoder.decode(&mut buf).unwrap_err().kind(), ErrorKind::LineTooLong);
    }

    #[tokio::test]
    async fn framed_bodyless_responses() {
        let input: &[u8] = b"HTTP/1.1 304 Not Modified\r\nConnection: close\r\n\r\nHTTP/1.1 204 No Content\r\n\r\n";
        let mut framed = FramedRead::new(input, ResponseDecoder::new("GET"));

        let first = framed.next().await.unwrap().unwrap();
        assert_eq!(first.status(), "304");
        assert!(!first.has_body());
        assert_eq!(&first.raw()[..], b"HTTP/1.1 304 Not Modified\r\nConnection: Keep-Alive\r\n\r\n");

        let second = framed.next().await.unwrap().unwrap();
        assert_eq!(second.status(), "204");
        assert_eq!(second.reason(), "No Content");

        assert!(framed.next().await.is_none());
    }
}
