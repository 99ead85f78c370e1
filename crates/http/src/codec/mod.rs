//! HTTP codec module for framing proxied message heads
//!
//! This module turns the head of a client request or an origin response into a
//! [`Request`](crate::protocol::Request) or [`Response`](crate::protocol::Response)
//! and, in the same pass, builds the bytes to forward to the other leg.
//!
//! # Architecture
//!
//! The codec module is organized into several components:
//!
//! - Line input:
//!   - [`LineSource`]: blocking reader of terminated lines, implemented by every `BufRead`
//!   - [`LineDecoder`]: the same for a `BytesMut` filled by `FramedRead`
//!
//! - Head framing:
//!   - [`parse_request`] / [`RequestDecoder`]: client request heads
//!   - [`parse_response`] / [`ResponseDecoder`]: origin response heads
//!
//! Bodies are never read here. The framers stop right after the blank line
//! ending a head, and the framing flags of the parsed head tell the body
//! forwarder what follows.
//!
//! # Example
//!
//! ```no_run
//! use micro_proxy_http::codec::{parse_request, parse_response};
//!
//! let mut client: &[u8] = b"GET http://example.com/ HTTP/1.1\r\nProxy-Connection: keep-alive\r\n\r\n";
//! let request = parse_request(&mut client)?;
//! // ... write request.raw() to the origin, then read its response ...
//! let mut origin: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok";
//! let response = parse_response(&mut origin, request.method())?;
//! # Ok::<(), micro_proxy_http::protocol::ParseError>(())
//! ```

mod head;
mod line;
mod line_decoder;
mod request_decoder;
mod response_decoder;

pub use head::{parse_request, parse_response};
pub use line::{LineSource, read_check_crlf};
pub use line_decoder::{LineDecoder, MAX_LINE_BYTES};
pub use request_decoder::RequestDecoder;
pub use response_decoder::ResponseDecoder;
