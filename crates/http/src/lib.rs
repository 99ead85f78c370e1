//! HTTP/1.1 head framing for a forwarding proxy
//!
//! This crate reads the head of a client request or an origin response, line by
//! line, and produces two things in one pass: a small structured description of
//! the message, and the corrected bytes to forward to the opposite connection
//! leg. It decides how the following body is delimited and rewrites connection
//! persistence between the client↔proxy and proxy↔origin legs.
//!
//! # Features
//!
//! - Absolute-form request targets resolved into host and path, without unescaping
//! - Request lines rewritten to origin-form `HTTP/1.1` with `Connection: close`
//! - `Connection` / `Proxy-Connection` interpreted for client keep-alive
//! - Response framing from the request method, the status, `Content-Length`
//!   and `Transfer-Encoding: chunked`
//! - Every other header line forwarded byte-for-byte, in order
//! - Blocking parsing over any `BufRead`, or `tokio_util` decoders for `FramedRead`
//!
//! # Example
//!
//! ```no_run
//! use std::io::{BufReader, Write};
//! use std::net::TcpStream;
//! use micro_proxy_http::codec::{parse_request, parse_response};
//! use micro_proxy_http::protocol::PayloadSize;
//!
//! fn forward(client: TcpStream) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client_reader = BufReader::new(client.try_clone()?);
//!     let request = parse_request(&mut client_reader)?;
//!
//!     let mut origin = TcpStream::connect(&*request.url().host_with_port(80))?;
//!     origin.write_all(request.raw())?;
//!
//!     let mut origin_reader = BufReader::new(origin);
//!     let response = parse_response(&mut origin_reader, request.method())?;
//!     (&client).write_all(response.raw())?;
//!
//!     match response.payload_size() {
//!         PayloadSize::Length(n) => { /* copy n bytes */ }
//!         PayloadSize::Chunked => { /* copy chunk by chunk */ }
//!         PayloadSize::UntilEof => { /* copy until the origin closes */ }
//!         PayloadSize::Empty => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - [`protocol`]: the parsed entities, target resolution, header splitting and errors
//! - [`codec`]: the line sources and the request/response framers
//!
//! # Error Handling
//!
//! Every failure is a [`protocol::ParseError`] and is fatal for the message being
//! parsed. The only tolerated oddity is an unsupported `Transfer-Encoding`
//! value, which is logged and ignored.
//!
//! # Limitations
//!
//! - Folded (multi-line) header values are not supported
//! - Connections to the origin are never reused
//! - Maximum line size: 8KB

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
