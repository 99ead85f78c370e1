//! Proxy protocol types.
//!
//! This module holds what the framers produce and the pieces they share:
//!
//! - **Entities**: [`Request`] and [`Response`], each carrying the parsed
//!   metadata next to the rewritten head bytes to forward
//! - **Target resolution** ([`url`]): [`Url`] and [`has_explicit_port`]
//! - **Header lines** ([`header`]): [`split_header`] and the static table of
//!   headers a proxy interprets ([`KnownHeader`])
//! - **Body framing**: [`PayloadSize`], derived from a [`Response`]
//! - **Error Handling** ([`error`]): [`ParseError`] and its flat [`ErrorKind`]

mod error;
pub use error::ErrorKind;
pub use error::ParseError;

pub mod header;
pub use header::HeaderLine;
pub use header::KnownHeader;
pub use header::split_header;

mod payload;
pub use payload::PayloadSize;

pub(crate) mod raw;

mod request;
pub use request::Request;

mod response;
pub use response::Response;
pub use response::response_may_have_body;

pub mod url;
pub use url::Url;
pub use url::has_explicit_port;
