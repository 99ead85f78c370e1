//! Reads one message head from stdin and prints how a proxy would forward it.
//!
//! ```sh
//! printf 'GET http://example.com/ HTTP/1.1\r\nProxy-Connection: keep-alive\r\n\r\n' | cargo run --example inspect_head
//! printf 'HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok' | cargo run --example inspect_head -- GET
//! ```

use std::io::{self, BufRead};

use micro_proxy_http::codec::{parse_request, parse_response};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).with_writer(io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let request_method = std::env::args().nth(1).unwrap_or_else(|| "GET".to_owned());

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let is_response = match input.fill_buf() {
        Ok(buf) => buf.starts_with(b"HTTP/"),
        Err(e) => {
            error!(cause = %e, "can't read stdin");
            return;
        }
    };

    if is_response {
        match parse_response(&mut input, &request_method) {
            Ok(response) => {
                info!(status = response.status(), payload_size = ?response.payload_size(), "parsed response");
                print!("{response}");
            }
            Err(e) => error!(kind = ?e.kind(), cause = %e, "invalid response head"),
        }
    } else {
        match parse_request(&mut input) {
            Ok(request) => {
                info!(host = %request.url().host_with_port(80), keep_alive = request.keep_alive(), "{request}");
                print!("{}", String::from_utf8_lossy(request.raw()));
            }
            Err(e) => error!(kind = ?e.kind(), cause = %e, "invalid request head"),
        }
    }
}
