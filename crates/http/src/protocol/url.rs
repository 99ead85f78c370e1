//! Proxy request target resolution.
//!
//! A request sent to a proxy carries an absolute-form target
//! (`http://example.com/a?b`). This module splits such a target into the host
//! to dial and the path to put on the forwarded request line. The path is never
//! unescaped: the origin must see exactly what the client sent.

use std::borrow::Cow;
use std::fmt;

use crate::ensure;
use crate::protocol::ParseError;

const SCHEME_SEPARATOR: &str = "://";

/// Host and path of an absolute-form request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    host: String,
    path: String,
}

impl Url {
    /// Resolves a proxy request target.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidUri`] for an empty or origin-form (`/path`) target
    /// - [`ParseError::UnsupportedScheme`] for any scheme other than `http` and `https`
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        ensure!(!raw.is_empty() && !raw.starts_with('/'), ParseError::invalid_uri(raw));

        let rest = match raw.split_once(SCHEME_SEPARATOR) {
            None => raw,
            Some(("http" | "https", rest)) => rest,
            Some((scheme, _)) => return Err(ParseError::unsupported_scheme(scheme)),
        };

        let (host, path) = match rest.split_once('/') {
            None => (rest, "/".to_owned()),
            Some((host, "")) => (host, "/".to_owned()),
            Some((host, path)) => (host, format!("/{path}")),
        };

        Ok(Self { host: host.to_owned(), path })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the host, appending `default_port` when it carries no explicit port.
    pub fn host_with_port(&self, default_port: u16) -> Cow<'_, str> {
        if has_explicit_port(&self.host) {
            Cow::Borrowed(&self.host)
        } else {
            Cow::Owned(format!("{}:{default_port}", self.host))
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path)
    }
}

/// Reports whether `host` already ends with a `:port` suffix.
///
/// Most hosts carry no port, so the last byte is checked first. The first byte
/// is never taken as the separator: `":80"` has no host to attach a port to.
pub fn has_explicit_port(host: &str) -> bool {
    let Some((last, rest)) = host.as_bytes().split_last() else {
        return false;
    };
    if !last.is_ascii_digit() {
        return false;
    }

    for &c in rest.iter().skip(1).rev() {
        match c {
            b':' => return true,
            c if !c.is_ascii_digit() => return false,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ErrorKind;

    #[test]
    fn absolute_form() {
        let url = Url::parse("http://example.com/a").unwrap();
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.path(), "/a");

        let url = Url::parse("https://example.com:8443/a/b?c=%20d").unwrap();
        assert_eq!(url.host(), "example.com:8443");
        assert_eq!(url.path(), "/a/b?c=%20d");
    }

    #[test]
    fn empty_path_becomes_root() {
        for raw in ["http://example.com", "http://example.com/", "example.com", "example.com/"] {
            let url = Url::parse(raw).unwrap();
            assert_eq!(url.host(), "example.com", "{raw}");
            assert_eq!(url.path(), "/", "{raw}");
        }
    }

    #[test]
    fn no_scheme() {
        let url = Url::parse("example.com:8080/index.html").unwrap();
        assert_eq!(url.host(), "example.com:8080");
        assert_eq!(url.path(), "/index.html");
    }

    #[test]
    fn origin_form_rejected() {
        assert_eq!(Url::parse("/foo").unwrap_err().kind(), ErrorKind::InvalidUri);
        assert_eq!(Url::parse("").unwrap_err().kind(), ErrorKind::InvalidUri);
    }

    #[test]
    fn unsupported_scheme() {
        assert_eq!(Url::parse("ftp://host/x").unwrap_err().kind(), ErrorKind::UnsupportedScheme);
        assert_eq!(Url::parse("HTTP://host/x").unwrap_err().kind(), ErrorKind::UnsupportedScheme);
    }

    #[test]
    fn display() {
        let url = Url::parse("http://example.com/a").unwrap();
        assert_eq!(url.to_string(), "example.com/a");
    }

    #[test]
    fn explicit_port() {
        assert!(has_explicit_port("example.com:8080"));
        assert!(has_explicit_port("[::1]:443"));
        assert!(!has_explicit_port("example.com"));
        assert!(!has_explicit_port("a:b"));
        assert!(!has_explicit_port("host1"));
        assert!(!has_explicit_port(":80"));
        assert!(!has_explicit_port(""));
    }

    #[test]
    fn default_port() {
        let url = Url::parse("http://example.com/").unwrap();
        assert_eq!(url.host_with_port(80), "example.com:80");

        let url = Url::parse("http://example.com:8080/").unwrap();
        assert_eq!(url.host_with_port(80), "example.com:8080");
    }
}
