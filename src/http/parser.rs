use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Path served when the client asks for `/`.
pub const INDEX_PATH: &str = "/index.html";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty request")]
    Empty,

    #[error("request line has no method")]
    MissingMethod,

    #[error("request line has no target path")]
    MissingPath,
}

/// Parses one raw request as read from the socket.
///
/// The request line is split on its first two spaces into method, path and
/// version. The path is anchored at the served root by prefixing `.`; no
/// other normalisation happens here, so `..` segments pass through.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    // Look for header/body separator
    let (header_bytes, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], Some(buf[end + 4..].to_vec())),
        None => (buf, None),
    };

    let head = String::from_utf8_lossy(header_bytes);
    let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    // Request line
    let request_line = lines.next().ok_or(ParseError::Empty)?;
    let mut parts = request_line.splitn(3, ' ');

    let method_str = parts
        .next()
        .filter(|m| !m.is_empty())
        .ok_or(ParseError::MissingMethod)?;
    let raw_path = parts
        .next()
        .filter(|p| !p.is_empty())
        .ok_or(ParseError::MissingPath)?;
    let version = parts.next().unwrap_or_default();

    let path = if raw_path == "/" { INDEX_PATH } else { raw_path };

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        // Lines without ": " are ignored rather than rejected
        if let Some((key, value)) = line.split_once(": ") {
            headers.insert(key.to_ascii_lowercase(), value.trim().to_string());
        }
    }

    Ok(Request {
        method: Method::parse(method_str),
        path: format!(".{path}"),
        version: version.to_string(),
        headers,
        body,
    })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
