use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Separator between the header block and the body.
pub const HTTP_DELIM: &[u8] = b"\r\n\r\n";
/// Document served for `/` and bare asset-directory requests.
pub const DEFAULT_INDEX: &str = "index.html";

pub const HDR_CONNECTION: &str = "Connection:";
pub const HDR_CONTENT_LENGTH: &str = "Content-Length:";
pub const HDR_CONTENT_TYPE: &str = "Content-Type:";

pub const MIME_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MIME_JSON: &str = "application/json";

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidContentLength,
    /// No `\r\n\r\n` in the data read so far.
    Incomplete,
}

/// Everything the connection needs from the header block.
#[derive(Debug)]
pub struct RequestHead {
    /// Request with method, path, query, params and keep-alive filled in.
    pub request: Request,
    /// Offset of the `\r\n\r\n` delimiter.
    pub header_end: usize,
    pub content_length: Option<usize>,
    pub content_type: Option<String>,
}

impl RequestHead {
    /// Offset of the first body byte.
    pub fn body_start(&self) -> usize {
        self.header_end + HTTP_DELIM.len()
    }
}

/// Parses the request line and the headers the server cares about.
///
/// The body is not touched: the caller decides whether to read it based on
/// `content_length`.
pub fn parse_request_head(buf: &[u8]) -> Result<RequestHead, ParseError> {
    let header_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let (method, target) = parse_request_line(&buf[..header_end])?;

    let mut request = parse_url(target);
    request.method = method;

    if let Some(connection) = extract_header_value(buf, header_end, HDR_CONNECTION) {
        if connection.to_ascii_lowercase().contains("close") {
            request.keep_alive = false;
        }
    }

    let content_length = extract_header_value(buf, header_end, HDR_CONTENT_LENGTH)
        .map(|v| v.trim().parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?;

    let content_type = extract_header_value(buf, header_end, HDR_CONTENT_TYPE).map(str::to_owned);

    Ok(RequestHead {
        request,
        header_end,
        content_length,
        content_type,
    })
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HTTP_DELIM.len()).position(|w| w == HTTP_DELIM)
}

/// Splits `METHOD target [version]` out of the first line.
pub fn parse_request_line(head: &[u8]) -> Result<(Method, &str), ParseError> {
    let line_end = head
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(head.len());
    let line = std::str::from_utf8(&head[..line_end]).map_err(|_| ParseError::InvalidRequest)?;

    let mut parts = line.split_whitespace();
    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().ok_or(ParseError::InvalidRequest)?;

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;
    Ok((method, target))
}

/// Splits a request target into path, raw query and query parameters.
///
/// `/` maps to the default index document and one leading `/` is stripped.
/// Query values are stored as sent, without percent-decoding.
pub fn parse_url(url: &str) -> Request {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    };

    let path = if path == "/" { DEFAULT_INDEX } else { path };
    let path = path.strip_prefix('/').unwrap_or(path);

    let mut request = Request {
        path: path.to_string(),
        query: query.to_string(),
        ..Request::default()
    };
    parse_pairs(query, &mut request.params, |s| s.to_string());
    request
}

/// Decodes `+` to space and `%XX` to the byte it names.
///
/// A `%` that is not followed by two hex digits is kept literally.
pub fn url_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        decoded.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        decoded.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parses an `application/x-www-form-urlencoded` body into `params`.
pub fn parse_form_body(body: &str, params: &mut HashMap<String, String>) {
    parse_pairs(body, params, url_decode);
}

fn parse_pairs(input: &str, params: &mut HashMap<String, String>, decode: impl Fn(&str) -> String) {
    for segment in input.split('&') {
        if let Some((key, value)) = segment.split_once('=') {
            params.insert(decode(key), decode(value));
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum JsonState {
    Searching,
    Key,
    Value,
}

/// Extracts `"key": value` pairs from a flat JSON object into `params`.
///
/// This is a small scanner, not a JSON parser. String values honor `\"`;
/// numbers and booleans are kept as their literal text. Nested objects and
/// arrays are not supported: their brackets end up as part of a value.
pub fn parse_json_body(body: &str, params: &mut HashMap<String, String>) {
    let mut state = JsonState::Searching;
    let mut key = String::new();
    let mut value = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            JsonState::Searching => {
                if c == '"' {
                    state = JsonState::Key;
                }
            }
            JsonState::Key => {
                if c == '"' {
                    state = JsonState::Value;
                } else {
                    key.push(c);
                }
            }
            JsonState::Value => match c {
                ':' => {}
                c if c.is_whitespace() => {}
                ',' | '}' => {
                    let key = std::mem::take(&mut key);
                    let value = std::mem::take(&mut value);
                    if !key.is_empty() {
                        params.insert(key, value);
                    }
                    state = JsonState::Searching;
                }
                '"' => loop {
                    match chars.next() {
                        Some('\\') if chars.peek() == Some(&'"') => {
                            chars.next();
                            value.push('"');
                        }
                        Some('"') | None => break,
                        Some(ch) => value.push(ch),
                    }
                },
                other => value.push(other),
            },
        }
    }
}

/// Parses a `POST` body into `request.params` according to its content type.
///
/// Form and JSON bodies are parsed; any other type leaves `params` alone and
/// the handler works from the raw `body`.
pub fn parse_body(request: &mut Request, content_type: Option<&str>) {
    let Some(content_type) = content_type else {
        return;
    };

    if content_type.contains(MIME_URLENCODED) {
        parse_form_body(&String::from_utf8_lossy(&request.body), &mut request.params);
    } else if content_type.contains(MIME_JSON) {
        parse_json_body(&String::from_utf8_lossy(&request.body), &mut request.params);
    }
}

/// Case-insensitive search for `target` (e.g. `"Content-Length:"`) within
/// `full_data[..max_pos]`, returning the rest of that line.
///
/// Spaces and colons between the name and the value are skipped. Empty
/// values count as absent.
pub fn extract_header_value<'a>(full_data: &'a [u8], max_pos: usize, target: &str) -> Option<&'a str> {
    let head = &full_data[..max_pos.min(full_data.len())];
    let needle = target.as_bytes();
    if needle.is_empty() || needle.len() > head.len() {
        return None;
    }

    let start = head
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))?;

    let rest = &head[start + needle.len()..];
    let skip = rest.iter().take_while(|&&b| b == b' ' || b == b':').count();
    let rest = &rest[skip..];
    let line_end = rest.iter().position(|&b| b == b'\r').unwrap_or(rest.len());

    std::str::from_utf8(&rest[..line_end])
        .ok()
        .filter(|v| !v.is_empty())
}
