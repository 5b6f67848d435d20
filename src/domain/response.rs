use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Unparsed HTTP response returned by a send.
///
/// The raw bytes hold the status line, the headers, an empty line and the body, in that
/// order (`HTTP/1.1 200 OK\r\n...\r\n\r\n<body>`). The body bytes are kept exactly as
/// received. Any status, including 4xx and 5xx, is a successful send as far as the client
/// is concerned; interpreting it is up to the caller.
///
/// The header block is rebuilt from the parsed response: the HTTP stack lowercases header
/// names and groups repeated headers by name, so neither wire order nor wire case of the
/// headers survives.
pub struct RawResponse {
    status: u16,
    bytes: Vec<u8>,
    body_start: usize,
}

impl RawResponse {
    /// Wrap an already rendered response. The body starts after the first empty line;
    /// text without a header block is treated as body only.
    pub fn new(status: u16, raw: impl Into<Vec<u8>>) -> Self {
        let bytes = raw.into();
        let body_start = find_body_start(&bytes).unwrap_or(0);
        Self {
            status,
            bytes,
            body_start,
        }
    }

    /// Assemble the raw bytes from response parts.
    pub fn from_parts<'a>(
        version: &str,
        status: u16,
        reason: Option<&str>,
        headers: impl IntoIterator<Item = (&'a str, &'a [u8])>,
        body: &[u8],
    ) -> Self {
        let mut bytes = match reason {
            Some(reason) => format!("{version} {status} {reason}\r\n"),
            None => format!("{version} {status}\r\n"),
        }
        .into_bytes();
        for (name, value) in headers {
            bytes.extend_from_slice(name.as_bytes());
            bytes.extend_from_slice(b": ");
            bytes.extend_from_slice(value);
            bytes.extend_from_slice(b"\r\n");
        }
        bytes.extend_from_slice(b"\r\n");
        let body_start = bytes.len();
        bytes.extend_from_slice(body);
        Self {
            status,
            bytes,
            body_start,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is 2xx. Informational only.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Full response as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Full response as text; invalid UTF-8 is replaced with U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Body bytes exactly as received.
    pub fn body_bytes(&self) -> &[u8] {
        &self.bytes[self.body_start..]
    }

    /// Body as text; invalid UTF-8 is replaced with U+FFFD.
    pub fn body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body_bytes())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

fn find_body_start(bytes: &[u8]) -> Option<usize> {
    [&b"\r\n\r\n"[..], &b"\n\n"[..]].into_iter().find_map(|separator| {
        bytes
            .windows(separator.len())
            .position(|window| window == separator)
            .map(|at| at + separator.len())
    })
}
