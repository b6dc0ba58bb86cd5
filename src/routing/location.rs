use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A route path plus its query pairs, in the order they were written.
/// Keys may repeat, as in any query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            query: Vec::new(),
        }
    }

    /// Parses `/path?key=value&...`. Fragments are dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let without_fragment = input.split_once('#').map_or(input, |(head, _)| head);
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        if !path.starts_with('/') {
            return Err(Error::InvalidLocation(format!(
                "path must start with '/': {input:?}"
            )));
        }

        let mut location = Self::new(path);
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            location.query.push((decode(key), decode(value)));
        }
        Ok(location)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First value for `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Copy with `key` set to `value`. The first `key` pair is rewritten in
    /// place and later duplicates are dropped; a missing key is appended.
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        let mut query = Vec::with_capacity(self.query.len() + 1);
        let mut placed = false;
        for (name, current) in &self.query {
            if name != key {
                query.push((name.clone(), current.clone()));
            } else if !placed {
                query.push((name.clone(), value.to_string()));
                placed = true;
            }
        }
        if !placed {
            query.push((key.to_string(), value.to_string()));
        }
        Self {
            path: self.path.clone(),
            query,
        }
    }

    /// Copy with every `key` pair removed; the other pairs are untouched.
    pub fn without_param(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.query.retain(|(name, _)| name != key);
        next
    }

    pub fn same_path(&self, other: &Location) -> bool {
        self.path == other.path
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{}={}", encode(key), encode(value))?;
        }
        Ok(())
    }
}

pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Percent-encodes everything but the unreserved set, like
/// `encodeURIComponent`.
pub fn encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

/// Decodes `%XX` escapes and `+` as space. Broken escapes are kept verbatim.
pub fn decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                out.push(b' ');
                index += 1;
            }
            b'%' => match bytes.get(index + 1..index + 3).and_then(hex_pair) {
                Some(byte) => {
                    out.push(byte);
                    index += 3;
                }
                None => {
                    out.push(b'%');
                    index += 1;
                }
            },
            other => {
                out.push(other);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(pair: &[u8]) -> Option<u8> {
    if !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(pair).ok()?;
    u8::from_str_radix(text, 16).ok()
}
