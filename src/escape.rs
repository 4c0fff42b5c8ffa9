//! RFC 4515 escaping of assertion values
//!
//! Five characters are reserved inside a filter value and must be written as
//! a backslash followed by two hex digits:
//!
//! ```text
//! \    ->  \5c
//! *    ->  \2a
//! (    ->  \28
//! )    ->  \29
//! NUL  ->  \00
//! ```

/// Escape the reserved characters of `raw` in a single left-to-right pass.
///
/// Backslashes produced by escaping are never escaped again.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '\\' => escaped.push_str("\\5c"),
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Reverse [`escape`].
///
/// Only the five triples written by [`escape`] are recognised; anything else
/// (including upper-case hex) is left as is.
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('\\') {
        unescaped.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let replacement = match tail.get(..3) {
            Some("\\5c") => Some('\\'),
            Some("\\2a") => Some('*'),
            Some("\\28") => Some('('),
            Some("\\29") => Some(')'),
            Some("\\00") => Some('\0'),
            _ => None,
        };

        match replacement {
            Some(c) => {
                unescaped.push(c);
                rest = &tail[3..];
            }
            None => {
                unescaped.push('\\');
                rest = &tail[1..];
            }
        }
    }

    unescaped.push_str(rest);
    unescaped
}

/// Decode every `\HH` escape in a filter value, accepting either hex case.
///
/// Consecutive escapes are decoded as raw bytes so that multi-byte UTF-8
/// sequences (`\c3\a9`) come back as a single character. A backslash that is
/// not followed by two hex digits is kept literally.
pub fn decode_value(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }

    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                decoded.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
