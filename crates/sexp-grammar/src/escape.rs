//! Escaping rules for quoted atoms.
//!
//! Inside `"..."`, a backslash makes the following byte literal, whatever it
//! is. On output only `"` and `\` need the treatment.

use std::borrow::Cow;

/// Escape `atom` for quoted output.
///
/// Every `"` and `\` gets a preceding backslash. Returns the input unchanged
/// when no escape is needed.
pub fn escape_quoted(atom: &[u8]) -> Cow<'_, [u8]> {
    if !atom.iter().any(|&b| b == b'"' || b == b'\\') {
        return Cow::Borrowed(atom);
    }

    let mut out = Vec::with_capacity(atom.len() + 2);
    for &byte in atom {
        if byte == b'"' || byte == b'\\' {
            out.push(b'\\');
        }
        out.push(byte);
    }
    Cow::Owned(out)
}

/// Copy the raw body of a quoted atom into `out` with backslashes stripped.
///
/// `out` is cleared first so a scratch buffer can be reused across atoms.
/// The unescaped form never exceeds the raw span, so `out` grows at most to
/// `raw.len()`. A lone trailing backslash is kept literal.
pub fn unescape_into(raw: &[u8], out: &mut Vec<u8>) {
    out.clear();
    out.reserve(raw.len());

    let mut bytes = raw.iter().copied();
    while let Some(byte) = bytes.next() {
        if byte == b'\\' {
            match bytes.next() {
                Some(escaped) => out.push(escaped),
                None => out.push(b'\\'),
            }
        } else {
            out.push(byte);
        }
    }
}
