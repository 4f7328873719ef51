#![forbid(unsafe_code)]

//! Markup escaping for user-entered text.
//!
//! Six characters are replaced by character references:
//!
//! | char | reference |
//! |------|-----------|
//! | `&`  | `&amp;`   |
//! | `<`  | `&lt;`    |
//! | `>`  | `&gt;`    |
//! | `"`  | `&quot;`  |
//! | `'`  | `&#39;`   |
//! | `/`  | `&#x2F;`  |
//!
//! Everything else passes through unchanged. This is the only injection guard
//! for promotion text, so every field goes through [`Escaped`] before it is
//! embedded in card markup.

use std::fmt;

/// Character reference for `c`, if it is one of the reserved characters.
#[inline]
const fn reference(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        '/' => Some("&#x2F;"),
        _ => None,
    }
}

/// Escape `s` into the output buffer.
pub fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match reference(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
}

/// Escape a string for embedding inside markup content.
#[must_use]
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

/// Escape the text representation of any displayable value.
#[must_use]
pub fn escape_display<T: fmt::Display + ?Sized>(value: &T) -> String {
    escape_markup(&value.to_string())
}

/// Text that has already been escaped and is safe to embed in markup.
///
/// The only way to build one is through escaping, so markup builders that
/// take `&Escaped` cannot receive raw user input by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Escaped(String);

impl Escaped {
    /// Escape `raw`.
    pub fn new(raw: &str) -> Self {
        Self(escape_markup(raw))
    }

    /// The escaped text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Escaped {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
