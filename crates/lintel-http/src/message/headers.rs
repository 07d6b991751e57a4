// Copyright (c) 2025-2026 Lintel and contributors

// SPDX-License-Identifier: MIT
// All contributions are certified under the DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Message headers.

use std::fmt;

use super::error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Message headers.
///
/// An ordered mapping from header name to an ordered list of values. The
/// casing under which a name was first registered is preserved for display,
/// while lookups are case-insensitive through a parallel lowercase key kept
/// with each entry.
///
/// # Examples
///
/// ```
/// use lintel_http::message::Headers;
///
/// // Create header map and add header
/// let mut headers = Headers::new();
/// headers.set("X-Foo", vec!["Foo".into(), "Bar".into()]);
///
/// // Lookups are case-insensitive
/// assert_eq!(headers.line("x-foo"), "Foo,Bar");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    /// Ordered list of header entries.
    inner: Vec<Entry>,
}

/// Message header entry.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    /// Header name in its original casing.
    name: String,
    /// Lowercased header name for lookups.
    key: String,
    /// Ordered list of values.
    values: Vec<String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Headers {
    /// Creates a header map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the values for the given header.
    ///
    /// The lookup is case-insensitive. An absent header yields an empty
    /// slice.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        let key = name.to_lowercase();
        self.inner
            .iter()
            .find(|entry| entry.key == key)
            .map_or(&[], |entry| entry.values.as_slice())
    }

    /// Returns whether the header is contained.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.inner.iter().any(|entry| entry.key == key)
    }

    /// Returns the values for the given header as a comma-joined line.
    #[must_use]
    pub fn line(&self, name: &str) -> String {
        self.get(name).join(",")
    }

    /// Replaces all values for the given header.
    ///
    /// A case-insensitively matching entry is removed first, so the entry
    /// adopts the casing of this call and moves to the end of the map.
    pub fn set(&mut self, name: &str, values: Vec<String>) {
        self.remove(name);
        self.inner.push(Entry {
            key: name.to_lowercase(),
            name: name.to_string(),
            values,
        });
    }

    /// Appends values to the given header.
    ///
    /// A case-insensitively matching entry keeps its original casing and
    /// position; otherwise a new entry is created.
    pub fn append(&mut self, name: &str, values: Vec<String>) {
        let key = name.to_lowercase();
        match self.inner.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.values.extend(values),
            None => self.inner.push(Entry {
                key,
                name: name.to_string(),
                values,
            }),
        }
    }

    /// Removes the given header.
    ///
    /// The removal is case-insensitive, and a no-op when the header is not
    /// contained.
    pub fn remove(&mut self, name: &str) {
        let key = name.to_lowercase();
        self.inner.retain(|entry| entry.key != key);
    }

    /// Inserts a header at the front of the map.
    ///
    /// Used for synthesized entries that conventionally lead the header
    /// block, like `Host`.
    pub fn prepend(&mut self, name: &str, values: Vec<String>) {
        self.remove(name);
        self.inner.insert(
            0,
            Entry {
                key: name.to_lowercase(),
                name: name.to_string(),
                values,
            },
        );
    }

    /// Returns an iterator over all headers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner
            .iter()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }
}

#[allow(clippy::must_use_candidate)]
impl Headers {
    /// Returns the number of headers.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether there are any headers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Headers {
    /// Formats the header map for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.inner {
            for value in &entry.values {
                f.write_str(&entry.name)?;
                f.write_str(": ")?;
                f.write_str(value)?;
                f.write_str("\r\n")?;
            }
        }

        // No errors occurred
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Filters a header value per the RFC 7230 field grammar.
///
/// A single pass over the value: a `\r\n` immediately followed by a space or
/// horizontal tab is preserved as a folded continuation, while every other
/// CR or LF occurrence, alone or in any combination, is deleted. Other
/// non-visible characters are deleted as well.
#[must_use]
pub fn filter(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'\r' {
            // Preserve a valid fold, drop a bare CR
            if i + 2 < bytes.len()
                && bytes[i + 1] == b'\n'
                && matches!(bytes[i + 2], b' ' | b'\t')
            {
                out.extend_from_slice(b"\r\n");
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        if (byte < 0x20 && byte != b'\t') || byte == 0x7F {
            i += 1;
            continue;
        }
        out.push(byte);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Returns whether a header value matches the field-content grammar.
///
/// Allowed are visible ASCII, space and horizontal tab, with `\r\n` only as
/// part of a fold followed by space or tab. DEL and bytes above the ASCII
/// range are rejected.
#[must_use]
pub fn is_valid(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if i + 2 < bytes.len()
                    && bytes[i + 1] == b'\n'
                    && matches!(bytes[i + 2], b' ' | b'\t')
                {
                    i += 3;
                } else {
                    return false;
                }
            }
            b'\t' | 0x20..=0x7E => i += 1,
            _ => return false,
        }
    }
    true
}

/// Asserts that a header value matches the field-content grammar.
///
/// # Errors
///
/// This function returns [`Error::InvalidHeaderValue`], if the value fails
/// [`is_valid`].
pub fn assert_valid(value: &str) -> Result {
    if is_valid(value) {
        Ok(())
    } else {
        Err(Error::InvalidHeaderValue(value.to_string()))
    }
}

/// Asserts that a header name matches the token grammar.
///
/// # Errors
///
/// This function returns [`Error::InvalidHeaderName`], if the name is empty
/// or contains a character outside the token grammar.
pub fn assert_valid_name(name: &str) -> Result {
    let valid = !name.is_empty()
        && name.bytes().all(|byte| {
            byte.is_ascii_alphanumeric()
                || matches!(
                    byte,
                    b'\'' | b'`' | b'#' | b'$' | b'%' | b'&' | b'*' | b'+'
                        | b'.' | b'^' | b'_' | b'|' | b'~' | b'!' | b'-'
                )
        });
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidHeaderName(name.to_string()))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_values() {
        for (value, expected) in [
            ("This is a\n test", "This is a test"),
            ("This is a\r test", "This is a test"),
            ("This is a\n\r test", "This is a test"),
            ("This is a\r\n  test", "This is a\r\n  test"),
            ("This is a \r\ntest", "This is a test"),
            ("This is a \r\n\n test", "This is a  test"),
            ("This is a\n\n test", "This is a test"),
            ("This is a\r\r test", "This is a test"),
            ("This is a \r\r\n test", "This is a \r\n test"),
            ("This is a \r\n\r\ntest", "This is a test"),
            ("This is a \r\n\n\r\n test", "This is a \r\n test"),
        ] {
            assert_eq!(filter(value), expected, "{value:?}");
        }
    }

    #[test]
    fn test_validate_values() {
        for (value, expected) in [
            ("This is a\n test", false),
            ("This is a\r test", false),
            ("This is a\n\r test", false),
            ("This is a\r\n  test", true),
            ("This is a \r\ntest", false),
            ("This is a \r\n\n test", false),
            ("This is a\n\n test", false),
            ("This is a\r\r test", false),
            ("This is a \r\r\n test", false),
            ("This is a \r\n\r\ntest", false),
            ("This is a \r\n\n\r\n test", false),
            ("This is a \u{FF} test", false),
            ("This is a \u{7F} test", false),
            ("This is a \u{7E} test", true),
        ] {
            assert_eq!(is_valid(value), expected, "{value:?}");
        }
    }

    #[test]
    fn test_assert_valid() {
        assert!(assert_valid("abc").is_ok());
        assert!(assert_valid("This is a\r\n  test").is_ok());
        assert!(matches!(
            assert_valid("This is a\n test"),
            Err(Error::InvalidHeaderValue(_))
        ));
    }

    #[test]
    fn test_assert_valid_name() {
        for name in ["header", "Header", "x-header", "X-header-12"] {
            assert!(assert_valid_name(name).is_ok(), "{name}");
        }
        for name in ["abc def", "", "x-foo\r\n-bar", "x:y"] {
            assert!(
                matches!(
                    assert_valid_name(name),
                    Err(Error::InvalidHeaderName(_))
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_set_adopts_new_casing() {
        let mut headers = Headers::new();
        headers.set("X-Foo", vec!["foo".into()]);
        headers.set("X-foo", vec!["bar".into()]);
        assert_eq!(headers.get("x-foo"), ["bar"]);
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            [("X-foo", ["bar".to_string()].as_slice())]
        );
    }

    #[test]
    fn test_append_keeps_first_casing() {
        let mut headers = Headers::new();
        headers.set("X-Foo", vec!["Foo".into()]);
        headers.append("x-foo", vec!["Bar".into()]);
        assert_eq!(headers.line("X-Foo"), "Foo,Bar");
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            [("X-Foo", ["Foo".to_string(), "Bar".to_string()].as_slice())]
        );
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.set("X-Foo", vec!["Foo".into()]);
        headers.remove("x-FOO");
        assert!(!headers.contains("X-Foo"));
        assert!(headers.is_empty());

        // Removal of an absent header is a no-op
        headers.remove("X-Bar");
    }
}
