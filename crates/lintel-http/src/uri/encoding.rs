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

//! Encoding.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Character set to be percent-encoded in a path.
///
/// Everything outside of the unreserved characters, the sub-delimiters, and
/// `:`, `@` and `/` is percent-encoded. The `%` character never goes through
/// this set, as [`encode`] handles percent triplets separately.
#[rustfmt::skip]
const PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-').remove(b'.').remove(b'_').remove(b'~')
    .remove(b'!').remove(b'$').remove(b'&').remove(b'\'')
    .remove(b'(').remove(b')').remove(b'*').remove(b'+')
    .remove(b',').remove(b';').remove(b'=')
    .remove(b':').remove(b'@').remove(b'/');

/// Character set to be percent-encoded in a query string or fragment.
///
/// Same as [`PATH`], except that `?` is also allowed to appear verbatim.
const QUERY: &AsciiSet = &PATH.remove(b'?');

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Encodes a string used in a path.
#[must_use]
pub fn encode_path(value: &str) -> String {
    encode(value, PATH)
}

/// Encodes a string used in a query string or fragment.
#[must_use]
pub fn encode_query(value: &str) -> String {
    encode(value, QUERY)
}

/// Encodes all characters of the given set, preserving percent triplets.
///
/// Valid `%XX` sequences are copied through verbatim, so already encoded
/// input is never encoded twice. A `%` that does not start a valid triplet
/// is escaped to `%25`.
fn encode(value: &str, set: &'static AsciiSet) -> String {
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit()
            {
                out.push_str(&value[i..i + 3]);
                i += 3;
            } else {
                out.push_str("%25");
                i += 1;
            }
        } else {
            // Consume the run up to the next `%` in one go - splitting at an
            // ASCII byte always leaves the chunk valid UTF-8
            let start = i;
            while i < bytes.len() && bytes[i] != b'%' {
                i += 1;
            }
            out.extend(utf8_percent_encode(&value[start..i], set));
        }
    }
    out
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_spaces() {
        assert_eq!(encode_path("/pa th"), "/pa%20th");
    }

    #[test]
    fn test_encode_path_multibyte() {
        assert_eq!(encode_path("/©"), "/%C2%A9");
    }

    #[test]
    fn test_encode_path_preserves_triplets() {
        assert_eq!(encode_path("/pa%20th"), "/pa%20th");
        assert_eq!(encode_path("/p%61th"), "/p%61th");
    }

    #[test]
    fn test_encode_path_escapes_dangling_percent() {
        assert_eq!(encode_path("/pa%2-th"), "/pa%252-th");
        assert_eq!(encode_path("100%"), "100%25");
    }

    #[test]
    fn test_encode_path_keeps_delimiters() {
        let unreserved = "a-zA-Z0-9.-_~!$&'()*+,;=:@";
        assert_eq!(encode_path(unreserved), unreserved);
        assert_eq!(encode_path("/pa/th//two"), "/pa/th//two");
        assert_eq!(encode_path("/baz?#"), "/baz%3F%23");
    }

    #[test]
    fn test_encode_query_allows_question_mark() {
        assert_eq!(encode_query("?=#&"), "?=%23&");
        assert_eq!(encode_query("q=va lue"), "q=va%20lue");
        assert_eq!(encode_query("q=va/lue"), "q=va/lue");
    }
}
