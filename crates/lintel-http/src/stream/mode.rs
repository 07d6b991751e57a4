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

//! Stream open mode.

use std::fs::OpenOptions;

use super::error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Stream open mode.
///
/// Modes are given as short strings in the conventional `fopen` notation,
/// validated against a fixed whitelist. The access flags are not derivable
/// from the string shape alone - the `a`, `c` and `x` families are writable
/// but not readable without `+` - so each mode is enumerated explicitly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mode {
    /// Whether the stream can be read from.
    readable: bool,
    /// Whether the stream can be written to.
    writable: bool,
    /// Whether writes go to the end of the stream.
    append: bool,
    /// Whether the stream is truncated on open.
    truncate: bool,
    /// Whether a missing file is created on open.
    create: bool,
    /// Whether opening requires the file to not exist.
    create_new: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Mode {
    /// Attempts to create a mode from a string.
    ///
    /// The `b` (binary) and `t` (text) flags are accepted at any position
    /// and ignored, as they make no difference for byte streams.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidResource`], if the string is not
    /// a known open mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_http::stream::Mode;
    ///
    /// # fn main() -> lintel_http::stream::Result {
    /// // Create mode from string
    /// let mode = Mode::parse("wb+")?;
    /// assert!(mode.is_writable());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(mode: &str) -> Result<Self> {
        let base: String =
            mode.chars().filter(|char| !matches!(char, 'b' | 't')).collect();

        #[rustfmt::skip]
        let (readable, writable, append, truncate, create, create_new) =
            match base.as_str() {
                "r"         => (true,  false, false, false, false, false),
                "r+" | "rw" => (true,  true,  false, false, false, false),
                "w"         => (false, true,  false, true,  true,  false),
                "w+"        => (true,  true,  false, true,  true,  false),
                "a"         => (false, true,  true,  false, true,  false),
                "a+"        => (true,  true,  true,  false, true,  false),
                "x"         => (false, true,  false, false, false, true),
                "x+"        => (true,  true,  false, false, false, true),
                "c"         => (false, true,  false, false, true,  false),
                "c+"        => (true,  true,  false, false, true,  false),
                _ => return Err(Error::InvalidResource(mode.to_string())),
            };

        Ok(Mode { readable, writable, append, truncate, create, create_new })
    }

    /// Returns the open options for the mode.
    #[must_use]
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.readable)
            .write(self.writable && !self.append)
            .append(self.append)
            .truncate(self.truncate)
            .create(self.create)
            .create_new(self.create_new);
        options
    }
}

#[allow(clippy::must_use_candidate)]
impl Mode {
    /// Returns whether the mode allows reading.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    /// Returns whether the mode allows writing.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writable_flag_by_mode() -> Result {
        for (mode, writable) in [
            ("a", true),
            ("a+", true),
            ("a+b", true),
            ("ab", true),
            ("c", true),
            ("c+", true),
            ("c+b", true),
            ("cb", true),
            ("r", false),
            ("r+", true),
            ("r+b", true),
            ("rb", false),
            ("rw", true),
            ("w", true),
            ("w+", true),
            ("w+b", true),
            ("wb", true),
            ("x", true),
            ("x+", true),
            ("x+b", true),
            ("xb", true),
        ] {
            assert_eq!(Mode::parse(mode)?.is_writable(), writable, "{mode}");
        }
        Ok(())
    }

    #[test]
    fn test_readable_flag_by_mode() -> Result {
        for (mode, readable) in [
            ("a", false),
            ("a+", true),
            ("a+b", true),
            ("ab", false),
            ("c", false),
            ("c+", true),
            ("c+b", true),
            ("cb", false),
            ("r", true),
            ("r+", true),
            ("r+b", true),
            ("rb", true),
            ("rw", true),
            ("w", false),
            ("w+", true),
            ("w+b", true),
            ("wb", false),
            ("x", false),
            ("x+", true),
            ("x+b", true),
            ("xb", false),
        ] {
            assert_eq!(Mode::parse(mode)?.is_readable(), readable, "{mode}");
        }
        Ok(())
    }

    #[test]
    fn test_unknown_mode_fails() {
        assert!(matches!(
            Mode::parse("z"),
            Err(Error::InvalidResource(_))
        ));
        assert!(matches!(
            Mode::parse(""),
            Err(Error::InvalidResource(_))
        ));
    }
}
