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

//! Caching input stream.

use std::fmt;
use std::io::{Cursor, Read};

use super::error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Caching input stream.
///
/// Wraps a read-once byte source, e.g. the raw request body handed over by
/// the server. Since the underlying source is neither seekable nor
/// rewindable, every byte that is read gets buffered into an internal cache.
/// Once the end of the source has been reached, [`InputStream::contents`]
/// and [`InputStream::text`] return the complete cache regardless of how
/// much was already consumed, which makes the body replayable after the
/// first full drain.
///
/// The stream is never writable.
///
/// # Examples
///
/// ```
/// use lintel_http::stream::InputStream;
///
/// # fn main() -> lintel_http::stream::Result {
/// // Create input stream and drain it
/// let mut stream = InputStream::from_bytes(b"{\"name\":\"value\"}".to_vec());
/// let body = stream.contents()?;
///
/// // A drained stream replays the cache
/// assert_eq!(stream.contents()?, body);
/// # Ok(())
/// # }
/// ```
pub struct InputStream {
    /// Read-once source.
    source: Box<dyn Read>,
    /// Bytes read from the source so far.
    cache: Vec<u8>,
    /// Whether the source has been fully drained.
    reached_eof: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl InputStream {
    /// Creates an input stream from a reader.
    #[must_use]
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + 'static,
    {
        InputStream {
            source: Box::new(reader),
            cache: Vec::new(),
            reached_eof: false,
        }
    }

    /// Creates an input stream from a byte buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_http::stream::InputStream;
    ///
    /// // Create input stream from bytes
    /// let stream = InputStream::from_bytes(b"body".to_vec());
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Reads up to the given number of bytes from the stream.
    ///
    /// Everything read is appended to the cache. Once the source is
    /// exhausted, further reads return an empty buffer.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Operation`] on I/O failure.
    pub fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        if self.reached_eof {
            return Ok(Vec::new());
        }
        let mut buffer = vec![0; length];
        let count = self.source.read(&mut buffer)?;
        buffer.truncate(count);
        self.cache.extend_from_slice(&buffer);
        if count == 0 && length > 0 {
            self.reached_eof = true;
        }
        Ok(buffer)
    }

    /// Reads the remaining contents of the stream.
    ///
    /// Returns the remainder of the source, appending it to the cache. Once
    /// the end of the source has been reached, the complete cache is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Operation`] on I/O failure.
    pub fn contents(&mut self) -> Result<String> {
        if self.reached_eof {
            return Ok(String::from_utf8_lossy(&self.cache).into_owned());
        }
        let mut buffer = Vec::new();
        self.source.read_to_end(&mut buffer)?;
        self.cache.extend_from_slice(&buffer);
        self.reached_eof = true;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Returns the full contents of the stream.
    ///
    /// Drains the source if necessary and returns the complete cache, so
    /// prior partial reads make no difference.
    pub fn text(&mut self) -> String {
        if !self.reached_eof {
            let _ = self.contents();
        }
        String::from_utf8_lossy(&self.cache).into_owned()
    }

    /// Fails, as input streams are never writable.
    ///
    /// # Errors
    ///
    /// This method always returns [`Error::NotWritable`].
    pub fn write(&mut self, _data: &[u8]) -> Result<usize> {
        Err(Error::NotWritable)
    }

    /// Fails, as input streams are not seekable.
    ///
    /// # Errors
    ///
    /// This method always returns [`Error::NotSeekable`].
    pub fn seek(&mut self, _offset: u64) -> Result {
        Err(Error::NotSeekable)
    }
}

#[allow(clippy::must_use_candidate)]
impl InputStream {
    /// Returns whether the stream can be read from, which is always true.
    #[inline]
    pub fn is_readable(&self) -> bool {
        true
    }

    /// Returns whether the stream can be written to, which is never true.
    #[inline]
    pub fn is_writable(&self) -> bool {
        false
    }

    /// Returns whether the stream supports seeking, which is never true.
    #[inline]
    pub fn is_seekable(&self) -> bool {
        false
    }

    /// Returns whether the source has been fully drained.
    #[inline]
    pub fn eof(&self) -> bool {
        self.reached_eof
    }

    /// Returns the size of the stream, which is unknown until drained.
    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.reached_eof.then(|| self.cache.len() as u64)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for InputStream {
    /// Creates an empty input stream.
    #[inline]
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}

// ----------------------------------------------------------------------------

impl fmt::Debug for InputStream {
    /// Formats the input stream for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStream")
            .field("cached", &self.cache.len())
            .field("reached_eof", &self.reached_eof)
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_writable() {
        let mut stream = InputStream::from_bytes(b"body".to_vec());
        assert!(!stream.is_writable());
        assert!(matches!(stream.write(b"x"), Err(Error::NotWritable)));
    }

    #[test]
    fn test_read_iteratively() -> Result {
        let mut stream = InputStream::from_bytes(b"0123456789".to_vec());
        assert_eq!(stream.read(4)?, b"0123");
        assert_eq!(stream.read(4)?, b"4567");
        assert_eq!(stream.read(4)?, b"89");
        Ok(())
    }

    #[test]
    fn test_contents_returns_remainder() -> Result {
        let mut stream = InputStream::from_bytes(b"0123456789".to_vec());
        stream.read(5)?;
        assert_eq!(stream.contents()?, "56789");
        Ok(())
    }

    #[test]
    fn test_contents_returns_cache_after_eof() -> Result {
        let mut stream = InputStream::from_bytes(b"0123456789".to_vec());
        assert_eq!(stream.contents()?, "0123456789");
        assert_eq!(stream.contents()?, "0123456789");
        Ok(())
    }

    #[test]
    fn test_text_returns_full_contents_regardless_of_reads() -> Result {
        let mut stream = InputStream::from_bytes(b"0123456789".to_vec());
        stream.read(3)?;
        assert_eq!(stream.text(), "0123456789");
        Ok(())
    }

    #[test]
    fn test_multiple_text_calls_return_same_contents() -> Result {
        let mut stream = InputStream::from_bytes(b"0123456789".to_vec());
        stream.read(3)?;
        assert_eq!(stream.text(), "0123456789");
        stream.read(3)?;
        assert_eq!(stream.text(), "0123456789");
        Ok(())
    }

    #[test]
    fn test_size_unknown_until_drained() -> Result {
        let mut stream = InputStream::from_bytes(b"0123456789".to_vec());
        assert_eq!(stream.size(), None);
        stream.contents()?;
        assert_eq!(stream.size(), Some(10));
        Ok(())
    }
}
