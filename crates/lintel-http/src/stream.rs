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

//! Stream.

use std::fs::File;
use std::io;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

mod error;
mod input;
mod mode;

pub use error::{Error, Result};
pub use input::InputStream;
pub use mode::Mode;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Stream resource.
///
/// The owned handle underneath a [`Stream`] - either an open file or an
/// in-memory buffer. Ownership transfers out of the stream on
/// [`Stream::detach`].
#[derive(Debug)]
pub enum Resource {
    /// An open file.
    File(File),
    /// An in-memory buffer.
    Memory(Cursor<Vec<u8>>),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Stream.
///
/// An abstraction over a readable, writable and seekable byte resource. The
/// access flags derive from the open [`Mode`], and the size is computed from
/// the resource's metadata on first use and cached.
///
/// The resource is owned until the stream is closed or detached. Operations
/// on a detached stream fail with [`Error::Unavailable`].
///
/// # Examples
///
/// ```
/// use lintel_http::stream::Stream;
///
/// # fn main() -> lintel_http::stream::Result {
/// // Create in-memory stream and write to it
/// let mut stream = Stream::memory();
/// stream.write(b"Hello, world!")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Stream {
    /// Underlying resource, owned until closed or detached.
    resource: Option<Resource>,
    /// Open mode the access flags derive from.
    mode: Mode,
    /// Cached size in bytes.
    size: Option<u64>,
    /// Whether a read consumed the resource to the end.
    eof: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Stream {
    /// Attempts to create a stream by opening a file.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidResource`], if the mode is not a
    /// known open mode or the file cannot be opened with it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lintel_http::stream::Stream;
    ///
    /// # fn main() -> lintel_http::stream::Result {
    /// // Create stream from file
    /// let stream = Stream::open("body.txt", "r")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P>(path: P, mode: &str) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let mode = Mode::parse(mode)?;
        let file = mode
            .open_options()
            .open(path.as_ref())
            .map_err(|_| {
                Error::InvalidResource(path.as_ref().display().to_string())
            })?;
        Ok(Self::with_resource(Resource::File(file), mode))
    }

    /// Attempts to create a stream from an already open resource.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidResource`], if the mode is not a
    /// known open mode.
    pub fn from_resource(resource: Resource, mode: &str) -> Result<Self> {
        Ok(Self::with_resource(resource, Mode::parse(mode)?))
    }

    /// Creates an in-memory stream, open for reading and writing.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_http::stream::Stream;
    ///
    /// // Create in-memory stream
    /// let stream = Stream::memory();
    /// ```
    #[must_use]
    pub fn memory() -> Self {
        let mode = Mode::parse("w+b").expect("invariant");
        Self::with_resource(Resource::Memory(Cursor::new(Vec::new())), mode)
    }

    /// Creates a stream from a resource and a parsed mode.
    fn with_resource(resource: Resource, mode: Mode) -> Self {
        Stream { resource: Some(resource), mode, size: None, eof: false }
    }
}

impl Stream {
    /// Reads up to the given number of bytes from the stream.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unavailable`], if the stream has been
    /// detached or closed, [`Error::NotReadable`], if the stream was not
    /// opened for reading, and [`Error::Operation`] on I/O failure.
    pub fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        if self.resource.is_none() {
            return Err(Error::Unavailable);
        }
        if !self.mode.is_readable() {
            return Err(Error::NotReadable);
        }

        // Read a single chunk, which may be shorter than requested
        let resource = self.resource.as_mut().expect("invariant");
        let mut buffer = vec![0; length];
        let count = resource.read(&mut buffer)?;
        buffer.truncate(count);
        if count < length {
            self.eof = true;
        }
        Ok(buffer)
    }

    /// Writes the given bytes to the stream.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unavailable`], if the stream has been
    /// detached or closed, [`Error::NotWritable`], if the stream was not
    /// opened for writing, and [`Error::Operation`] on I/O failure.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.resource.is_none() {
            return Err(Error::Unavailable);
        }
        if !self.mode.is_writable() {
            return Err(Error::NotWritable);
        }

        // Invalidate the cached size, as the resource just grew
        let resource = self.resource.as_mut().expect("invariant");
        resource.write_all(data)?;
        self.size = None;
        Ok(data.len())
    }

    /// Reads the remaining contents of the stream.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unavailable`], if the stream has been
    /// detached or closed, [`Error::NotReadable`], if the stream was not
    /// opened for reading, and [`Error::Operation`] on I/O failure.
    pub fn contents(&mut self) -> Result<String> {
        if self.resource.is_none() {
            return Err(Error::Unavailable);
        }
        if !self.mode.is_readable() {
            return Err(Error::NotReadable);
        }

        let resource = self.resource.as_mut().expect("invariant");
        let mut buffer = Vec::new();
        resource.read_to_end(&mut buffer)?;
        self.eof = true;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Returns the current position within the stream.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unavailable`], if the stream has been
    /// detached or closed, and [`Error::Operation`] on I/O failure.
    pub fn tell(&mut self) -> Result<u64> {
        match self.resource.as_mut() {
            Some(resource) => Ok(resource.stream_position()?),
            None => Err(Error::Unavailable),
        }
    }

    /// Seeks to the given offset from the start of the stream.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unavailable`], if the stream has been
    /// detached or closed, and [`Error::Operation`] on I/O failure.
    pub fn seek(&mut self, offset: u64) -> Result {
        match self.resource.as_mut() {
            Some(resource) => {
                resource.seek(SeekFrom::Start(offset))?;
                self.eof = false;
                Ok(())
            }
            None => Err(Error::Unavailable),
        }
    }

    /// Seeks to the start of the stream.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unavailable`], if the stream has been
    /// detached or closed, and [`Error::Operation`] on I/O failure.
    #[inline]
    pub fn rewind(&mut self) -> Result {
        self.seek(0)
    }

    /// Returns whether the stream has been read to the end.
    ///
    /// A detached or closed stream always reports the end of the stream.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.resource.is_none() || self.eof
    }

    /// Returns the size of the stream in bytes.
    ///
    /// The size is computed lazily from the resource's metadata and cached,
    /// and unknown when the stream has been detached or closed.
    pub fn size(&mut self) -> Option<u64> {
        if self.size.is_none() {
            self.size = match self.resource.as_ref()? {
                Resource::File(file) => {
                    file.metadata().ok().map(|meta| meta.len())
                }
                Resource::Memory(cursor) => {
                    Some(cursor.get_ref().len() as u64)
                }
            };
        }
        self.size
    }

    /// Detaches the resource from the stream.
    ///
    /// Ownership of the resource transfers to the caller without closing it.
    /// All subsequent calls are no-ops returning [`None`].
    pub fn detach(&mut self) -> Option<Resource> {
        self.size = None;
        self.resource.take()
    }

    /// Closes the stream, releasing the resource if still owned.
    pub fn close(&mut self) {
        self.detach();
    }

    /// Returns the full contents of the stream, from the start.
    ///
    /// For seekable streams the position is rewound first. Returns the empty
    /// string when the stream is not readable or an operation fails, which
    /// makes this safe to use in string conversions.
    pub fn text(&mut self) -> String {
        if !self.is_readable() {
            return String::new();
        }
        if self.rewind().is_err() {
            return String::new();
        }
        self.contents().unwrap_or_default()
    }
}

#[allow(clippy::must_use_candidate)]
impl Stream {
    /// Returns whether the stream can be read from.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.resource.is_some() && self.mode.is_readable()
    }

    /// Returns whether the stream can be written to.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.resource.is_some() && self.mode.is_writable()
    }

    /// Returns whether the stream supports seeking.
    #[inline]
    pub fn is_seekable(&self) -> bool {
        self.resource.is_some()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Read for Resource {
    /// Reads from the underlying resource.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Resource::File(file) => file.read(buf),
            Resource::Memory(cursor) => cursor.read(buf),
        }
    }
}

impl Write for Resource {
    /// Writes to the underlying resource.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Resource::File(file) => file.write(buf),
            Resource::Memory(cursor) => cursor.write(buf),
        }
    }

    /// Flushes the underlying resource.
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Resource::File(file) => file.flush(),
            Resource::Memory(cursor) => cursor.flush(),
        }
    }
}

impl Seek for Resource {
    /// Seeks within the underlying resource.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Resource::File(file) => file.seek(pos),
            Resource::Memory(cursor) => cursor.seek(pos),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn tmpfile(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(contents).expect("write");
        file
    }

    #[test]
    fn test_write_and_read_back() -> Result {
        let mut stream = Stream::memory();
        stream.write(b"foo bar")?;
        assert_eq!(stream.text(), "foo bar");
        Ok(())
    }

    #[test]
    fn test_open_write_only_is_not_readable() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "w")?;
        assert!(!stream.is_readable());
        assert!(matches!(stream.contents(), Err(Error::NotReadable)));
        assert_eq!(stream.text(), "");
        Ok(())
    }

    #[test]
    fn test_open_read_only_is_not_writable() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r")?;
        assert!(!stream.is_writable());
        assert!(matches!(stream.write(b"bar"), Err(Error::NotWritable)));
        Ok(())
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(matches!(
            Stream::open("/nonexistent/stream-test", "r"),
            Err(Error::InvalidResource(_))
        ));
    }

    #[test]
    fn test_detach_returns_resource() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r+")?;
        assert!(stream.detach().is_some());
        assert!(stream.detach().is_none());
        Ok(())
    }

    #[test]
    fn test_operations_fail_after_detach() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r+")?;
        stream.detach();

        assert!(matches!(stream.read(2), Err(Error::Unavailable)));
        assert!(matches!(stream.write(b"x"), Err(Error::Unavailable)));
        assert!(matches!(stream.tell(), Err(Error::Unavailable)));
        assert!(matches!(stream.seek(2), Err(Error::Unavailable)));
        assert!(!stream.is_readable());
        assert!(!stream.is_writable());
        assert!(!stream.is_seekable());
        assert_eq!(stream.size(), None);
        assert!(stream.eof());
        Ok(())
    }

    #[test]
    fn test_tell_reports_position() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r")?;
        stream.seek(2)?;
        assert_eq!(stream.tell()?, 2);
        Ok(())
    }

    #[test]
    fn test_eof_after_full_read() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r")?;
        assert!(!stream.eof());
        while !stream.eof() {
            stream.read(4096)?;
        }
        assert!(stream.eof());
        Ok(())
    }

    #[test]
    fn test_rewind_resets_position() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r")?;
        stream.seek(2)?;
        stream.rewind()?;
        assert_eq!(stream.tell()?, 0);
        Ok(())
    }

    #[test]
    fn test_size_is_computed_from_metadata() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r")?;
        assert_eq!(stream.size(), Some(7));

        let mut stream = Stream::memory();
        stream.write(b"FOO")?;
        assert_eq!(stream.size(), Some(3));
        Ok(())
    }

    #[test]
    fn test_contents_returns_remainder() -> Result {
        let file = tmpfile(b"FOO BAR");
        let mut stream = Stream::open(file.path(), "r")?;
        stream.seek(4)?;
        assert_eq!(stream.contents()?, "BAR");
        Ok(())
    }

    #[test]
    fn test_invalid_mode_fails() {
        let file = tmpfile(b"FOO BAR");
        assert!(matches!(
            Stream::open(file.path(), "invalid"),
            Err(Error::InvalidResource(_))
        ));
    }
}
