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

//! Message body.

use std::cell::RefCell;
use std::rc::Rc;

use crate::stream::{InputStream, Result, Stream};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Message body.
///
/// The body of a message is backed either by a regular [`Stream`], e.g. for
/// responses assembled in memory, or by a caching [`InputStream`] over the
/// read-once request body source.
#[derive(Debug)]
pub enum Body {
    /// A readable, writable, seekable stream.
    Stream(Stream),
    /// A caching stream over a read-once source.
    Input(InputStream),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Shared handle to a message body.
///
/// Messages are immutable values whose mutators clone, while the body is a
/// single consumable resource. Sharing the body handle keeps clones cheap
/// and lets all copies of a message observe the same read position, which
/// mirrors how the underlying resource behaves. The request model is
/// single-threaded, so a reference-counted cell suffices.
pub type SharedBody = Rc<RefCell<Body>>;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Body {
    /// Wraps the body into a shared handle.
    #[must_use]
    pub fn shared(self) -> SharedBody {
        Rc::new(RefCell::new(self))
    }

    /// Reads up to the given number of bytes from the body.
    ///
    /// # Errors
    ///
    /// This method returns an error if the underlying stream fails, see
    /// [`Stream::read`] and [`InputStream::read`].
    pub fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        match self {
            Body::Stream(stream) => stream.read(length),
            Body::Input(stream) => stream.read(length),
        }
    }

    /// Writes the given bytes to the body.
    ///
    /// # Errors
    ///
    /// This method returns an error if the underlying stream is not
    /// writable or fails, see [`Stream::write`].
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        match self {
            Body::Stream(stream) => stream.write(data),
            Body::Input(stream) => stream.write(data),
        }
    }

    /// Reads the remaining contents of the body.
    ///
    /// # Errors
    ///
    /// This method returns an error if the underlying stream fails, see
    /// [`Stream::contents`] and [`InputStream::contents`].
    pub fn contents(&mut self) -> Result<String> {
        match self {
            Body::Stream(stream) => stream.contents(),
            Body::Input(stream) => stream.contents(),
        }
    }

    /// Returns the full contents of the body.
    pub fn text(&mut self) -> String {
        match self {
            Body::Stream(stream) => stream.text(),
            Body::Input(stream) => stream.text(),
        }
    }

    /// Returns the size of the body, if known.
    pub fn size(&mut self) -> Option<u64> {
        match self {
            Body::Stream(stream) => stream.size(),
            Body::Input(stream) => stream.size(),
        }
    }
}

#[allow(clippy::must_use_candidate)]
impl Body {
    /// Returns whether the body can be read from.
    pub fn is_readable(&self) -> bool {
        match self {
            Body::Stream(stream) => stream.is_readable(),
            Body::Input(stream) => stream.is_readable(),
        }
    }

    /// Returns whether the body can be written to.
    pub fn is_writable(&self) -> bool {
        match self {
            Body::Stream(stream) => stream.is_writable(),
            Body::Input(stream) => stream.is_writable(),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Body {
    /// Creates an empty input body.
    #[inline]
    fn default() -> Self {
        Body::Input(InputStream::default())
    }
}

// ----------------------------------------------------------------------------

impl From<Stream> for Body {
    /// Creates a body from a stream.
    #[inline]
    fn from(stream: Stream) -> Self {
        Body::Stream(stream)
    }
}

impl From<InputStream> for Body {
    /// Creates a body from an input stream.
    #[inline]
    fn from(stream: InputStream) -> Self {
        Body::Input(stream)
    }
}
