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

//! Stream error.

use std::{io, result};
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Stream error.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream could not be created from the given source or mode.
    #[error("invalid stream resource: {0}")]
    InvalidResource(String),

    /// The stream has been detached or closed.
    #[error("no resource available; cannot perform operation")]
    Unavailable,

    /// The stream was not opened for reading.
    #[error("stream is not readable")]
    NotReadable,

    /// The stream was not opened for writing.
    #[error("stream is not writable")]
    NotWritable,

    /// The stream does not support seeking.
    #[error("stream is not seekable")]
    NotSeekable,

    /// The underlying resource operation failed.
    #[error("stream operation failed")]
    Operation(#[from] io::Error),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Stream result.
pub type Result<T = ()> = result::Result<T, Error>;
