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

//! URI error.

use std::result;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// URI error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The string could not be split into URI components.
    #[error("unable to parse URI: {0}")]
    Parse(String),

    /// Port outside the registered range.
    #[error("invalid port: {0}. Must be between 1 and 65535")]
    InvalidPort(u32),

    /// Path of an authority-less URI starts with two slashes.
    #[error(
        "the path of a URI without an authority must not start with two \
         slashes \"//\""
    )]
    PathWithoutAuthority,

    /// Relative path begins with a segment containing a colon.
    #[error(
        "a relative URI must not have a path beginning with a segment \
         containing a colon"
    )]
    RelativePathColonSegment,
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// URI result.
pub type Result<T = ()> = result::Result<T, Error>;
