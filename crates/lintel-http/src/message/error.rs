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

//! Message error.

use std::result;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Message error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Header name violates the token grammar.
    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    /// Header value contains bytes outside the field-content grammar.
    #[error("invalid header value: {0:?}")]
    InvalidHeaderValue(String),

    /// Header value is not a scalar or a list of scalars.
    #[error("invalid header value type; must be a scalar or a list of scalars")]
    InvalidHeaderValueType,

    /// Protocol version string is not of the form `digit[.digit]`.
    #[error("invalid protocol version: {0:?}")]
    InvalidProtocolVersion(String),

    /// Status code outside the range from 100 to 599.
    #[error("invalid status code: {0}; must be between 100 and 599")]
    InvalidStatusCode(u16),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Message result.
pub type Result<T = ()> = result::Result<T, Error>;
