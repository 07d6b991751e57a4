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

//! Server request error.

use std::path::PathBuf;
use std::result;
use thiserror::Error;

use super::upload::UploadStatus;
use crate::{message, stream, uri};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Server request error.
#[derive(Debug, Error)]
pub enum Error {
    /// The advertised server protocol did not match `HTTP/digit[.digit]`.
    #[error("unrecognized protocol version ({0})")]
    UnrecognizedProtocol(String),

    /// A leaf in the files specification has an unexpected shape.
    #[error("invalid value in files specification")]
    InvalidUploadSpec,

    /// The upload error code is not one of the known outcomes.
    #[error("invalid error status for uploaded file: {0}")]
    InvalidErrorStatus(i64),

    /// The upload size is not a byte count.
    #[error("invalid size provided for uploaded file: {0}")]
    InvalidSize(i64),

    /// The uploaded file carries a source that is neither path nor stream.
    #[error("invalid stream or file provided for uploaded file")]
    InvalidStreamOrFile,

    /// The upload did not complete successfully.
    #[error("cannot access file contents due to upload error: {}", .0.message())]
    Upload(UploadStatus),

    /// The uploaded file has already been moved.
    #[error("cannot perform operation; file has already been moved")]
    AlreadyMoved,

    /// The move target path is empty.
    #[error("invalid path provided for move operation; must be non-empty")]
    InvalidTargetPath,

    /// The move target directory is missing or not writable.
    #[error(
        "the target directory `{}` does not exist or is not writable",
        .0.display()
    )]
    TargetDirectoryNotWritable(PathBuf),

    /// The move destination could not be written.
    #[error("unable to write to designated path")]
    WriteFailure,

    /// A URI assembled from the environment failed to validate.
    #[error(transparent)]
    Uri(#[from] uri::Error),

    /// A header extracted from the environment failed to validate.
    #[error(transparent)]
    Message(#[from] message::Error),

    /// A stream operation on an upload source failed.
    #[error(transparent)]
    Stream(#[from] stream::Error),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Server request result.
pub type Result<T = ()> = result::Result<T, Error>;
