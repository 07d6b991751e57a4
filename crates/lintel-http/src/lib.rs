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

//! HTTP message and request-normalization layer.
//!
//! The value-object model underneath the framework: immutable URIs,
//! messages, requests and responses, streams with explicit ownership,
//! uploaded files with move-once semantics, the extraction engine that
//! turns the raw server environment into a [`ServerRequest`], and the
//! content-negotiation facade on top.
//!
//! This layer deliberately stops at the message abstraction - it does not
//! open sockets, render templates or talk to storage. The hosting
//! environment hands over raw variable maps and a body source, and the
//! router downstream consumes the normalized request.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod message;
pub mod negotiate;
pub mod params;
pub mod request;
pub mod response;
pub mod rewrite;
pub mod server;
pub mod stream;
pub mod uri;

pub use message::{Body, Headers, Message};
pub use negotiate::Negotiated;
pub use params::Value;
pub use request::Request;
pub use response::Response;
pub use rewrite::Dispatcher;
pub use server::{
    Environment, Globals, ServerRequest, TrustedProxies, UploadedFile,
};
pub use stream::{InputStream, Stream};
pub use uri::Uri;
