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

//! HTTP request.

use crate::message::{
    Body, HeaderValue, Headers, Message, Result, SharedBody,
};
use crate::uri::Uri;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP request.
///
/// A [`Message`] specialized with a method and a target [`Uri`]. The method
/// is normalized to uppercase and defaults to `GET`.
///
/// When no `Host` header has been set explicitly and the URI carries a
/// host, the header map presents a synthesized `Host` entry derived from
/// the URI, leading the header block.
///
/// # Examples
///
/// ```
/// use lintel_http::request::Request;
///
/// // Create request and set method
/// let req = Request::new().with_method("post");
/// assert_eq!(req.method(), "POST");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Request {
    /// Request method, normalized to uppercase.
    method: Method,
    /// Request URI.
    uri: Uri,
    /// Shared message core.
    message: Message,
}

/// Request method with the conventional default.
#[derive(Clone, Debug)]
struct Method(String);

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Request {
    /// Creates a request.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the request method.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method.0
    }

    /// Returns a request with the given method, normalized to uppercase.
    #[must_use]
    pub fn with_method(&self, method: &str) -> Self {
        let mut request = self.clone();
        request.method = Method(method.to_uppercase());
        request
    }

    /// Returns the request URI.
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns a request with the given URI.
    #[must_use]
    pub fn with_uri(&self, uri: Uri) -> Self {
        let mut request = self.clone();
        request.uri = uri;
        request
    }

    /// Returns the request target in origin form.
    ///
    /// The path and query string of the URI, with `/` when the path is
    /// empty.
    #[must_use]
    pub fn request_target(&self) -> String {
        let mut target = self.uri.path().to_string();
        if target.is_empty() {
            target.push('/');
        }
        if !self.uri.query().is_empty() {
            target.push('?');
            target.push_str(self.uri.query());
        }
        target
    }

    /// Returns the headers, synthesizing `Host` when necessary.
    ///
    /// If no `Host` header has been set and the URI has a host, a `Host`
    /// entry derived from the URI is presented first.
    #[must_use]
    pub fn headers(&self) -> Headers {
        let mut headers = self.message.headers().clone();
        if !headers.contains("host") && !self.uri.host().is_empty() {
            headers.prepend("Host", vec![self.host_from_uri()]);
        }
        headers
    }

    /// Returns whether the given header is present.
    ///
    /// A `Host` header counts as present when it can be synthesized from
    /// the URI.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        if self.message.has_header(name) {
            return true;
        }
        name.eq_ignore_ascii_case("host") && !self.uri.host().is_empty()
    }

    /// Returns the values for the given header.
    #[must_use]
    pub fn header(&self, name: &str) -> Vec<String> {
        if !self.message.has_header(name)
            && name.eq_ignore_ascii_case("host")
            && !self.uri.host().is_empty()
        {
            return vec![self.host_from_uri()];
        }
        self.message.header(name).to_vec()
    }

    /// Returns the values for the given header as a comma-joined line.
    #[must_use]
    pub fn header_line(&self, name: &str) -> String {
        self.header(name).join(",")
    }

    /// Returns a request with all values of the given header replaced.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_header`].
    pub fn with_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        let mut request = self.clone();
        request.message = self.message.with_header(name, value)?;
        Ok(request)
    }

    /// Returns a request with values appended to the given header.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_added_header`].
    pub fn with_added_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        let mut request = self.clone();
        request.message = self.message.with_added_header(name, value)?;
        Ok(request)
    }

    /// Returns a request without the given header.
    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut request = self.clone();
        request.message = self.message.without_header(name);
        request
    }

    /// Returns the protocol version.
    #[inline]
    #[must_use]
    pub fn protocol_version(&self) -> &str {
        self.message.protocol_version()
    }

    /// Returns a request with the given protocol version.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_protocol_version`].
    pub fn with_protocol_version(&self, version: &str) -> Result<Self> {
        let mut request = self.clone();
        request.message = self.message.with_protocol_version(version)?;
        Ok(request)
    }

    /// Returns the shared body handle.
    #[inline]
    #[must_use]
    pub fn body(&self) -> SharedBody {
        self.message.body()
    }

    /// Returns a request with the given body.
    #[must_use]
    pub fn with_body(&self, body: Body) -> Self {
        let mut request = self.clone();
        request.message = self.message.with_body(body);
        request
    }

    /// Derives the `Host` header value from the URI.
    fn host_from_uri(&self) -> String {
        let mut host = self.uri.host().to_string();
        if let Some(port) = self.uri.port() {
            host.push(':');
            host.push_str(&port.to_string());
        }
        host
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Method {
    /// Creates the default request method.
    #[inline]
    fn default() -> Self {
        Method("GET".to_string())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
