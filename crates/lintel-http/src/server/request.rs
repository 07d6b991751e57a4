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

//! Server request.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::env::Environment;
use super::upload::UploadMap;
use crate::message::{Body, HeaderValue, Headers, Result, SharedBody};
use crate::params::{Params, Value};
use crate::request::Request;
use crate::uri::Uri;

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Shared handle to the uploaded files tree.
///
/// Uploaded files are move-once resources. Copies of a request share the
/// tree, so a file moved through one copy is observed as moved by all of
/// them, exactly like the shared body stream.
pub type SharedUploads = Rc<RefCell<UploadMap>>;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Server request.
///
/// A [`Request`] extended with everything the server side knows about an
/// incoming request: the environment snapshot, cookie and query
/// parameters, the parsed body, the uploaded files and an attributes bag
/// for downstream collaborators like routers. All mutators are
/// copy-on-write and return a new [`ServerRequest`].
///
/// # Examples
///
/// ```
/// use lintel_http::params::Value;
/// use lintel_http::server::ServerRequest;
///
/// // Create server request and attach an attribute
/// let request = ServerRequest::new()
///     .with_attribute("route", Value::from("home"));
/// assert!(request.attribute("route").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ServerRequest {
    /// Request core.
    request: Request,
    /// Environment snapshot.
    server: Environment,
    /// Cookie parameters.
    cookies: Params,
    /// Query parameters.
    query: Params,
    /// Parsed request body, if any.
    parsed_body: Option<Value>,
    /// Uploaded files, shared between copies.
    files: SharedUploads,
    /// Attributes attached by downstream collaborators.
    attributes: BTreeMap<String, Value>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl ServerRequest {
    /// Creates a server request.
    ///
    /// Everything starts out empty: `GET` method, empty URI, no
    /// parameters, no parsed body, no uploaded files.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the environment snapshot.
    #[inline]
    #[must_use]
    pub fn server_params(&self) -> &Environment {
        &self.server
    }

    /// Returns a server request with the given environment snapshot.
    #[must_use]
    pub fn with_server_params(&self, server: Environment) -> Self {
        let mut request = self.clone();
        request.server = server;
        request
    }

    /// Returns the cookie parameters.
    #[inline]
    #[must_use]
    pub fn cookie_params(&self) -> &Params {
        &self.cookies
    }

    /// Returns a server request with the given cookie parameters.
    #[must_use]
    pub fn with_cookie_params(&self, cookies: Params) -> Self {
        let mut request = self.clone();
        request.cookies = cookies;
        request
    }

    /// Returns the query parameters.
    #[inline]
    #[must_use]
    pub fn query_params(&self) -> &Params {
        &self.query
    }

    /// Returns a server request with the given query parameters.
    #[must_use]
    pub fn with_query_params(&self, query: Params) -> Self {
        let mut request = self.clone();
        request.query = query;
        request
    }

    /// Returns the parsed body, if any.
    #[inline]
    #[must_use]
    pub fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    /// Returns a server request with the given parsed body.
    #[must_use]
    pub fn with_parsed_body(&self, body: Option<Value>) -> Self {
        let mut request = self.clone();
        request.parsed_body = body;
        request
    }

    /// Returns the shared uploaded files tree.
    #[inline]
    #[must_use]
    pub fn uploaded_files(&self) -> SharedUploads {
        SharedUploads::clone(&self.files)
    }

    /// Returns a server request with the given uploaded files.
    #[must_use]
    pub fn with_uploaded_files(&self, files: UploadMap) -> Self {
        let mut request = self.clone();
        request.files = Rc::new(RefCell::new(files));
        request
    }

    /// Returns the attributes.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Returns the attribute under the given name, if any.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns a server request with the given attribute set.
    #[must_use]
    pub fn with_attribute(&self, name: &str, value: Value) -> Self {
        let mut request = self.clone();
        request.attributes.insert(name.to_string(), value);
        request
    }

    /// Returns a server request without the given attribute.
    ///
    /// A no-op when the attribute is not present.
    #[must_use]
    pub fn without_attribute(&self, name: &str) -> Self {
        let mut request = self.clone();
        request.attributes.remove(name);
        request
    }
}

impl ServerRequest {
    /// Returns the request method.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        self.request.method()
    }

    /// Returns a server request with the given method.
    #[must_use]
    pub fn with_method(&self, method: &str) -> Self {
        let mut request = self.clone();
        request.request = self.request.with_method(method);
        request
    }

    /// Returns the request URI.
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    /// Returns a server request with the given URI.
    #[must_use]
    pub fn with_uri(&self, uri: Uri) -> Self {
        let mut request = self.clone();
        request.request = self.request.with_uri(uri);
        request
    }

    /// Returns the headers, synthesizing `Host` when necessary.
    #[must_use]
    pub fn headers(&self) -> Headers {
        self.request.headers()
    }

    /// Returns whether the given header is present.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.request.has_header(name)
    }

    /// Returns the values for the given header.
    #[must_use]
    pub fn header(&self, name: &str) -> Vec<String> {
        self.request.header(name)
    }

    /// Returns the values for the given header as a comma-joined line.
    #[must_use]
    pub fn header_line(&self, name: &str) -> String {
        self.request.header_line(name)
    }

    /// Returns a server request with all values of the header replaced.
    ///
    /// # Errors
    ///
    /// Same as [`crate::message::Message::with_header`].
    pub fn with_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        let mut request = self.clone();
        request.request = self.request.with_header(name, value)?;
        Ok(request)
    }

    /// Returns a server request with values appended to the header.
    ///
    /// # Errors
    ///
    /// Same as [`crate::message::Message::with_added_header`].
    pub fn with_added_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        let mut request = self.clone();
        request.request = self.request.with_added_header(name, value)?;
        Ok(request)
    }

    /// Returns a server request without the given header.
    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut request = self.clone();
        request.request = self.request.without_header(name);
        request
    }

    /// Returns the protocol version.
    #[inline]
    #[must_use]
    pub fn protocol_version(&self) -> &str {
        self.request.protocol_version()
    }

    /// Returns a server request with the given protocol version.
    ///
    /// # Errors
    ///
    /// Same as [`crate::message::Message::with_protocol_version`].
    pub fn with_protocol_version(&self, version: &str) -> Result<Self> {
        let mut request = self.clone();
        request.request = self.request.with_protocol_version(version)?;
        Ok(request)
    }

    /// Returns the shared body handle.
    #[inline]
    #[must_use]
    pub fn body(&self) -> SharedBody {
        self.request.body()
    }

    /// Returns a server request with the given body.
    #[must_use]
    pub fn with_body(&self, body: Body) -> Self {
        let mut request = self.clone();
        request.request = self.request.with_body(body);
        request
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::upload::{
        RawUpload, UploadNode, UploadSource, UploadedFile,
    };
    use crate::stream::Stream;

    #[test]
    fn test_everything_is_empty_by_default() {
        let request = ServerRequest::new();
        assert_eq!(request.method(), "GET");
        assert!(request.server_params().iter().next().is_none());
        assert!(request.query_params().is_empty());
        assert!(request.cookie_params().is_empty());
        assert!(request.parsed_body().is_none());
        assert!(request.uploaded_files().borrow().is_empty());
        assert!(request.attributes().is_empty());
    }

    #[test]
    fn test_method_mutator_returns_changed_copy() {
        let request = ServerRequest::new();
        let changed = request.with_method("post");
        assert_eq!(changed.method(), "POST");
        assert_eq!(request.method(), "GET");
    }

    #[test]
    fn test_query_params_mutator() {
        let mut query = Params::new();
        query.insert("name".to_string(), Value::from("value"));

        let request = ServerRequest::new().with_query_params(query.clone());
        assert_eq!(request.query_params(), &query);
    }

    #[test]
    fn test_cookie_params_mutator() {
        let mut cookies = Params::new();
        cookies.insert("session".to_string(), Value::from("opaque"));

        let request =
            ServerRequest::new().with_cookie_params(cookies.clone());
        assert_eq!(request.cookie_params(), &cookies);
    }

    #[test]
    fn test_parsed_body_mutator() {
        let request = ServerRequest::new()
            .with_parsed_body(Some(Value::from("raw body")));
        assert_eq!(request.parsed_body(), Some(&Value::from("raw body")));

        let request = request.with_parsed_body(None);
        assert!(request.parsed_body().is_none());
    }

    #[test]
    fn test_attribute_mutators() {
        let request = ServerRequest::new();
        assert!(request.attribute("does-not-exist").is_none());

        let request = request.with_attribute("foo", Value::from("bar"));
        assert_eq!(request.attribute("foo"), Some(&Value::from("bar")));

        let request = request.without_attribute("foo");
        assert!(request.attribute("foo").is_none());
        assert!(request.attributes().is_empty());

        // Removing a non-existent attribute is a no-op
        let request = request.without_attribute("other");
        assert!(request.attributes().is_empty());
    }

    #[test]
    fn test_uploaded_files_are_shared_between_copies() {
        let file = UploadedFile::from_spec(RawUpload {
            source: UploadSource::Stream(Stream::memory()),
            size: 0,
            error: 0,
            client_filename: None,
            client_media_type: None,
        })
        .expect("valid spec");

        let mut files = UploadMap::new();
        files.insert("upload".to_string(), UploadNode::File(file));

        let request = ServerRequest::new().with_uploaded_files(files);
        let copy = request.with_method("POST");

        // Both copies observe the same tree
        assert_eq!(request.uploaded_files().borrow().len(), 1);
        assert_eq!(copy.uploaded_files().borrow().len(), 1);
        assert!(Rc::ptr_eq(
            &request.uploaded_files(),
            &copy.uploaded_files()
        ));
    }
}
