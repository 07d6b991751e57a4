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

//! HTTP message.

use std::sync::LazyLock;

use regex::Regex;

mod body;
mod error;
pub mod headers;

pub use body::{Body, SharedBody};
pub use error::{Error, Result};
pub use headers::Headers;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Accepted protocol version strings, e.g. `1.0`, `1.1` or `2`.
static PROTOCOL_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9]\d*(?:\.\d)?$").expect("invariant")
});

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Message header value.
///
/// The boundary type for everything that may be passed as a header value: a
/// single scalar or a flat list of scalars. Numbers are coerced to their
/// string form, while nested lists are rejected on conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum HeaderValue {
    /// A string value.
    Str(String),
    /// An integer value, coerced to its string form.
    Int(i64),
    /// A floating-point value, coerced to its string form.
    Float(f64),
    /// A flat list of scalar values.
    List(Vec<HeaderValue>),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP message.
///
/// The shared core of requests and responses: a protocol version, a header
/// map with case-preserving names and case-insensitive lookup, and a body
/// stream. Messages are immutable values - every mutator returns a new
/// [`Message`], while the body handle is shared between copies.
///
/// # Examples
///
/// ```
/// use lintel_http::message::Message;
///
/// # fn main() -> lintel_http::message::Result {
/// // Create message and add header
/// let message = Message::new().with_header("X-Foo", "bar")?;
/// assert_eq!(message.header_line("x-foo"), "bar");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Message {
    /// Protocol version, e.g. `1.1`.
    version: Version,
    /// Message headers.
    headers: Headers,
    /// Message body, shared between copies.
    body: SharedBody,
}

/// Protocol version with the conventional default.
#[derive(Clone, Debug)]
struct Version(String);

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Message {
    /// Creates a message.
    ///
    /// The protocol version defaults to `1.1` and the body to an empty
    /// input stream.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the protocol version.
    #[inline]
    #[must_use]
    pub fn protocol_version(&self) -> &str {
        &self.version.0
    }

    /// Returns a message with the given protocol version.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidProtocolVersion`], if the version
    /// is not of the form `digit[.digit]` without an `HTTP/` prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_http::message::Message;
    ///
    /// # fn main() -> lintel_http::message::Result {
    /// // Create message and change protocol version
    /// let message = Message::new().with_protocol_version("1.0")?;
    /// assert_eq!(message.protocol_version(), "1.0");
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_protocol_version(&self, version: &str) -> Result<Self> {
        if !PROTOCOL_VERSION.is_match(version) {
            return Err(Error::InvalidProtocolVersion(version.to_string()));
        }
        let mut message = self.clone();
        message.version = Version(version.to_string());
        Ok(message)
    }

    /// Returns the headers.
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns whether the given header is present.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    /// Returns the values for the given header.
    #[must_use]
    pub fn header(&self, name: &str) -> &[String] {
        self.headers.get(name)
    }

    /// Returns the values for the given header as a comma-joined line.
    #[must_use]
    pub fn header_line(&self, name: &str) -> String {
        self.headers.line(name)
    }

    /// Returns a message with all values of the given header replaced.
    ///
    /// A case-insensitively matching header is replaced entirely, adopting
    /// the casing of this call.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidHeaderName`], if the name
    /// violates the token grammar, [`Error::InvalidHeaderValue`], if a value
    /// contains bytes outside the field-content grammar, and
    /// [`Error::InvalidHeaderValueType`] for nested lists.
    pub fn with_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        headers::assert_valid_name(name)?;
        let values = value.into().into_strings()?;
        let mut message = self.clone();
        message.headers.set(name, values);
        Ok(message)
    }

    /// Returns a message with values appended to the given header.
    ///
    /// A case-insensitively matching header keeps its original casing;
    /// otherwise a new header is created.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_header`].
    pub fn with_added_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        headers::assert_valid_name(name)?;
        let values = value.into().into_strings()?;
        let mut message = self.clone();
        message.headers.append(name, values);
        Ok(message)
    }

    /// Returns a message without the given header.
    ///
    /// The removal is case-insensitive and a no-op when the header is not
    /// present.
    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut message = self.clone();
        message.headers.remove(name);
        message
    }

    /// Returns the shared body handle.
    #[inline]
    #[must_use]
    pub fn body(&self) -> SharedBody {
        SharedBody::clone(&self.body)
    }

    /// Returns a message with the given body.
    #[must_use]
    pub fn with_body(&self, body: Body) -> Self {
        let mut message = self.clone();
        message.body = body.shared();
        message
    }

    /// Returns a message sharing the given body handle.
    #[must_use]
    pub fn with_shared_body(&self, body: SharedBody) -> Self {
        let mut message = self.clone();
        message.body = body;
        message
    }
}

impl HeaderValue {
    /// Converts the value into validated header strings.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidHeaderValueType`] for a list
    /// nested inside a list, and [`Error::InvalidHeaderValue`], if a string
    /// fails the field-content grammar.
    fn into_strings(self) -> Result<Vec<String>> {
        match self {
            HeaderValue::List(values) => values
                .into_iter()
                .map(|value| match value {
                    HeaderValue::Str(value) => {
                        headers::assert_valid(&value)?;
                        Ok(value)
                    }
                    HeaderValue::Int(value) => Ok(value.to_string()),
                    HeaderValue::Float(value) => Ok(value.to_string()),
                    HeaderValue::List(_) => Err(Error::InvalidHeaderValueType),
                })
                .collect(),
            value => value.into_string().map(|value| vec![value]),
        }
    }

    /// Converts a scalar value into a validated header string.
    fn into_string(self) -> Result<String> {
        match self {
            HeaderValue::Str(value) => {
                headers::assert_valid(&value)?;
                Ok(value)
            }
            HeaderValue::Int(value) => Ok(value.to_string()),
            HeaderValue::Float(value) => Ok(value.to_string()),
            HeaderValue::List(_) => Err(Error::InvalidHeaderValueType),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Version {
    /// Creates the default protocol version.
    #[inline]
    fn default() -> Self {
        Version("1.1".to_string())
    }
}

// ----------------------------------------------------------------------------

impl From<&str> for HeaderValue {
    /// Creates a header value from a string.
    #[inline]
    fn from(value: &str) -> Self {
        HeaderValue::Str(value.to_string())
    }
}

impl From<String> for HeaderValue {
    /// Creates a header value from a string.
    #[inline]
    fn from(value: String) -> Self {
        HeaderValue::Str(value)
    }
}

impl From<i64> for HeaderValue {
    /// Creates a header value from an integer.
    #[inline]
    fn from(value: i64) -> Self {
        HeaderValue::Int(value)
    }
}

impl From<f64> for HeaderValue {
    /// Creates a header value from a floating-point number.
    #[inline]
    fn from(value: f64) -> Self {
        HeaderValue::Float(value)
    }
}

impl<T> From<Vec<T>> for HeaderValue
where
    T: Into<HeaderValue>,
{
    /// Creates a header value from a list of scalars.
    fn from(values: Vec<T>) -> Self {
        HeaderValue::List(values.into_iter().map(Into::into).collect())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
