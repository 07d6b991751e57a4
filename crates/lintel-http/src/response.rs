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

//! HTTP response.

use crate::message::{
    Body, Error, HeaderValue, Headers, Message, Result, SharedBody,
};
use crate::stream::Stream;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP response.
///
/// A [`Message`] specialized with a status code and reason phrase. The
/// status code defaults to `200`, and the reason phrase to the standard
/// phrase registered for the code, falling back to the empty string for
/// unregistered codes.
///
/// # Examples
///
/// ```
/// use lintel_http::response::Response;
///
/// # fn main() -> lintel_http::message::Result {
/// // Create response and set status
/// let res = Response::new().with_status(404)?;
/// assert_eq!(res.reason_phrase(), "Not Found");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    /// Response status code.
    status: u16,
    /// Custom reason phrase, if any.
    reason: Option<String>,
    /// Shared message core.
    message: Message,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Response {
    /// Creates a response.
    ///
    /// The status code defaults to `200` and the body to an empty in-memory
    /// stream, open for reading and writing.
    #[must_use]
    pub fn new() -> Self {
        Response {
            status: 200,
            reason: None,
            message: Message::new().with_body(Body::Stream(Stream::memory())),
        }
    }

    /// Returns the status code.
    #[inline]
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Returns the reason phrase.
    ///
    /// The custom phrase when one was set, otherwise the standard phrase
    /// for the status code, or the empty string for unregistered codes.
    #[must_use]
    pub fn reason_phrase(&self) -> &str {
        match &self.reason {
            Some(reason) => reason,
            None => standard_reason(self.status),
        }
    }

    /// Returns a response with the given status code.
    ///
    /// The reason phrase is reset to the standard phrase for the code.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidStatusCode`], if the code is
    /// outside the range from 100 to 599.
    pub fn with_status(&self, status: u16) -> Result<Self> {
        if !(100..=599).contains(&status) {
            return Err(Error::InvalidStatusCode(status));
        }
        let mut response = self.clone();
        response.status = status;
        response.reason = None;
        Ok(response)
    }

    /// Returns a response with the given status code and reason phrase.
    ///
    /// # Errors
    ///
    /// Same as [`Response::with_status`].
    pub fn with_status_and_reason(
        &self,
        status: u16,
        reason: &str,
    ) -> Result<Self> {
        let mut response = self.with_status(status)?;
        if !reason.is_empty() {
            response.reason = Some(reason.to_string());
        }
        Ok(response)
    }

    /// Returns the headers.
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &Headers {
        self.message.headers()
    }

    /// Returns whether the given header is present.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.message.has_header(name)
    }

    /// Returns the values for the given header.
    #[must_use]
    pub fn header(&self, name: &str) -> &[String] {
        self.message.header(name)
    }

    /// Returns the values for the given header as a comma-joined line.
    #[must_use]
    pub fn header_line(&self, name: &str) -> String {
        self.message.header_line(name)
    }

    /// Returns a response with all values of the given header replaced.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_header`].
    pub fn with_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        let mut response = self.clone();
        response.message = self.message.with_header(name, value)?;
        Ok(response)
    }

    /// Returns a response with values appended to the given header.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_added_header`].
    pub fn with_added_header<V>(&self, name: &str, value: V) -> Result<Self>
    where
        V: Into<HeaderValue>,
    {
        let mut response = self.clone();
        response.message = self.message.with_added_header(name, value)?;
        Ok(response)
    }

    /// Returns a response without the given header.
    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut response = self.clone();
        response.message = self.message.without_header(name);
        response
    }

    /// Returns the protocol version.
    #[inline]
    #[must_use]
    pub fn protocol_version(&self) -> &str {
        self.message.protocol_version()
    }

    /// Returns a response with the given protocol version.
    ///
    /// # Errors
    ///
    /// Same as [`Message::with_protocol_version`].
    pub fn with_protocol_version(&self, version: &str) -> Result<Self> {
        let mut response = self.clone();
        response.message = self.message.with_protocol_version(version)?;
        Ok(response)
    }

    /// Returns the shared body handle.
    #[inline]
    #[must_use]
    pub fn body(&self) -> SharedBody {
        self.message.body()
    }

    /// Returns a response with the given body.
    #[must_use]
    pub fn with_body(&self, body: Body) -> Self {
        let mut response = self.clone();
        response.message = self.message.with_body(body);
        response
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns the standard reason phrase for a status code.
///
/// Unregistered codes yield the empty string.
#[must_use]
#[rustfmt::skip]
pub fn standard_reason(status: u16) -> &'static str {
    match status {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        103 => "Early Hints",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        421 => "Misdirected Request",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        425 => "Too Early",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        510 => "Not Extended",
        511 => "Network Authentication Required",
        _ => "",
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Response {
    /// Creates a default response.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_defaults_to_200() {
        let response = Response::new();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.reason_phrase(), "OK");
    }

    #[test]
    fn test_status_mutator_returns_changed_copy() -> Result {
        let response = Response::new();
        let changed = response.with_status(400)?;
        assert_eq!(changed.status_code(), 400);
        assert_eq!(response.status_code(), 200);
        Ok(())
    }

    #[test]
    fn test_reason_phrase_defaults_to_standard() -> Result {
        let response = Response::new().with_status(422)?;
        assert_eq!(response.reason_phrase(), "Unprocessable Entity");
        Ok(())
    }

    #[test]
    fn test_custom_reason_phrase() -> Result {
        let response =
            Response::new().with_status_and_reason(422, "Foo Bar!")?;
        assert_eq!(response.reason_phrase(), "Foo Bar!");
        Ok(())
    }

    #[test]
    fn test_valid_status_code_range() -> Result {
        for status in [100, 200, 226, 300, 404, 418, 599] {
            assert_eq!(
                Response::new().with_status(status)?.status_code(),
                status
            );
        }
        Ok(())
    }

    #[test]
    fn test_invalid_status_codes_fail() {
        for status in [0, 1, 99, 600, 700, u16::MAX] {
            assert!(matches!(
                Response::new().with_status(status),
                Err(Error::InvalidStatusCode(_))
            ));
        }
    }

    #[test]
    fn test_reason_phrase_can_be_empty() -> Result {
        let response = Response::new().with_status(555)?;
        assert_eq!(response.reason_phrase(), "");
        Ok(())
    }

    #[test]
    fn test_body_is_writable_stream() {
        let response = Response::new();
        let body = response.body();
        body.borrow_mut().write(b"Hello").expect("writable");
        assert_eq!(body.borrow_mut().text(), "Hello");
    }
}
