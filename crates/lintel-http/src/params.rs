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

//! Request parameters.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Character set to be percent-encoded in a query-string component.
///
/// RFC 3986 component encoding: only the unreserved characters stay
/// verbatim.
#[rustfmt::skip]
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-').remove(b'.').remove(b'_').remove(b'~');

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Request parameter value.
///
/// The form-shaped data attached to a request - query parameters, parsed
/// bodies and cookies - nests arbitrarily, mirroring bracketed form field
/// names like `choices[]` or `user[name]`. This tagged representation
/// replaces duck-typed maps with explicit variants, validated at the
/// boundary where raw data enters.
///
/// # Examples
///
/// ```
/// use lintel_http::params::Value;
///
/// // Create value from string
/// let value = Value::from("search");
/// assert_eq!(value.as_str(), Some("search"));
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A mapping from field name to value.
    Map(BTreeMap<String, Value>),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Top-level parameter map, e.g. the parsed query string.
pub type Params = BTreeMap<String, Value>;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Value {
    /// Attempts to parse a value from a JSON document.
    ///
    /// Used for request bodies declared as JSON. Only the shapes a form
    /// submission can produce are admitted - strings, lists and maps - so
    /// documents carrying bare numbers or booleans are rejected at this
    /// boundary rather than leaking an unrepresentable value downstream.
    ///
    /// # Errors
    ///
    /// This method returns a [`serde_json::Error`], if the input is not
    /// valid JSON or contains a non-string scalar.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Returns the string form, if the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value under the given key, if the value is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Builds an RFC 3986 query string from a parameter map.
///
/// Nested maps and lists compose bracketed keys, e.g. `user[name]=value`
/// and `choices[0]=a&choices[1]=b`, with both keys and values component
/// encoded - brackets included.
///
/// # Examples
///
/// ```
/// use lintel_http::params::{build_query, Params, Value};
///
/// // Build query string from parameters
/// let mut params = Params::new();
/// params.insert("test".to_string(), Value::from("value"));
/// assert_eq!(build_query(&params), "test=value");
/// ```
#[must_use]
pub fn build_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        collect_pairs(key, value, &mut pairs);
    }
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Collects flattened key-value pairs from a value tree.
fn collect_pairs(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Str(value) => pairs.push((key.to_string(), value.clone())),
        Value::List(values) => {
            for (index, value) in values.iter().enumerate() {
                collect_pairs(&format!("{key}[{index}]"), value, pairs);
            }
        }
        Value::Map(map) => {
            for (name, value) in map {
                collect_pairs(&format!("{key}[{name}]"), value, pairs);
            }
        }
    }
}

/// Encodes a query-string component.
fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<&str> for Value {
    /// Creates a value from a string.
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    /// Creates a value from a string.
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    /// Creates a value from a list.
    #[inline]
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    /// Creates a value from a map.
    #[inline]
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(*value)))
            .collect()
    }

    #[test]
    fn test_build_query_empty() {
        assert_eq!(build_query(&Params::new()), "");
    }

    #[test]
    fn test_build_query_flat() {
        assert_eq!(build_query(&params(&[("test", "value")])), "test=value");
        assert_eq!(
            build_query(&params(&[("test", "value"), ("test2", "value2")])),
            "test=value&test2=value2"
        );
    }

    #[test]
    fn test_build_query_encodes_components() {
        assert_eq!(
            build_query(&params(&[("na me", "va/lue")])),
            "na%20me=va%2Flue"
        );
    }

    #[test]
    fn test_build_query_nested() {
        let mut inner = BTreeMap::new();
        inner.insert("name".to_string(), Value::from("value"));

        let mut query = Params::new();
        query.insert("user".to_string(), Value::Map(inner));
        query.insert(
            "choices".to_string(),
            Value::List(vec![Value::from("a"), Value::from("b")]),
        );
        assert_eq!(
            build_query(&query),
            "choices%5B0%5D=a&choices%5B1%5D=b&user%5Bname%5D=value"
        );
    }

    #[test]
    fn test_from_json_admits_form_shapes_only() {
        let value = Value::from_json(r#"{"name":"value"}"#).expect("valid");
        assert_eq!(value.get("name"), Some(&Value::from("value")));

        assert!(Value::from_json(r#"{"count":1}"#).is_err());
        assert!(Value::from_json("not json").is_err());
    }

    #[test]
    fn test_value_round_trips_through_json() {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), Value::from("value"));
        let value = Value::Map(map);

        let json = serde_json::to_string(&value).expect("serializable");
        assert_eq!(json, r#"{"name":"value"}"#);

        let parsed: Value = serde_json::from_str(&json).expect("parseable");
        assert_eq!(parsed, value);
    }
}
