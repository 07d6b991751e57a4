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

//! Path rewriting.
//!
//! Maps the raw request path onto the internal routing query parameter.
//! Deployments differ in how requests reach the application - behind a
//! rewrite rule, through the front controller script directly, or mounted
//! under a base URL - and the dispatcher folds all of them into one
//! canonical `efw-path` parameter the router matches against.

use tracing::trace;

use crate::negotiate::Negotiated;
use crate::params::Value;
use crate::server::ServerRequest;
use crate::uri::{Result, Uri};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Query parameter carrying the routing path.
pub const ROUTE_PATH_PARAM: &str = "efw-path";

/// Front controller script segment stripped from rewritten paths.
const FRONT_CONTROLLER: &str = "index.php";

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Path-rewrite dispatcher.
///
/// Holds the base URLs the application is reachable under and rewrites
/// incoming requests so that the routing path always arrives in the
/// [`ROUTE_PATH_PARAM`] query parameter.
///
/// # Examples
///
/// ```
/// use lintel_http::rewrite::Dispatcher;
///
/// # fn main() -> lintel_http::uri::Result {
/// // Create dispatcher and register base URL
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.add_base_url("http://www.example.com/app/")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher {
    /// Base URLs the application is mounted under.
    base_urls: Vec<Uri>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Dispatcher {
    /// Creates a dispatcher.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a base URL.
    ///
    /// # Errors
    ///
    /// This method returns an error if the URL does not parse, see
    /// [`Uri::parse`].
    pub fn add_base_url(&mut self, url: &str) -> Result {
        self.base_urls.push(Uri::parse(url)?);
        Ok(())
    }

    /// Registers several base URLs.
    ///
    /// # Errors
    ///
    /// This method returns an error if one of the URLs does not parse, see
    /// [`Uri::parse`].
    pub fn add_base_urls(&mut self, urls: &[&str]) -> Result {
        for url in urls {
            self.add_base_url(url)?;
        }
        Ok(())
    }

    /// Returns the registered base URLs.
    #[must_use]
    pub fn base_urls(&self) -> &[Uri] {
        &self.base_urls
    }

    /// Rewrites the request path into the routing query parameter.
    ///
    /// When the query already carries [`ROUTE_PATH_PARAM`] - the rewrite
    /// rule did its job - the request passes through unchanged. Otherwise
    /// the routing path is computed from the request URI path by stripping
    /// the longest matching base-URL prefix, or failing that, everything
    /// up to and including the front controller segment. The result is
    /// injected as a query parameter through a copy-on-write update, and
    /// the request is handed back wrapped in the negotiation facade.
    #[must_use]
    pub fn parse_rewrite_uri(&self, request: &ServerRequest) -> Negotiated {
        if request.query_params().contains_key(ROUTE_PATH_PARAM) {
            return Negotiated::new(request.clone());
        }

        let mut path = request.uri().path().to_string();
        let mut stripped = false;
        for base in &self.base_urls {
            let prefix = base.path().trim_end_matches('/');
            if prefix.is_empty() {
                continue;
            }
            if let Some(rest) = path.strip_prefix(prefix) {
                path = rest.to_string();
                stripped = true;
                break;
            }
        }
        if !stripped {
            if let Some(pos) = path.find(FRONT_CONTROLLER) {
                path = path[pos + FRONT_CONTROLLER.len()..].to_string();
            }
        }
        trace!(%path, "rewrote request path");

        let mut query = request.query_params().clone();
        query.insert(ROUTE_PATH_PARAM.to_string(), Value::from(path));
        Negotiated::new(request.with_query_params(query))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use crate::server::env::{self, Environment, TrustedProxies};

    fn base_env() -> Environment {
        let mut env = Environment::new();
        for (key, value) in [
            ("SERVER_PROTOCOL", "1.1"),
            ("HTTP_ACCEPT", "application/json"),
            ("REQUEST_METHOD", "POST"),
            ("REQUEST_URI", ""),
            ("HTTP_HOST", "subdomain.example.com"),
            ("HTTPS", "Off"),
            ("SERVER_PORT", ""),
            ("PHP_SELF", "/index.php/index/var"),
            ("SCRIPT_NAME", "/index.php"),
            ("REMOTE_ADDR", "192.168.56.1"),
        ] {
            env.insert(key, value);
        }
        env
    }

    fn request_for(env: Environment, query: Params) -> ServerRequest {
        let proxies = TrustedProxies::default();
        let uri =
            env::extract_uri(&env, &proxies, &query).expect("valid URI");
        ServerRequest::new()
            .with_uri(uri)
            .with_server_params(env)
            .with_query_params(query)
    }

    fn route_path(negotiated: &Negotiated) -> Option<String> {
        negotiated
            .request()
            .query_params()
            .get(ROUTE_PATH_PARAM)
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    #[test]
    fn test_base_urls_are_parsed() -> Result {
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_base_urls(&[
            "http://www.test.com/index/index",
            "http://localhost/index/index",
        ])?;
        assert_eq!(dispatcher.base_urls().len(), 2);
        assert_eq!(dispatcher.base_urls()[0].host(), "www.test.com");
        Ok(())
    }

    #[test]
    fn test_rewritten_request_passes_through() {
        let mut query = Params::new();
        query.insert(ROUTE_PATH_PARAM.to_string(), Value::from(""));
        let request = request_for(base_env(), query);

        let result = Dispatcher::new().parse_rewrite_uri(&request);
        assert_eq!(route_path(&result), Some(String::new()));
    }

    #[test]
    fn test_path_is_injected_without_rewrite_rules() {
        let request = request_for(base_env(), Params::new());
        let result = Dispatcher::new().parse_rewrite_uri(&request);
        assert!(route_path(&result).is_some());
    }

    #[test]
    fn test_path_to_controller_behind_front_controller() {
        let mut env = base_env();
        env.insert("PATH_INFO", "/index.php/index");
        let request = request_for(env, Params::new());

        let result = Dispatcher::new().parse_rewrite_uri(&request);
        assert_eq!(route_path(&result), Some("/index".to_string()));
    }

    #[test]
    fn test_path_without_front_controller_stays() {
        let mut env = base_env();
        env.insert("PATH_INFO", "/index/index");
        let request = request_for(env, Params::new());

        let result = Dispatcher::new().parse_rewrite_uri(&request);
        assert_eq!(route_path(&result), Some("/index/index".to_string()));
    }

    #[test]
    fn test_front_controller_below_subdirectory() {
        let mut env = base_env();
        env.insert("PATH_INFO", "/path/index.php/index");
        let request = request_for(env, Params::new());

        let result = Dispatcher::new().parse_rewrite_uri(&request);
        assert_eq!(route_path(&result), Some("/index".to_string()));
    }

    #[test]
    fn test_base_url_prefix_is_stripped() -> Result {
        let mut env = base_env();
        env.insert("PATH_INFO", "/path/app-test/index");
        let request = request_for(env, Params::new());

        let mut dispatcher = Dispatcher::new();
        dispatcher.add_base_url("http://www.test.com/path/app-test/")?;
        let result = dispatcher.parse_rewrite_uri(&request);
        assert_eq!(route_path(&result), Some("/index".to_string()));
        Ok(())
    }
}
