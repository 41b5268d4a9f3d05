//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use serde_json::json;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve)
/// or drive it directly with [`Router::dispatch`].
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    /// Finds the handler for `method` on `path`.
    ///
    /// `HEAD` falls back to the `GET` route; hyper drops the body on the
    /// way out.
    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        self.find(method, path).or_else(|| match method {
            Method::Head => self.find(Method::Get, path),
            _ => None,
        })
    }

    /// Exact lookup in one method's tree. Path parameters come back
    /// percent-decoded.
    fn find(&self, method: Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = candidates(path).find_map(|p| tree.at(p).ok())?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode(v)))
            .collect();
        Some((handler, params))
    }

    /// Methods with a route matching `path`, in a stable order.
    fn allowed(&self, path: &str) -> Vec<Method> {
        Method::ALL.into_iter()
            .filter(|m| self.lookup(*m, path).is_some())
            .collect()
    }

    /// Routes one request and produces one response.
    ///
    /// Unknown paths get a body-less `404`. A path that exists under other
    /// methods gets `405` with an `Allow` header and a JSON error body.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let found = req.method().parse::<Method>().ok()
            .and_then(|m| self.lookup(m, req.path()));

        if let Some((handler, params)) = found {
            req.set_params(params);
            return handler.call(req).await;
        }

        let allowed = self.allowed(req.path());
        if allowed.is_empty() {
            return Response::status(Status::NotFound);
        }

        let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
        let body = json!({ "Error": format!("Method {} not allowed", req.method()) });
        let mut res = Response::json_value(Status::MethodNotAllowed, &body);
        res.headers.push(("allow".to_owned(), allow));
        res
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// `path`, then the same path without a trailing slash. `/` is left alone.
fn candidates(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_suffix('/').filter(|p| !p.is_empty());
    std::iter::once(path).chain(trimmed)
}

/// Percent-decodes a path segment. Sequences that do not decode to UTF-8
/// are kept verbatim.
fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_owned())
}
