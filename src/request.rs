//! Incoming HTTP request type.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::BodyExt;

use crate::method::Method;

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) peer: Option<SocketAddr>,
}

impl Request {
    /// Builder for requests constructed outside a live connection, such as
    /// in tests that drive a [`Router`](crate::Router) directly.
    pub fn builder(method: Method, path: &str) -> RequestBuilder {
        RequestBuilder {
            method: method.as_str().to_owned(),
            path: path.to_owned(),
            headers: Vec::new(),
            body: Bytes::new(),
            peer: None,
        }
    }

    /// Reads the whole body of a hyper request and converts it.
    ///
    /// Header values that are not visible ASCII are dropped.
    pub(crate) async fn from_hyper(
        req: hyper::Request<hyper::body::Incoming>,
        peer: SocketAddr,
    ) -> Result<Self, hyper::Error> {
        let (parts, body) = req.into_parts();
        let body = body.collect().await?.to_bytes();
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();

        Ok(Self {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            headers,
            body,
            params: HashMap::new(),
            peer: Some(peer),
        })
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/quotes/{id}`, `req.param("id")` on `/quotes/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Address of the client that originated the request.
    ///
    /// The service sits behind a trusted proxy, so the left-most
    /// `X-Forwarded-For` entry wins over the socket peer.
    pub fn client_ip(&self) -> String {
        let forwarded = self.header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match (forwarded, self.peer) {
            (Some(ip), _) => ip.to_owned(),
            (None, Some(peer)) => peer.ip().to_string(),
            (None, None) => "-".to_owned(),
        }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

/// Fluent builder for [`Request`]. Obtain via [`Request::builder`].
pub struct RequestBuilder {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    peer: Option<SocketAddr>,
}

impl RequestBuilder {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body and the matching content-type.
    pub fn json(self, body: &serde_json::Value) -> Self {
        self.header("content-type", "application/json")
            .body(body.to_string())
    }

    pub fn peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            headers: self.headers,
            body: self.body,
            params: HashMap::new(),
            peer: self.peer,
        }
    }
}
