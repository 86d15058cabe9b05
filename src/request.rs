//! Incoming HTTP request type.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use http::{HeaderMap, Method};

use crate::error::Error;
use crate::middleware::cookies::Cookies;

// ── Body ──────────────────────────────────────────────────────────────────────

/// The request body, as seen by the current stage of the chain.
///
/// Every request enters the chain as [`Body::Raw`]. A body parser swaps it
/// for the structured variant when the content type is one it supports.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Raw(Bytes),
    Json(serde_json::Value),
    Form(BTreeMap<String, String>),
}

impl Body {
    pub fn raw(&self) -> Option<&Bytes> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Form(fields) => Some(fields),
            _ => None,
        }
    }
}

impl Default for Body {
    fn default() -> Self { Self::Raw(Bytes::new()) }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// An incoming HTTP request with its body fully read.
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Body,
    cookies: Cookies,
    params: HashMap<String, String>,
    failure: Option<Error>,
}

impl Request {
    pub(crate) fn new(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            method: parts.method,
            headers: parts.headers,
            body: Body::Raw(body),
            cookies: Cookies::default(),
            params: HashMap::new(),
            failure: None,
        }
    }

    /// A request whose body could not be read.
    ///
    /// It still travels the whole chain with an empty body; the router end
    /// answers with `failure` instead of calling a handler.
    pub(crate) fn unreadable(parts: http::request::Parts, failure: Error) -> Self {
        Self { failure: Some(failure), ..Self::new(parts, Bytes::new()) }
    }

    /// Builds a request from an `http::Request` whose body is already in memory.
    ///
    /// This is how tests and embedders drive an [`App`](crate::App) without a
    /// socket in between.
    pub fn from_http(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts, body)
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &Body { &self.body }
    pub fn cookies(&self) -> &Cookies { &self.cookies }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// are treated as absent.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }

    pub fn set_cookies(&mut self, cookies: Cookies) {
        self.cookies = cookies;
    }

    pub(crate) fn take_failure(&mut self) -> Option<Error> {
        self.failure.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_uri_into_path_and_query() {
        let req = Request::from_http(
            http::Request::builder()
                .method(Method::POST)
                .uri("/api/echo?verbose=1")
                .header("Content-Type", "application/json")
                .body(Bytes::from_static(b"{}"))
                .unwrap(),
        );

        assert_eq!(*req.method(), Method::POST);
        assert_eq!(req.path(), "/api/echo");
        assert_eq!(req.query(), Some("verbose=1"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body().raw().map(|b| &b[..]), Some(&b"{}"[..]));
        assert!(req.cookies().is_empty());
        assert_eq!(req.param("id"), None);
    }

    #[test]
    fn unreadable_request_carries_its_failure_once() {
        let (parts, _) = http::Request::builder().uri("/").body(()).unwrap().into_parts();
        let mut req = Request::unreadable(parts, Error::handler("connection reset"));

        assert_eq!(req.body().raw().map(|b| b.len()), Some(0));
        assert!(matches!(req.take_failure(), Some(Error::Handler(_))));
        assert!(req.take_failure().is_none());
    }
}
