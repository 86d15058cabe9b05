//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it. Middlewares further up the
//! chain may still edit its headers on the way out, which is why the type
//! stays mutable until the server converts it with `into_inner`.

use std::borrow::Cow;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

/// Framework-identifying header stamped on every response at creation.
pub const POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");

const POWERED_BY_VALUE: &str = concat!("echo-server/", env!("CARGO_PKG_VERSION"));

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use echo_server::{Envelope, Response};
/// use http::StatusCode;
///
/// Response::json(StatusCode::OK, &Envelope::ok("hi"));
/// Response::text("hello");
/// Response::new(StatusCode::NO_CONTENT);
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Response with no body.
    pub fn new(status: StatusCode) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(POWERED_BY, HeaderValue::from_static(POWERED_BY_VALUE));
        Self { status, headers, body: Bytes::new() }
    }

    /// `application/json` response carrying `value` serialised with serde_json.
    ///
    /// A value that refuses to serialise turns into a bodiless `500`.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => Self::new(status).with_body("application/json", bytes),
            Err(e) => {
                error!("response serialisation failed: {e}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::new(StatusCode::OK).with_body("text/plain; charset=utf-8", body)
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { &mut self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    fn with_body(mut self, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.body = body.into();
        self
    }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}

// ── Envelope ──────────────────────────────────────────────────────────────────

/// The JSON shape every application response uses:
/// `{"status":<bool>,"message":<string>}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Envelope {
    pub status: bool,
    pub message: Cow<'static, str>,
}

impl Envelope {
    pub fn ok(message: impl Into<Cow<'static, str>>) -> Self {
        Self { status: true, message: message.into() }
    }

    pub fn fail(message: impl Into<Cow<'static, str>>) -> Self {
        Self { status: false, message: message.into() }
    }

    pub fn respond(&self, status: StatusCode) -> Response {
        Response::json(status, self)
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a bare status from a handler: `Ok(StatusCode::NO_CONTENT)`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::new(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serialises_status_before_message() {
        let res = Envelope::ok("Hello world, from /").respond(StatusCode::OK);

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(&res.body()[..], br#"{"status":true,"message":"Hello world, from /"}"#);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn every_response_starts_with_powered_by() {
        let res = StatusCode::NO_CONTENT.into_response();

        assert!(res.headers().contains_key(POWERED_BY));
        assert!(res.body().is_empty());
    }

    #[test]
    fn into_inner_keeps_status_headers_and_body() {
        let inner = Envelope::fail("Not found").respond(StatusCode::NOT_FOUND).into_inner();

        assert_eq!(inner.status(), StatusCode::NOT_FOUND);
        assert_eq!(inner.headers()[CONTENT_TYPE], "application/json");
    }
}
