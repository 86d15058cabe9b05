//! Wildcard CORS headers on every response, error responses included.

use http::HeaderValue;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};

use super::Middleware;
use crate::app::Next;
use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Grants every origin, method and request header.
///
/// The three `access-control-allow-*` headers are set to `*` on whatever
/// response comes back up the chain, error responses included. There is no
/// per-route or per-origin configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cors;

impl Middleware for Cors {
    fn name(&self) -> &'static str { "cors" }

    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
        Box::pin(async move {
            let mut res = next.run(req).await;
            let any = HeaderValue::from_static("*");
            let headers = res.headers_mut();
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
            headers.insert(ACCESS_CONTROL_ALLOW_METHODS, any.clone());
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, any);
            Ok(res)
        })
    }
}
