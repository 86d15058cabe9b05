//! Response header removal.

use http::header::HeaderName;

use super::Middleware;
use crate::app::Next;
use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::{POWERED_BY, Response};

/// Removes one response header, whatever set it.
///
/// Several instances compose in any order.
#[derive(Clone, Debug)]
pub struct RemoveHeader(HeaderName);

impl RemoveHeader {
    pub fn new(name: HeaderName) -> Self {
        Self(name)
    }

    /// Strips the framework-identifying `x-powered-by` header.
    pub fn powered_by() -> Self {
        Self(POWERED_BY)
    }
}

impl Middleware for RemoveHeader {
    fn name(&self) -> &'static str { "remove-header" }

    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
        Box::pin(async move {
            let mut res = next.run(req).await;
            res.headers_mut().remove(&self.0);
            Ok(res)
        })
    }
}
