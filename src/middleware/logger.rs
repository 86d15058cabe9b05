//! Request logging through `tracing`.

use tracing::info;

use super::Middleware;
use crate::app::Next;
use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Logs `method` and `path` of every request, then forwards it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger;

impl Middleware for Logger {
    fn name(&self) -> &'static str { "logger" }

    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
        info!(method = %req.method(), path = req.path(), "request");
        Box::pin(async move { Ok(next.run(req).await) })
    }
}
