//! Middleware layer.
//!
//! A middleware is one stage of the [`App`](crate::App) chain. It receives
//! the request and a [`Next`]; it may edit the request before calling
//! [`Next::run`], edit the response afterwards, or skip `next` entirely and
//! answer on its own. Returning `Err` hands the failure to the app's error
//! handler.
//!
//! Built-in stages:
//! - [`Logger`] — one `tracing` line per request with method and path
//! - [`Cors`] — wildcard CORS response headers
//! - [`RemoveHeader`] — strips one response header
//! - [`BodyParser`] — structured body for a supported [`MediaType`]
//! - [`CookieParser`] — `cookie` header into [`Cookies`]

pub mod body;
pub mod cookies;
mod cors;
mod headers;
mod logger;

pub use body::{BodyParser, ContentType, MediaType};
pub use cookies::{CookieParser, Cookies};
pub use cors::Cors;
pub use headers::RemoveHeader;
pub use logger::Logger;

use crate::app::Next;
use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// One stage of the request-handling chain.
pub trait Middleware: Send + Sync + 'static {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>>;
}
