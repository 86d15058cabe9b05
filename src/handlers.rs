//! Terminal handlers.
//!
//! | Handler | Status | Body |
//! |---|---|---|
//! | [`echo`] | `200` | `{"status":true,"message":<message>}` |
//! | [`not_found`] | `404` | `{"status":false,"message":"Not found"}` |
//! | [`internal_error`] | `500` | `{"status":false,"message":"Internal server error"}` |
//!
//! None of them look at the request; the same request always gets the same
//! bytes back.

use http::StatusCode;
use tracing::error;

use crate::error::Error;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::{Envelope, Response};

/// A handler that always answers `200` with `message`.
///
/// ```rust
/// use echo_server::{Router, handlers::echo};
///
/// let api = Router::new().get("/echo", echo("Hello world, from the API!"));
/// ```
pub fn echo(message: &'static str) -> impl Handler {
    move |_req: Request| async move { Ok::<_, Error>(Envelope::ok(message).respond(StatusCode::OK)) }
}

/// Fallback for requests no route matched.
pub async fn not_found(_req: Request) -> Result<Response, Error> {
    Ok(Envelope::fail("Not found").respond(StatusCode::NOT_FOUND))
}

/// Error handler: logs the failure in full, tells the client nothing about it.
pub fn internal_error(err: Error) -> Response {
    error!(error = %err, detail = ?err, "request failed");
    Envelope::fail("Internal server error").respond(StatusCode::INTERNAL_SERVER_ERROR)
}
