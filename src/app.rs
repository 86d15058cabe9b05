//! The application: an ordered middleware stack in front of a router.
//!
//! ```text
//! request → stage 0 → stage 1 → … → router ─┬→ route handler
//!                                            └→ fallback (no match)
//! ```
//!
//! Each stage gets the request and a [`Next`]. Awaiting [`Next::run`] always
//! yields a [`Response`]: whenever the stage below fails, `Next` turns the
//! error into a response with the app's error handler right there. Stages
//! above the failure therefore still see, and can decorate, the error
//! response on its way out.

use bytes::Bytes;
use http::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

type ErrorHandler = Box<dyn Fn(Error) -> Response + Send + Sync + 'static>;

/// A fully assembled request-handling chain.
///
/// Built once at startup and shared read-only across connections.
pub struct App {
    stack: Vec<Box<dyn Middleware>>,
    router: Router,
    fallback: BoxedHandler,
    on_error: ErrorHandler,
}

impl App {
    /// An empty app: no middleware, no routes, a bare `404` fallback and a
    /// bare `500` error handler.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            router: Router::new(),
            fallback: (|_req: Request| async { Ok::<_, Error>(StatusCode::NOT_FOUND) })
                .into_boxed_handler(),
            on_error: Box::new(|_| Response::new(StatusCode::INTERNAL_SERVER_ERROR)),
        }
    }

    /// Appends a stage. Stages run in the order they were added.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.stack.push(Box::new(middleware));
        self
    }

    /// Makes every route of `router` reachable under `prefix`.
    pub fn mount(mut self, prefix: &str, router: Router) -> Self {
        self.router = self.router.mount(prefix, router);
        self
    }

    /// Handler for requests no route matched.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = handler.into_boxed_handler();
        self
    }

    /// Converts a failure from any stage into the response sent instead.
    pub fn on_error(mut self, handler: impl Fn(Error) -> Response + Send + Sync + 'static) -> Self {
        self.on_error = Box::new(handler);
        self
    }

    /// Runs one exchange through the whole chain.
    pub async fn handle(&self, req: Request) -> Response {
        Next { stack: &self.stack, app: self }.run(req).await
    }

    /// Convenience over [`App::handle`] for an `http::Request` held in memory.
    pub async fn oneshot(&self, req: http::Request<Bytes>) -> Response {
        self.handle(Request::from_http(req)).await
    }

    async fn endpoint(&self, mut req: Request) -> Result<Response, Error> {
        if let Some(failure) = req.take_failure() {
            return Err(failure);
        }
        match self.router.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None => self.fallback.call(req).await,
        }
    }
}

impl Default for App {
    fn default() -> Self { Self::new() }
}

// ── Next ──────────────────────────────────────────────────────────────────────

/// The rest of the chain below the current stage.
///
/// A stage that never calls [`Next::run`] terminates the chain with its own
/// response.
pub struct Next<'a> {
    stack: &'a [Box<dyn Middleware>],
    app: &'a App,
}

impl<'a> Next<'a> {
    pub async fn run(self, req: Request) -> Response {
        let (stage, result) = match self.stack.split_first() {
            Some((middleware, rest)) => {
                let next = Next { stack: rest, app: self.app };
                (middleware.name(), middleware.handle(req, next).await)
            }
            None => ("router", self.app.endpoint(req).await),
        };

        result.unwrap_or_else(|e| {
            debug!(stage, "stage failed");
            (self.app.on_error)(e)
        })
    }
}
