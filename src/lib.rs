//! # echo-server
//!
//! A minimal JSON echo service on a small hyper + tokio + matchit stack.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `GET` | `/` | `200 {"status":true,"message":"Hello world, from /"}` |
//! | `GET` | `/api/echo` | `200 {"status":true,"message":"Hello world, from the API!"}` |
//! | any | anything else | `404 {"status":false,"message":"Not found"}` |
//! | any | anything that fails | `500 {"status":false,"message":"Internal server error"}` |
//!
//! Every response grants all CORS origins and carries no `x-powered-by`.
//!
//! ## Layout
//!
//! - [`App`] — an ordered [`Middleware`](middleware::Middleware) stack in
//!   front of a [`Router`], with a fallback and an error handler
//! - [`middleware`] — logging, CORS, header removal, body and cookie parsing
//! - [`handlers`] — the echo, not-found and internal-error handlers
//! - [`routes`] — the service itself: routes plus chain order
//! - [`Server`] — accept loop and graceful shutdown
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use echo_server::{Config, Server, routes, telemetry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), echo_server::Error> {
//!     let config = Config::from_env()?;
//!     telemetry::init(&config.log);
//!
//!     Server::bind(config.addr()).await?.serve(routes::app()).await
//! }
//! ```

mod app;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{App, Next};
pub use config::Config;
pub use error::{BoxError, Error};
pub use handler::{BoxFuture, Handler};
pub use request::{Body, Request};
pub use response::{Envelope, IntoResponse, POWERED_BY, Response};
pub use router::Router;
pub use server::Server;
