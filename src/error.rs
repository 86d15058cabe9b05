//! Unified error type.

use crate::middleware::MediaType;

/// Boxed error a route handler may surface through [`Error::Handler`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by the service's fallible operations.
///
/// Not-found is not an error: it is the router's fallback handler. Everything
/// else that goes wrong while handling an exchange ends up here and is turned
/// into a `500` by the app's error handler, whatever the variant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Binding to a port or accepting a connection.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// An environment value that cannot be used.
    #[error("invalid configuration `{key}`: {reason}")]
    Config { key: &'static str, reason: String },

    /// The incoming body could not be collected from the connection.
    #[error("reading request body: {0}")]
    ReadBody(#[from] hyper::Error),

    /// A body declared as a supported media type failed to parse.
    #[error("malformed {media} body: {reason}")]
    MalformedBody { media: MediaType, reason: String },

    /// Failure raised by a route handler.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),
}

impl Error {
    /// Wraps any error a handler wants to bubble up to the error handler.
    pub fn handler(e: impl Into<BoxError>) -> Self {
        Self::Handler(e.into())
    }
}
