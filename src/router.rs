//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. Routers compose by mounting one under a prefix of another.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// A set of routes.
///
/// One radix tree per HTTP method. Build it once at startup and mount it on
/// an [`App`](crate::App). Every registration returns `self` so calls chain.
pub struct Router {
    trees: HashMap<Method, MatchitRouter<BoxedHandler>>,
    // matchit cannot enumerate its entries; mounting replays this list.
    routes: Vec<(Method, String, BoxedHandler)>,
}

impl Router {
    pub fn new() -> Self {
        Self { trees: HashMap::new(), routes: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not start with `/` or conflicts with a route
    /// already registered for the same method. Both are start-up bugs.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.add(method, path.to_owned(), handler.into_boxed_handler())
    }

    /// Shorthand for `on(Method::GET, path, handler)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Shorthand for `on(Method::POST, path, handler)`.
    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    /// Re-registers every route of `other` under `prefix`.
    ///
    /// ```text
    /// "/api" + "/echo" → "/api/echo"
    /// "/"    + "/"     → "/"
    /// "/api" + "/"     → "/api"
    /// ```
    pub fn mount(mut self, prefix: &str, other: Router) -> Self {
        for (method, path, handler) in other.routes {
            self = self.add(method, join(prefix, &path), handler);
        }
        self
    }

    fn add(mut self, method: Method, path: String, handler: BoxedHandler) -> Self {
        assert!(path.starts_with('/'), "invalid route `{path}`: must start with `/`");
        self.trees
            .entry(method.clone())
            .or_default()
            .insert(path.clone(), Arc::clone(&handler))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self.routes.push((method, path, handler));
        self
    }

    /// Finds the handler for `method` + `path`. `HEAD` falls back to the
    /// `GET` route of the same path.
    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        self.find(method, path).or_else(|| {
            if *method == Method::HEAD { self.find(&Method::GET, path) } else { None }
        })
    }

    fn find(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.trees.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn join(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match path {
        "" | "/" if !prefix.is_empty() => prefix.to_owned(),
        _ => format!("{prefix}{path}"),
    }
}
