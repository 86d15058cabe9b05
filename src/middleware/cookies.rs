//! Request cookies.

use std::collections::HashMap;

use http::header::COOKIE;

use super::Middleware;
use crate::app::Next;
use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Cookies sent with a request, by name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cookies {
    cookies: HashMap<String, String>,
}

impl Cookies {
    /// Parses one `cookie` header value: `a=1; b="two"`.
    ///
    /// Pairs without `=` are skipped, surrounding double quotes are dropped
    /// from values, and the first occurrence of a name wins.
    pub fn parse(header_value: &str) -> Self {
        let mut cookies = Self::default();
        cookies.extend_from(header_value);
        cookies
    }

    fn extend_from(&mut self, header_value: &str) {
        for pair in header_value.split(';') {
            let Some((name, value)) = pair.split_once('=') else { continue };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            self.cookies.entry(name.to_owned()).or_insert_with(|| value.to_owned());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.cookies.len() }
    pub fn is_empty(&self) -> bool { self.cookies.is_empty() }
}

/// Attaches the parsed `cookie` header(s) to the request.
///
/// A request without cookies gets an empty [`Cookies`]. HTTP/2 clients may
/// split cookies over several headers; they are all read.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieParser;

impl Middleware for CookieParser {
    fn name(&self) -> &'static str { "cookies" }

    fn handle<'a>(&'a self, mut req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
        let mut cookies = Cookies::default();
        for value in req.headers().get_all(COOKIE).iter().filter_map(|v| v.to_str().ok()) {
            cookies.extend_from(value);
        }
        req.set_cookies(cookies);
        Box::pin(async move { Ok(next.run(req).await) })
    }
}
