//! Request body parsing.
//!
//! The set of body formats the service understands is closed: [`MediaType`]
//! lists them and maps each to its parser. Anything else classifies as
//! [`ContentType::Unsupported`] and the body is left raw.

use std::collections::BTreeMap;
use std::fmt;

use http::header::CONTENT_TYPE;
use tracing::trace;

use super::Middleware;
use crate::app::Next;
use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::{Body, Request};
use crate::response::Response;

// ── MediaType ─────────────────────────────────────────────────────────────────

/// A body format with a parser.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MediaType {
    Json,       // application/json
    UrlEncoded, // application/x-www-form-urlencoded
}

impl MediaType {
    pub const ALL: [MediaType; 2] = [Self::Json, Self::UrlEncoded];

    /// The `type/subtype` this variant answers to.
    pub fn essence(self) -> &'static str {
        match self {
            Self::Json       => "application/json",
            Self::UrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    /// Parses `raw` as this format. An empty body yields an empty structure.
    pub fn parse(self, raw: &[u8]) -> Result<Body, Error> {
        match self {
            Self::Json       => parse_json(raw),
            Self::UrlEncoded => parse_form(raw),
        }
    }

    fn malformed(self, reason: impl fmt::Display) -> Error {
        Error::MalformedBody { media: self, reason: reason.to_string() }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.essence())
    }
}

fn parse_json(raw: &[u8]) -> Result<Body, Error> {
    if raw.is_empty() {
        return Ok(Body::Json(serde_json::Value::Object(Default::default())));
    }
    serde_json::from_slice(raw)
        .map(Body::Json)
        .map_err(|e| MediaType::Json.malformed(e))
}

fn parse_form(raw: &[u8]) -> Result<Body, Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw)
        .map_err(|e| MediaType::UrlEncoded.malformed(e))?;
    Ok(Body::Form(pairs.into_iter().collect::<BTreeMap<_, _>>()))
}

// ── ContentType ───────────────────────────────────────────────────────────────

/// What a request's `content-type` header says about its body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType<'a> {
    Absent,
    Supported(MediaType),
    Unsupported(&'a str),
}

impl<'a> ContentType<'a> {
    /// Classifies a raw header value.
    ///
    /// Only the `type/subtype` part counts, compared case-insensitively;
    /// parameters such as `charset` are ignored.
    pub fn classify(header: Option<&'a str>) -> Self {
        let Some(value) = header else { return Self::Absent };
        let essence = value.split(';').next().unwrap_or_default().trim();
        MediaType::ALL
            .into_iter()
            .find(|m| m.essence().eq_ignore_ascii_case(essence))
            .map_or(Self::Unsupported(value), Self::Supported)
    }
}

// ── BodyParser ────────────────────────────────────────────────────────────────

/// Replaces a raw body with its parse when the request declares `media`.
///
/// Any other content type, or none, forwards the request untouched. A body
/// that an earlier stage already structured is never parsed again. A
/// malformed body fails the stage.
#[derive(Clone, Copy, Debug)]
pub struct BodyParser {
    media: MediaType,
}

impl BodyParser {
    pub fn new(media: MediaType) -> Self {
        Self { media }
    }

    pub fn json() -> Self { Self::new(MediaType::Json) }
    pub fn urlencoded() -> Self { Self::new(MediaType::UrlEncoded) }

    fn apply(&self, req: &mut Request) -> Result<(), Error> {
        match ContentType::classify(req.header(CONTENT_TYPE)) {
            ContentType::Supported(media) if media == self.media => {}
            ContentType::Unsupported(other) => {
                trace!(content_type = other, parser = %self.media, "unsupported content type, body left raw");
                return Ok(());
            }
            _ => return Ok(()),
        }

        let parsed = match req.body() {
            Body::Raw(raw) => self.media.parse(raw)?,
            _ => return Ok(()),
        };
        req.set_body(parsed);
        Ok(())
    }
}

impl Middleware for BodyParser {
    fn name(&self) -> &'static str {
        match self.media {
            MediaType::Json       => "json-body",
            MediaType::UrlEncoded => "urlencoded-body",
        }
    }

    fn handle<'a>(&'a self, mut req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
        Box::pin(async move {
            self.apply(&mut req)?;
            Ok::<_, Error>(next.run(req).await)
        })
    }
}
