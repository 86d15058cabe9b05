//! The echo service: its routes and the order of its chain.

use crate::app::App;
use crate::handlers::{echo, internal_error, not_found};
use crate::middleware::{BodyParser, CookieParser, Cors, Logger, RemoveHeader};
use crate::router::Router;

pub const ROOT_MESSAGE: &str = "Hello world, from /";
pub const API_MESSAGE: &str = "Hello world, from the API!";

/// Routes mounted under `/api`.
pub fn api() -> Router {
    Router::new().get("/echo", echo(API_MESSAGE))
}

/// Routes mounted under `/`.
pub fn root() -> Router {
    Router::new().get("/", echo(ROOT_MESSAGE))
}

/// The assembled service.
///
/// logger → CORS → `x-powered-by` removal → JSON body → url-encoded body →
/// cookies → `/api` routes → `/` routes, with [`not_found`] as fallback and
/// [`internal_error`] for every failure.
pub fn app() -> App {
    App::new()
        .with(Logger)
        .with(Cors)
        .with(RemoveHeader::powered_by())
        .with(BodyParser::json())
        .with(BodyParser::urlencoded())
        .with(CookieParser)
        .mount("/api", api())
        .mount("/", root())
        .fallback(not_found)
        .on_error(internal_error)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
    use http::{Method, StatusCode};

    use super::*;
    use crate::response::POWERED_BY;
    use crate::Response;

    const NOT_FOUND: &[u8] = br#"{"status":false,"message":"Not found"}"#;
    const INTERNAL: &[u8] = br#"{"status":false,"message":"Internal server error"}"#;

    fn request(method: Method, path: &str) -> http::Request<Bytes> {
        http::Request::builder().method(method).uri(path).body(Bytes::new()).unwrap()
    }

    fn assert_headers(res: &Response) {
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(!res.headers().contains_key(POWERED_BY));
    }

    #[tokio::test]
    async fn root_echo() {
        let res = app().oneshot(request(Method::GET, "/")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(&res.body()[..], br#"{"status":true,"message":"Hello world, from /"}"#);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
        assert_headers(&res);
    }

    #[tokio::test]
    async fn api_echo() {
        let res = app().oneshot(request(Method::GET, "/api/echo")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(&res.body()[..], br#"{"status":true,"message":"Hello world, from the API!"}"#);
        assert_headers(&res);
    }

    #[tokio::test]
    async fn everything_else_is_not_found() {
        let app = app();
        for (method, path) in [
            (Method::GET, "/echo"),
            (Method::GET, "/api"),
            (Method::GET, "/api/echo/"),
            (Method::GET, "/api/echo/extra"),
            (Method::POST, "/"),
            (Method::DELETE, "/api/echo"),
        ] {
            let res = app.oneshot(request(method.clone(), path)).await;

            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{method} {path}");
            assert_eq!(&res.body()[..], NOT_FOUND, "{method} {path}");
            assert_headers(&res);
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_internal_error() {
        for (content_type, body) in [
            ("application/json", &b"{\"unterminated"[..]),
            ("application/json; charset=utf-8", &b"[1,"[..]),
        ] {
            let req = http::Request::builder()
                .method(Method::POST)
                .uri("/api/echo")
                .header(CONTENT_TYPE, content_type)
                .body(Bytes::from_static(body))
                .unwrap();

            let res = app().oneshot(req).await;

            assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(&res.body()[..], INTERNAL);
            assert_headers(&res);
        }
    }

    #[tokio::test]
    async fn well_formed_body_and_cookies_do_not_change_the_echo() {
        let req = http::Request::builder()
            .uri("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("cookie", "session=abc")
            .body(Bytes::from_static(b"a=1&b=2"))
            .unwrap();

        let res = app().oneshot(req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(&res.body()[..], br#"{"status":true,"message":"Hello world, from /"}"#);
    }

    #[tokio::test]
    async fn repeated_requests_are_byte_identical() {
        let app = app();
        for path in ["/", "/api/echo", "/missing"] {
            let first = app.oneshot(request(Method::GET, path)).await;
            for _ in 0..5 {
                let again = app.oneshot(request(Method::GET, path)).await;
                assert_eq!(again.status(), first.status());
                assert_eq!(again.headers(), first.headers());
                assert_eq!(again.body(), first.body());
            }
        }
    }
}
