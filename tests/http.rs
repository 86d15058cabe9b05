//! End-to-end: the real server on an ephemeral port, spoken to over TCP.

use std::net::SocketAddr;
use std::time::Duration;

use echo_server::{Server, routes};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), echo_server::Error>>,
}

async fn start() -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = Server::from_listener(listener);
    let addr = server.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve_with_shutdown(routes::app(), async move {
        let _ = stopped.await;
    }));

    Running { addr, stop, handle }
}

/// Sends one HTTP/1.1 request with `Connection: close` and returns the raw
/// response text.
async fn exchange(addr: SocketAddr, head: &str, body: &str) -> String {
    let request = format!(
        "{head}\r\nhost: localhost\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    );
    send(addr, request.as_bytes()).await
}

/// Writes `request` verbatim and reads until the server closes the socket.
///
/// A reset after the response has been written counts as the end.
async fn send(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
            .await
            .expect("server kept the connection open");
        match read {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8(raw).unwrap()
}

fn split(raw: &str) -> (&str, &str) {
    raw.split_once("\r\n\r\n").unwrap()
}

#[tokio::test]
async fn serves_the_echo_routes_over_tcp() {
    let server = start().await;

    let raw = exchange(server.addr, "GET / HTTP/1.1", "").await;
    let (head, body) = split(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    assert_eq!(body, r#"{"status":true,"message":"Hello world, from /"}"#);

    let raw = exchange(server.addr, "GET /api/echo HTTP/1.1", "").await;
    let (head, body) = split(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    assert_eq!(body, r#"{"status":true,"message":"Hello world, from the API!"}"#);

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn error_responses_carry_cors_and_hide_the_framework() {
    let server = start().await;

    let raw = exchange(server.addr, "GET /nope HTTP/1.1", "").await;
    let (head, body) = split(&raw);
    let lower = head.to_ascii_lowercase();
    assert!(head.starts_with("HTTP/1.1 404"), "{head}");
    assert_eq!(body, r#"{"status":false,"message":"Not found"}"#);
    assert!(lower.contains("access-control-allow-origin: *"), "{head}");
    assert!(!lower.contains("x-powered-by"), "{head}");

    let raw = exchange(
        server.addr,
        "POST /api/echo HTTP/1.1\r\ncontent-type: application/json",
        "{broken",
    )
    .await;
    let (head, body) = split(&raw);
    let lower = head.to_ascii_lowercase();
    assert!(head.starts_with("HTTP/1.1 500"), "{head}");
    assert_eq!(body, r#"{"status":false,"message":"Internal server error"}"#);
    assert!(lower.contains("access-control-allow-origin: *"), "{head}");
    assert!(!lower.contains("x-powered-by"), "{head}");

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn unreadable_body_still_gets_cors_and_hides_the_framework() {
    let server = start().await;

    let raw = send(
        server.addr,
        b"POST / HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\
          transfer-encoding: chunked\r\n\r\nzz\r\nhello\r\n",
    )
    .await;
    let (head, body) = split(&raw);
    let lower = head.to_ascii_lowercase();
    assert!(head.starts_with("HTTP/1.1 500"), "{head}");
    assert_eq!(body, r#"{"status":false,"message":"Internal server error"}"#);
    assert!(lower.contains("access-control-allow-origin: *"), "{head}");
    assert!(lower.contains("access-control-allow-methods: *"), "{head}");
    assert!(!lower.contains("x-powered-by"), "{head}");

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}
