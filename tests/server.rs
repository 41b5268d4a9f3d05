//! The server over a real socket, speaking raw HTTP/1.1.

use std::net::SocketAddr;
use std::sync::Arc;

use quotes::{MemoryStore, QuotesApp, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

async fn start() -> (SocketAddr, oneshot::Sender<()>, JoinHandle<Result<(), quotes::Error>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let app = QuotesApp::router(Arc::new(MemoryStore::new()));
    let handle = tokio::spawn(async move {
        Server::from_listener(listener)
            .serve_with_shutdown(app, async move { let _ = rx.await; })
            .await
    });

    (addr, tx, handle)
}

/// Sends one request on a fresh connection and returns the raw response.
async fn send(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\n\
         host: localhost\r\n\
         x-forwarded-for: 203.0.113.5\r\n\
         content-type: application/json\r\n\
         content-length: {}\r\n\
         connection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or_default()
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response.lines()
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim())
}

fn body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default()
}

#[tokio::test]
async fn create_and_fetch_over_tcp() {
    let (addr, shutdown, handle) = start().await;

    let created = send(addr, "PUT", "/quotes", r#"{"AttributedTo":"Yoda","Text":"Do or do not."}"#).await;
    assert_eq!(status_line(&created), "HTTP/1.1 201 Created");
    let location = header(&created, "location").unwrap().to_owned();
    assert!(location.starts_with("/quotes/"));

    let fetched = send(addr, "GET", &location, "").await;
    assert_eq!(status_line(&fetched), "HTTP/1.1 200 OK");
    let quote: serde_json::Value = serde_json::from_str(body(&fetched)).unwrap();
    assert_eq!(quote["AttributedTo"], "Yoda");
    assert_eq!(quote["Text"], "Do or do not.");
    assert_eq!(format!("/quotes/{}", quote["ID"].as_str().unwrap()), location);

    let missing = send(addr, "GET", "/quotes/nope", "").await;
    assert_eq!(status_line(&missing), "HTTP/1.1 404 Not Found");
    assert_eq!(body(&missing), "");

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let (addr, shutdown, handle) = start().await;

    let res = send(addr, "GET", "/healthz", "").await;
    assert_eq!(status_line(&res), "HTTP/1.1 200 OK");

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
