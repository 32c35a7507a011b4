//! Test transports and a one-shot local HTTP server. Each test builds its own; nothing here is global.

use std::net::SocketAddr;
use std::sync::Mutex;

use futures::future::{self, BoxFuture};
use http::{HeaderMap, Method};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::errors::TransportError;
use crate::net::{Request, Response, Transport};

struct Stub {
    method: Option<Method>,
    path: Option<String>,
    status: u16,
    body: Vec<u8>,
}

/// Answers requests from a list of stubs and records every request it sees.
///
/// Stubs are matched from the most recently added one backwards, so add the
/// least specific stub first.
#[derive(Default)]
pub(crate) struct StubTransport {
    stubs: Vec<Stub>,
    seen: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches any request.
    pub fn any(mut self, status: u16) -> Self {
        self.stubs.push(Stub { method: None, path: None, status, body: Vec::new() });
        self
    }

    /// Matches any method on `path`.
    pub fn path(mut self, path: &str, status: u16) -> Self {
        self.stubs.push(Stub { method: None, path: Some(path.into()), status, body: Vec::new() });
        self
    }

    /// Matches `method` on `path` and answers with `body`.
    pub fn route(mut self, method: Method, path: &str, status: u16, body: &[u8]) -> Self {
        self.stubs.push(Stub {
            method: Some(method),
            path: Some(path.into()),
            status,
            body: body.to_vec(),
        });
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }

    fn answer(&self, request: &Request) -> Result<Response, TransportError> {
        let stub = self
            .stubs
            .iter()
            .rev()
            .find(|s| {
                s.method.as_ref().map_or(true, |m| *m == request.method)
                    && s.path.as_deref().map_or(true, |p| p == request.url.path())
            })
            .ok_or_else(|| TransportError::Other(format!("no stub for {} {}", request.method, request.url)))?;

        Ok(Response::new(request.url.clone(), stub.status, HeaderMap::new(), stub.body.clone()))
    }
}

impl Transport for StubTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        let result = self.answer(&request);
        self.seen.lock().unwrap().push(request);
        Box::pin(future::ready(result))
    }
}

/// Fails every request with a connect error.
pub(crate) struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        Box::pin(future::ready(Err(TransportError::Connect {
            url: request.url,
            reason: "connection refused".into(),
        })))
    }
}

/// Never completes.
pub(crate) struct PendingTransport;

impl Transport for PendingTransport {
    fn send(&self, _request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        Box::pin(future::pending())
    }
}

/// Accepts one connection, reads a full request and answers with `reply_head` + `body`.
/// The join handle yields the raw request bytes.
pub(crate) async fn serve_once(reply_head: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }

        let reply = format!(
            "{reply_head}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(reply.as_bytes()).await.unwrap();
        let _ = sock.shutdown().await;
        buf
    });

    (addr, handle)
}
