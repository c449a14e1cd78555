//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::response::Response;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use edge_router::assets::{Asset, AssetResolver, AssetStore, MemoryStore, Origin};
use edge_router::config::EdgeConfig;
use edge_router::handlers::ApiPassthrough;
use edge_router::http::client::build_client;
use edge_router::{EdgeServer, EdgeState};

pub const SHELL: &str = "<!DOCTYPE html><html><body><div id=\"root\"></div></body></html>";
pub const APP_JS: &str = "console.log('app');";

/// Store holding the shell and one fingerprinted bundle.
pub fn spa_store() -> MemoryStore {
    MemoryStore::new()
        .with("index.html", Asset::new(SHELL))
        .with("assets/app.a1b2c3.js", Asset::new(APP_JS))
}

/// Build the full layered router around the given collaborators.
pub fn edge_router(
    config: EdgeConfig,
    store: Arc<dyn AssetStore>,
    origin: Option<Arc<dyn Origin>>,
) -> Router {
    let api = ApiPassthrough::new(
        config.api.upstream.as_deref(),
        build_client(),
        Duration::from_secs(config.api.timeout_secs),
        config.security.max_body_size,
    );
    let state = EdgeState::new(&config, AssetResolver::new(store, origin), api);
    EdgeServer::new(&config, state).router()
}

/// Router over [`spa_store`] with default config and no origin.
pub fn default_router() -> Router {
    edge_router(EdgeConfig::default(), Arc::new(spa_store()), None)
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub target: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Read one HTTP/1.1 request (head plus Content-Length body) off the socket.
async fn read_request(socket: &mut TcpStream) -> Option<SeenRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(SeenRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        410 => "Gone",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` maps each request to `(status, content_type, body)`.
pub async fn start_programmable_backend<F>(f: F) -> SocketAddr
where
    F: Fn(SeenRequest) -> (u16, &'static str, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, content_type, body) = f(request);
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            content_type,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Mock origin serving a fixed path → (content type, body) table; anything else is 404.
pub async fn start_mock_origin(files: &[(&'static str, &'static str, &'static str)]) -> SocketAddr {
    let files: HashMap<&'static str, (&'static str, &'static str)> = files
        .iter()
        .map(|(path, content_type, body)| (*path, (*content_type, *body)))
        .collect();
    start_programmable_backend(move |request| match files.get(request.target.as_str()) {
        Some((content_type, body)) => (200, content_type, body.to_string()),
        None => (404, "text/plain", "Not Found".to_string()),
    })
    .await
}

/// Accepts connections and never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Serve `router` on an ephemeral port; returns its address.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
