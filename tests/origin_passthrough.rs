//! Tests against live mock backends: origin fallback, API forwarding and
//! serving over a real socket with graceful shutdown.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, StatusCode};
use tower::ServiceExt;

use edge_router::assets::{HttpOrigin, MemoryStore, Origin};
use edge_router::config::EdgeConfig;
use edge_router::http::client::build_client;
use edge_router::http::response::X_EDGE_SOURCE;
use edge_router::lifecycle::{build_server, Shutdown};

mod common;
use common::{body_string, edge_router, get, spa_store, SeenRequest, SHELL};

fn http_origin(addr: std::net::SocketAddr, timeout: Duration) -> Arc<dyn Origin> {
    Arc::new(HttpOrigin::new(build_client(), &format!("http://{addr}"), timeout).unwrap())
}

#[tokio::test]
async fn store_miss_falls_through_to_origin() {
    let origin = common::start_mock_origin(&[
        ("/assets/late.js", "text/plain", "late()"),
        ("/index.html", "text/html", "<html>origin shell</html>"),
    ])
    .await;
    let router = edge_router(
        EdgeConfig::default(),
        Arc::new(MemoryStore::new()),
        Some(http_origin(origin, Duration::from_secs(2))),
    );

    let response = router.clone().oneshot(get("/assets/late.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_EDGE_SOURCE], "origin");
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/javascript");
    assert_eq!(body_string(response).await, "late()");

    let response = router.oneshot(get("/pricing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[X_EDGE_SOURCE], "origin");
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(body_string(response).await, "<html>origin shell</html>");
}

#[tokio::test]
async fn store_hit_never_contacts_origin() {
    let seen = Arc::new(Mutex::new(Vec::<SeenRequest>::new()));
    let log = seen.clone();
    let origin = common::start_programmable_backend(move |request| {
        log.lock().unwrap().push(request);
        (200, "text/html", "from origin".to_string())
    })
    .await;
    let router = edge_router(
        EdgeConfig::default(),
        Arc::new(spa_store()),
        Some(http_origin(origin, Duration::from_secs(2))),
    );

    let response = router.oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.headers()[X_EDGE_SOURCE], "store");
    assert_eq!(body_string(response).await, SHELL);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn origin_miss_and_error_are_404_for_assets() {
    let origin = common::start_programmable_backend(|request| {
        if request.target.starts_with("/assets/gone") {
            (410, "text/plain", "gone".to_string())
        } else {
            (500, "text/plain", "boom".to_string())
        }
    })
    .await;
    let router = edge_router(
        EdgeConfig::default(),
        Arc::new(MemoryStore::new()),
        Some(http_origin(origin, Duration::from_secs(2))),
    );

    for path in ["/assets/gone.png", "/assets/broken.css"] {
        let response = router.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn origin_timeout_degrades_shell_to_fallback_page() {
    let origin = common::start_silent_backend().await;
    let router = edge_router(
        EdgeConfig::default(),
        Arc::new(MemoryStore::new()),
        Some(http_origin(origin, Duration::from_millis(200))),
    );

    let response = router.oneshot(get("/servicios/civil")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert!(body_string(response).await.contains("window.location.reload()"));
}

#[tokio::test]
async fn request_deadline_renders_fallback_page_for_client_routes() {
    let origin = common::start_silent_backend().await;
    let mut config = EdgeConfig::default();
    config.timeouts.request_secs = 1;
    let router = edge_router(
        config,
        Arc::new(MemoryStore::new()),
        Some(http_origin(origin, Duration::from_secs(3))),
    );

    let started = std::time::Instant::now();
    let response = router.oneshot(get("/servicios/civil")).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert!(body_string(response).await.contains("window.location.reload()"));
}

#[tokio::test]
async fn request_deadline_on_api_route_is_bad_gateway() {
    let upstream = common::start_silent_backend().await;
    let mut config = EdgeConfig::default();
    config.api.upstream = Some(format!("http://{upstream}"));
    config.api.timeout_secs = 5;
    config.timeouts.request_secs = 1;
    let router = edge_router(config, Arc::new(spa_store()), None);

    let response = router.oneshot(get("/api/slow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(response).await, r#"{"error":"Bad Gateway"}"#);
}

#[tokio::test]
async fn api_requests_are_forwarded_unchanged() {
    let seen = Arc::new(Mutex::new(Vec::<SeenRequest>::new()));
    let log = seen.clone();
    let upstream = common::start_programmable_backend(move |request| {
        log.lock().unwrap().push(request);
        (201, "application/json", r#"{"id":7}"#.to_string())
    })
    .await;

    let mut config = EdgeConfig::default();
    config.api.upstream = Some(format!("http://{upstream}"));
    let router = edge_router(config, Arc::new(spa_store()), None);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/consultations?area=penal")
        .header(header::CONTENT_TYPE, "application/json")
        .header("authorization", "Bearer t0ken")
        .header("connection", "keep-alive")
        .body(axum::body::Body::from(r#"{"name":"Ana"}"#))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_string(response).await, r#"{"id":7}"#);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let forwarded = &seen[0];
    assert_eq!(forwarded.method, "POST");
    assert_eq!(forwarded.target, "/api/consultations?area=penal");
    assert_eq!(forwarded.body, r#"{"name":"Ana"}"#);
    assert_eq!(forwarded.headers["authorization"], "Bearer t0ken");
    assert_eq!(forwarded.headers["host"], upstream.to_string());
}

#[tokio::test]
async fn unreachable_api_upstream_is_bad_gateway() {
    let upstream = common::start_silent_backend().await;
    let mut config = EdgeConfig::default();
    config.api.upstream = Some(format!("http://{upstream}"));
    config.api.timeout_secs = 1;
    let router = edge_router(config, Arc::new(spa_store()), None);

    let response = router.oneshot(get("/api/slow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(response).await, r#"{"error":"Bad Gateway"}"#);
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), SHELL).unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets").join("site.css"), "body{}").unwrap();

    let mut config = EdgeConfig::default();
    config.assets.dir = Some(dir.path().display().to_string());
    let server = build_server(config).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = common::client();
    let res = client
        .get(format!("http://{addr}/assets/site.css"))
        .send()
        .await
        .expect("edge router unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/css");
    assert_eq!(res.text().await.unwrap(), "body{}");

    let res = client
        .get(format!("http://{addr}/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), SHELL);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
