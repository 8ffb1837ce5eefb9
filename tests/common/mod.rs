//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use combined_data::config::ServiceConfig;
use combined_data::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const COMMENTS: &str = r#"[
    {"postId": 1, "id": 1, "name": "a", "body": "hi"},
    {"postId": 1, "id": 2, "name": "b", "body": "yo"},
    {"postId": 2, "id": 3, "name": "c", "body": "sup"}
]"#;

pub const POSTS: &str = r#"[
    {"userId": 10, "id": 1, "title": "Post One", "body": "..."}
]"#;

pub const USERS: &str = r#"[
    {"id": 10, "name": "Alice", "username": "alice", "email": "alice@example.com"}
]"#;

/// One canned upstream response.
#[derive(Clone)]
pub struct MockRoute {
    pub path: &'static str,
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockRoute {
    pub fn json(path: &'static str, body: &str) -> Self {
        Self {
            path,
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A mock upstream serving canned routes on an ephemeral port.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Total requests received across all routes.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn start_upstream(routes: Vec<MockRoute>) -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut router = Router::new();

    for route in routes {
        let hits = hits.clone();
        router = router.route(
            route.path,
            get(move || {
                let route = route.clone();
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(route.delay).await;
                    (
                        route.status,
                        [(header::CONTENT_TYPE, "application/json")],
                        route.body,
                    )
                }
            }),
        );
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    MockUpstream { addr, hits }
}

/// Upstream serving the three collections with the given bodies.
pub async fn start_collections(comments: &str, posts: &str, users: &str) -> MockUpstream {
    start_upstream(vec![
        MockRoute::json("/comments", comments),
        MockRoute::json("/posts", posts),
        MockRoute::json("/users", users),
    ])
    .await
}

/// Service configuration pointing at `upstream`'s three collections.
pub fn config_for(upstream: &MockUpstream) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.listen_port = 0;
    config.upstream.comments_url = upstream.url("/comments");
    config.upstream.posts_url = upstream.url("/posts");
    config.upstream.users_url = upstream.url("/users");
    config.timeouts.fetch_secs = 5;
    config
}

pub struct RunningService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<ServiceConfig>,
    pub handle: JoinHandle<()>,
}

impl RunningService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the service on an ephemeral port. The listener is bound before
/// returning, so requests can be sent immediately.
pub async fn start_service(config: ServiceConfig) -> RunningService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        let _ = server.run(listener, updates_rx, server_shutdown).await;
    });

    RunningService {
        addr,
        shutdown,
        config_updates,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
