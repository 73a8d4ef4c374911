//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `catalog`: A small storefront catalog covering audio, lighting and accessories
//! - `catalog_state`: `CatalogState` over that catalog, with an unreachable backend
//!
//! # Stub Backend
//!
//! [`StubBackend`] is a minimal HTTP/1.1 server on a random local port. It answers
//! every request with one canned status and body, and records what it received so
//! tests can assert on the outgoing method, path and JSON body.

use rstest::fixture;
use std::sync::{Arc, Mutex};
use storefront_search::{
    Catalog, CatalogState, Config, Product, SearchClient, StaticSessionId,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Session id used by every test client.
#[allow(dead_code)] // Used across different integration test crates
pub const TEST_SESSION: &str = "session_test_1";

/// Builds a product with the fields most tests care about.
#[allow(dead_code)] // Used across different integration test crates
pub fn product(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    price: f64,
    stock: i64,
    rating: Option<f64>,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        slug: None,
        description: Some(description.to_string()),
        category_id: Some(category.to_string()),
        price,
        inventory_count: stock,
        rating,
    }
}

/// A small catalog with overlapping names so ranking and filters are observable.
#[fixture]
#[allow(dead_code)] // Used across different integration test crates
pub fn catalog() -> Vec<Product> {
    vec![
        product(
            "prod_001",
            "Wireless Headphones",
            "Over-ear headphones with active noise cancelling",
            "audio",
            149.99,
            12,
            Some(4.6),
        ),
        product(
            "prod_002",
            "Wired Headphones",
            "Studio headphones with a detachable cable",
            "audio",
            79.0,
            0,
            Some(4.1),
        ),
        product(
            "prod_003",
            "Wireless Earbuds",
            "Compact earbuds with charging case",
            "audio",
            99.0,
            30,
            Some(3.8),
        ),
        product(
            "prod_004",
            "Desk Lamp",
            "Dimmable LED lamp for the home office",
            "lighting",
            35.5,
            8,
            None,
        ),
        product(
            "prod_005",
            "Headphone Stand",
            "Aluminium stand for over-ear headphones",
            "accessories",
            24.0,
            5,
            Some(4.9),
        ),
        product(
            "prod_006",
            "USB-C Cable",
            "Braided charging cable, 2m",
            "accessories",
            12.0,
            100,
            Some(4.3),
        ),
    ]
}

/// Client pointed at `base_url` with a fixed session id.
#[allow(dead_code)] // Used across different integration test crates
pub fn client(base_url: &str) -> SearchClient {
    SearchClient::with_session(base_url, Arc::new(StaticSessionId(TEST_SESSION.to_string())))
        .expect("valid base url")
}

/// A local address with nothing listening on it.
#[allow(dead_code)] // Used across different integration test crates
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// `CatalogState` over the fixture catalog with an unreachable backend.
#[fixture]
#[allow(dead_code)] // Used across different integration test crates
pub fn catalog_state(catalog: Vec<Product>) -> Arc<CatalogState> {
    // Port 9 (discard) on localhost is never served in CI containers
    let config = Config {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };
    Arc::new(CatalogState::new(
        Catalog::new(catalog),
        config.clone(),
        client(&config.api_base_url),
    ))
}

/// A request received by the [`StubBackend`].
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used across different integration test crates
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string, e.g. `/api/search/suggestions?q=la&limit=5`
    pub target: String,
    pub body: String,
}

#[allow(dead_code)] // Used across different integration test crates
impl RecordedRequest {
    /// Parse the body as JSON.
    ///
    /// # Panics
    /// Panics if the body is not valid JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Request body is not JSON ({}): {}", e, self.body))
    }
}

/// Canned-response HTTP server for exercising [`SearchClient`].
#[allow(dead_code)] // Used across different integration test crates
pub struct StubBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)] // Used across different integration test crates
impl StubBackend {
    /// Start a backend that answers every request with `status` and a JSON `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let recorded = recorded.clone();
                let body = body.clone();
                tokio::spawn(async move {
                    serve_one(socket, status, &body, &recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

async fn serve_one(
    mut socket: TcpStream,
    status: u16,
    body: &str,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    if let Some(request) = read_request(&mut socket).await {
        recorded.lock().expect("request log poisoned").push(request);
    }

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Read one HTTP/1.1 request: headers, then `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).into_owned();

    Some(RecordedRequest {
        method,
        target,
        body,
    })
}
