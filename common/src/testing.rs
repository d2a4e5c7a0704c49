//! One-shot HTTP server for exercising the prediction client without a network.

use axum::http::{header, Method, StatusCode, Uri};
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct MockServer {
    url: String,
    request: oneshot::Receiver<String>,
}

impl MockServer {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Method and target of the first request served, e.g. `GET /api/predict?ticker=AAPL&model=xgb`.
    pub async fn request(self) -> String {
        self.request.await.unwrap_or_default()
    }
}

/// Answers every request with `status` and a JSON `body`, recording the first one.
/// The server lives until the test runtime shuts down.
pub async fn serve_json(status: u16, body: &str) -> MockServer {
    let status = StatusCode::from_u16(status).expect("Invalid mock status code");
    let body = body.to_string();
    let (tx, rx) = oneshot::channel();
    let recorder = Arc::new(Mutex::new(Some(tx)));

    let app = Router::new().fallback(move |method: Method, uri: Uri| {
        let recorder = recorder.clone();
        let body = body.clone();
        async move {
            if let Some(tx) = recorder.lock().expect("Recorder poisoned").take() {
                let _ = tx.send(format!("{method} {uri}"));
            }
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener
        .local_addr()
        .expect("Mock server has no local address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockServer {
        url: format!("http://{addr}"),
        request: rx,
    }
}

/// Base URL of a port nobody listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener
        .local_addr()
        .expect("Throwaway listener has no local address");
    drop(listener);

    format!("http://{addr}")
}

/// Client that ignores proxy settings from the environment.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build local client")
}
