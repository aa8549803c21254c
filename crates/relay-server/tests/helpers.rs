//! Test helpers for end-to-end tests.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use relay_contacts::RecipientId;
use relay_line::SignatureVerifier;
use relay_server::{RelayConfig, RelayServer};

/// Default test timeout.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Channel secret shared by the relay and the test client.
pub const CHANNEL_SECRET: &str = "e2e-channel-secret";

/// Administrator used by every test relay.
pub const ADMIN: &str = "U_admin";

/// One request received by the fake Messaging API.
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub path: String,
    pub body: serde_json::Value,
}

#[derive(Clone, Default)]
struct FakeApiState {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    failing: Arc<HashSet<String>>,
}

async fn record(
    State(api): State<FakeApiState>,
    uri: axum::http::Uri,
    body: String,
) -> StatusCode {
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    let target = body["to"].as_str().unwrap_or_default().to_string();
    api.calls.lock().unwrap().push(ApiCall {
        path: uri.path().to_string(),
        body,
    });

    if api.failing.contains(&target) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

/// A fake LINE Messaging API on a local port.
pub struct FakeLineApi {
    pub base_url: String,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

impl FakeLineApi {
    /// Start a fake API; pushes to `failing` recipients answer 500.
    pub async fn start(failing: &[&str]) -> Self {
        let state = FakeApiState {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(failing.iter().map(|s| (*s).to_string()).collect()),
        };
        let calls = state.calls.clone();

        let app = Router::new()
            .route("/v2/bot/message/push", post(record))
            .route("/v2/bot/message/reply", post(record))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
        }
    }

    /// Calls received so far on `path`.
    pub fn calls_to(&self, path: &str) -> Vec<ApiCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .cloned()
            .collect()
    }
}

/// Find an available port for testing.
pub async fn find_available_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// A relay server running on a local port.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub server: RelayServer,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestRelay {
    /// Start a registry-mode relay talking to `api`.
    pub async fn start(api: &FakeLineApi) -> Self {
        let port = find_available_port().await;
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let config = RelayConfig::new(CHANNEL_SECRET, "e2e-token", RecipientId::new(ADMIN))
            .with_bind_addr(addr)
            .with_api_base_url(api.base_url.clone())
            .with_request_timeout(Duration::from_secs(2));

        let server = RelayServer::from_config(&config).unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let background = server.clone();
        tokio::spawn(async move {
            let _ = background
                .serve_with_shutdown(addr, async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        wait_until_listening(addr).await;

        Self {
            addr,
            server,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// URL for `path` on this relay.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Post a correctly signed webhook body.
    pub async fn post_signed_webhook(&self, body: &str) -> reqwest::Response {
        let signature = SignatureVerifier::new(CHANNEL_SECRET)
            .sign(body.as_bytes())
            .unwrap();
        self.post_webhook(body, &signature).await
    }

    /// Post a webhook body with the given signature header.
    pub async fn post_webhook(&self, body: &str, signature: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.url("/callback"))
            .header("X-Line-Signature", signature)
            .header("content-type", "application/json")
            .body(body.to_string())
            .timeout(TEST_TIMEOUT)
            .send()
            .await
            .unwrap()
    }

    /// Post an alert body.
    pub async fn post_alert(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.url("/alert"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .timeout(TEST_TIMEOUT)
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn wait_until_listening(addr: SocketAddr) {
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    while tokio::net::TcpStream::connect(addr).await.is_err() {
        assert!(tokio::time::Instant::now() < deadline, "relay did not start on {addr}");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// A webhook body with one text message event.
pub fn text_message_webhook(sender: &str, text: &str, reply_token: &str) -> String {
    serde_json::json!({
        "destination": "Ubot",
        "events": [{
            "type": "message",
            "mode": "active",
            "timestamp": 1_700_000_000_000_u64,
            "replyToken": reply_token,
            "source": {"type": "user", "userId": sender},
            "message": {"id": "1", "type": "text", "text": text}
        }]
    })
    .to_string()
}

/// A well-formed LINE user ID built from one repeated character.
pub fn user_id(fill: char) -> String {
    format!("U{}", fill.to_string().repeat(32))
}
