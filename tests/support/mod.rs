// Serves the simulated webhook over axum so the contract suite can be driven
// through a real HTTP stack.
//
// - `router` exposes the health endpoint and the webhook route.
// - `RouterTransport` calls the router in-process with tower's `oneshot`.
// - `serve` binds the router to an ephemeral local port.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request};
use axum::response::Response;
use axum::routing::{get, post};
use http_body_util::BodyExt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use webhook_contracts::shared::infrastructure::transport::in_memory::InMemoryWebhook;
use webhook_contracts::shared::infrastructure::transport::{
    TransportError, WebhookReply, WebhookTransport,
};
use webhook_contracts::shell::config::ContractConfig;

pub const PASSPHRASE: &str = "spse2025";

pub fn router(webhook: Arc<InMemoryWebhook>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/webhook/{name}", post(submit))
        .layer(TraceLayer::new_for_http())
        .with_state(webhook)
}

async fn health(State(webhook): State<Arc<InMemoryWebhook>>) -> Response {
    into_response(webhook.handle_health().await)
}

async fn submit(
    State(webhook): State<Arc<InMemoryWebhook>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    into_response(webhook.handle_submission(content_type, &body).await)
}

fn into_response(reply: WebhookReply) -> Response {
    let mut builder = Response::builder().status(reply.status);
    if let Some(content_type) = reply.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder
        .body(Body::from(reply.body))
        .expect("simulator replies are valid responses")
}

/// A webhook that honours the contract and throttles after 40 submissions a
/// minute, which only the rate limiting burst reaches.
pub fn contract_webhook() -> InMemoryWebhook {
    let mut webhook = InMemoryWebhook::new(PASSPHRASE);
    webhook.set_rate_limit(40, Duration::from_secs(60));
    webhook.set_slow_mode_delay(Duration::from_secs(1));
    webhook
}

pub fn contract_config(base_url: &str) -> ContractConfig {
    ContractConfig {
        webhook_url: format!("{base_url}/webhook/google-forms-webhook"),
        service_url: base_url.to_string(),
        short_timeout: Duration::from_millis(200),
        probe_attempts: 5,
        probe_interval: Duration::from_millis(10),
        idempotency_delay: Duration::from_millis(10),
        special_characters: true,
        ..ContractConfig::default()
    }
}

#[derive(Clone)]
pub struct RouterTransport {
    router: Router,
}

impl RouterTransport {
    pub fn new(webhook: Arc<InMemoryWebhook>) -> Self {
        Self {
            router: router(webhook),
        }
    }

    async fn call(
        &self,
        request: Request<Body>,
        timeout: Duration,
    ) -> Result<WebhookReply, TransportError> {
        let exchange = async {
            let response = self
                .router
                .clone()
                .oneshot(request)
                .await
                .map_err(|e| TransportError::Backend(e.to_string()))?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| TransportError::Backend(e.to_string()))?
                .to_bytes();
            Ok::<_, TransportError>(WebhookReply {
                status,
                content_type,
                body: body.to_vec(),
            })
        };
        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| TransportError::Timeout(timeout))?
    }
}

fn path_of(url: &str) -> Result<String, TransportError> {
    url::Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .map_err(|e| TransportError::Backend(format!("invalid url {url}: {e}")))
}

#[async_trait]
impl WebhookTransport for RouterTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<WebhookReply, TransportError> {
        let request = Request::get(path_of(url)?)
            .body(Body::empty())
            .map_err(|e| TransportError::Backend(e.to_string()))?;
        self.call(request, timeout).await
    }

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<WebhookReply, TransportError> {
        let request = Request::post(path_of(url)?)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .map_err(|e| TransportError::Backend(e.to_string()))?;
        self.call(request, timeout).await
    }
}

/// Serve the router on an ephemeral local port and return its base URL.
pub async fn serve(webhook: Arc<InMemoryWebhook>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind an ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, router(webhook))
            .await
            .expect("simulated webhook server");
    });
    format!("http://{addr}")
}
