// Outbound port for talking to the webhook.
//
// Purpose
// - Describe the one capability every contract case needs: send a request with a
//   per-request timeout and hand back status, content type and body untouched.
//
// Boundaries
// - No assertions here. Interpreting a reply is the job of the contract cases.
//
// Testing guidance
// - `in_memory` provides a simulated webhook so cases run without a network.

pub mod http;
pub mod in_memory;

use async_trait::async_trait;
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl WebhookReply {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn has_json_content_type(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|value| {
                value
                    .trim_start()
                    .to_ascii_lowercase()
                    .starts_with("application/json")
            })
            .unwrap_or(false)
    }
}

#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<WebhookReply, TransportError>;

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<WebhookReply, TransportError>;
}
