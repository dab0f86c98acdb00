// reqwest implementation of the WebhookTransport port.

use crate::shared::infrastructure::transport::{TransportError, WebhookReply, WebhookTransport};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpWebhookTransport {
    client: Client,
}

impl HttpWebhookTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("webhook_contracts/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Backend(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<WebhookReply, TransportError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_error(e, timeout))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| map_error(e, timeout))?;
        Ok(WebhookReply {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<WebhookReply, TransportError> {
        tracing::trace!(url, "GET");
        self.execute(self.client.get(url), timeout).await
    }

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<WebhookReply, TransportError> {
        tracing::trace!(url, content_type, bytes = body.len(), "POST");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        self.execute(request, timeout).await
    }
}

fn map_error(error: reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Backend(error.to_string())
    }
}
