use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::registration::{
    PayloadEncoding, RegistrationRequest,
};
use crate::shared::infrastructure::transport::{WebhookReply, WebhookTransport};
use std::sync::Arc;
use std::time::Duration;

/// Sends registrations and health polls to the configured endpoints.
#[derive(Clone)]
pub struct WebhookClient {
    transport: Arc<dyn WebhookTransport>,
    webhook_url: String,
    health_url: String,
    request_timeout: Duration,
}

impl WebhookClient {
    pub fn new(
        transport: Arc<dyn WebhookTransport>,
        webhook_url: impl Into<String>,
        health_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            webhook_url: webhook_url.into(),
            health_url: health_url.into(),
            request_timeout,
        }
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    pub async fn submit(&self, request: &RegistrationRequest) -> Result<WebhookReply, ContractError> {
        self.send(request, PayloadEncoding::Json, self.request_timeout)
            .await
    }

    pub async fn submit_with_timeout(
        &self,
        request: &RegistrationRequest,
        timeout: Duration,
    ) -> Result<WebhookReply, ContractError> {
        self.send(request, PayloadEncoding::Json, timeout).await
    }

    pub async fn submit_encoded(
        &self,
        request: &RegistrationRequest,
        encoding: PayloadEncoding,
    ) -> Result<WebhookReply, ContractError> {
        self.send(request, encoding, self.request_timeout).await
    }

    pub async fn health(&self, timeout: Duration) -> Result<WebhookReply, ContractError> {
        let reply = self.transport.get(&self.health_url, timeout).await?;
        tracing::trace!(url = %self.health_url, status = reply.status, "health reply");
        Ok(reply)
    }

    async fn send(
        &self,
        request: &RegistrationRequest,
        encoding: PayloadEncoding,
        timeout: Duration,
    ) -> Result<WebhookReply, ContractError> {
        let body = encoding.encode(request)?;
        tracing::debug!(
            content_type = encoding.content_type(),
            bytes = body.len(),
            ?timeout,
            "submitting registration"
        );
        let reply = self
            .transport
            .post(&self.webhook_url, encoding.content_type(), body, timeout)
            .await?;
        tracing::debug!(status = reply.status, "webhook replied");
        Ok(reply)
    }
}
