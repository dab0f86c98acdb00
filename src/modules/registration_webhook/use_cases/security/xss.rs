use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::ensure;
use crate::modules::registration_webhook::core::registration::{
    RegistrationRequest, unique_email,
};
use crate::modules::registration_webhook::core::response::{WebhookResponse, echoes_script_tag};
use crate::shared::core::primitives::STATUS_OK;
use crate::shared::infrastructure::transport::WebhookReply;
use crate::shell::state::HarnessState;

pub const XSS_PAYLOADS: [&str; 4] = [
    "<script>alert('xss')</script>",
    "javascript:alert('xss')",
    "<img src=x onerror=alert('xss')>",
    "<svg onload=alert('xss')>",
];

/// Any status is acceptable. A 200, or any reply claiming `success: true`,
/// must not echo a literal script tag.
pub async fn xss(state: HarnessState) -> Result<(), ContractError> {
    for payload in XSS_PAYLOADS {
        let request =
            RegistrationRequest::new(unique_email("xss"), payload, &state.config.passphrase);
        let reply = state.client.submit(&request).await?;
        if reply.status != STATUS_OK && !claims_success(&reply) {
            tracing::debug!(status = reply.status, payload, "xss payload refused");
            continue;
        }
        ensure(!echoes_script_tag(&reply), || {
            format!("response to {payload:?} echoes an unescaped <script> tag")
        })?;
    }
    Ok(())
}

fn claims_success(reply: &WebhookReply) -> bool {
    WebhookResponse::from_reply(reply).is_ok_and(|response| response.success)
}

#[cfg(test)]
mod xss_tests {
    use super::*;
    use crate::shared::infrastructure::transport::{TransportError, WebhookTransport};
    use crate::tests::fixtures::harness::{compliant_webhook, fast_config, in_memory_state};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    /// Answers every submission with 201 and the raw name echoed back.
    struct CreatedEcho;

    #[async_trait]
    impl WebhookTransport for CreatedEcho {
        async fn get(&self, _url: &str, _timeout: Duration) -> Result<WebhookReply, TransportError> {
            Ok(WebhookReply::json(STATUS_OK, &json!({"status": "ok"})))
        }

        async fn post(
            &self,
            _url: &str,
            _content_type: &str,
            body: Vec<u8>,
            _timeout: Duration,
        ) -> Result<WebhookReply, TransportError> {
            let fields: Value = serde_json::from_slice(&body)
                .map_err(|e| TransportError::Backend(e.to_string()))?;
            let name = fields["name"].clone();
            Ok(WebhookReply::json(
                201,
                &json!({"success": true, "data": {"name": name}}),
            ))
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_pass_when_names_are_escaped() {
        assert_eq!(xss(in_memory_state(compliant_webhook())).await, Ok(()));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_a_script_tag_is_echoed() {
        let mut webhook = compliant_webhook();
        webhook.echo_raw_html();
        let result = xss(in_memory_state(webhook)).await;
        assert!(matches!(
            result,
            Err(ContractError::AssertionFailure(msg)) if msg.contains("<script>")
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_a_created_reply_echoes_a_script_tag() {
        let state = HarnessState::new(fast_config(), Arc::new(CreatedEcho));
        let result = xss(state).await;
        assert!(matches!(
            result,
            Err(ContractError::AssertionFailure(msg)) if msg.contains("<script>")
        ));
    }

    #[rstest]
    #[case(WebhookReply::json(201, &json!({"success": true, "data": {}})), true)]
    #[case(WebhookReply::json(429, &json!({"success": false, "error": "slow down"})), false)]
    #[case(WebhookReply { status: 200, content_type: None, body: b"OK".to_vec() }, false)]
    fn it_should_read_the_success_claim_from_the_body(
        #[case] reply: WebhookReply,
        #[case] expected: bool,
    ) {
        assert_eq!(claims_success(&reply), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_inspect_rejected_payloads() {
        let mut webhook = compliant_webhook();
        webhook.echo_raw_html();
        webhook.set_rate_limit(0, std::time::Duration::from_secs(60));
        assert_eq!(xss(in_memory_state(webhook)).await, Ok(()));
    }
}
