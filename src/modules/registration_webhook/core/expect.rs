use crate::modules::registration_webhook::core::errors::ContractError;
use crate::shared::core::primitives::StatusSet;
use crate::shared::infrastructure::transport::WebhookReply;

const PREVIEW_CHARS: usize = 200;

pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ContractError> {
    if condition {
        Ok(())
    } else {
        Err(ContractError::AssertionFailure(message()))
    }
}

pub fn expect_status(
    reply: &WebhookReply,
    accepted: &StatusSet,
    context: &str,
) -> Result<(), ContractError> {
    ensure(accepted.contains(reply.status), || {
        format!(
            "{context}: expected status in {accepted}, got {} (body: {})",
            reply.status,
            body_preview(reply)
        )
    })
}

/// First few hundred characters of the body, for failure messages.
pub fn body_preview(reply: &WebhookReply) -> String {
    let text = reply.body_text();
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod expect_tests {
    use super::*;
    use crate::shared::core::primitives::VALIDATION_REJECTED;
    use rstest::rstest;

    fn reply(status: u16, body: &str) -> WebhookReply {
        WebhookReply {
            status,
            content_type: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[rstest]
    fn it_should_pass_when_the_status_is_accepted() {
        assert!(expect_status(&reply(500, ""), &VALIDATION_REJECTED, "missing email").is_ok());
    }

    #[rstest]
    fn it_should_name_the_context_and_status_on_failure() {
        let result = expect_status(&reply(200, "{}"), &VALIDATION_REJECTED, "missing email");
        assert_eq!(
            result,
            Err(ContractError::AssertionFailure(
                "missing email: expected status in {400, 500}, got 200 (body: {})".into()
            ))
        );
    }

    #[rstest]
    fn it_should_truncate_long_bodies() {
        let long = "x".repeat(500);
        let preview = body_preview(&reply(200, &long));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }
}
