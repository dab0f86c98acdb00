use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::{body_preview, ensure};
use crate::shared::infrastructure::transport::WebhookReply;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl WebhookResponse {
    pub fn from_reply(reply: &WebhookReply) -> Result<Self, ContractError> {
        serde_json::from_slice(&reply.body).map_err(|e| {
            ContractError::Decode(format!(
                "status {} body is not a webhook response ({e}): {}",
                reply.status,
                body_preview(reply)
            ))
        })
    }

    /// The `error` field as text, whatever JSON type the service chose.
    pub fn error_text(&self) -> String {
        match &self.error {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Full shape check: JSON content type, an object with a boolean `success`,
    /// `message` or `data` alongside success, `error` alongside failure.
    pub fn check_shape(reply: &WebhookReply) -> Result<Self, ContractError> {
        ensure(reply.has_json_content_type(), || {
            format!(
                "expected a JSON content type, got {:?}",
                reply.content_type.as_deref().unwrap_or("<none>")
            )
        })?;
        let value: Value = serde_json::from_slice(&reply.body)
            .map_err(|e| ContractError::Decode(format!("body is not JSON ({e})")))?;
        let Some(object) = value.as_object() else {
            return Err(ContractError::AssertionFailure(format!(
                "expected a JSON object, got {value}"
            )));
        };
        let Some(success) = object.get("success").and_then(Value::as_bool) else {
            return Err(ContractError::AssertionFailure(format!(
                "expected a boolean `success` field, got {}",
                object.get("success").map_or("nothing".to_string(), Value::to_string)
            )));
        };
        if success {
            ensure(
                object.contains_key("message") || object.contains_key("data"),
                || "successful response carries neither `message` nor `data`".to_string(),
            )?;
        } else {
            ensure(object.contains_key("error"), || {
                "failed response carries no `error`".to_string()
            })?;
        }
        Self::from_reply(reply)
    }
}

/// Whether the body, raw or JSON-decoded, contains a literal `<script>` tag.
pub fn echoes_script_tag(reply: &WebhookReply) -> bool {
    const TAG: &str = "<script>";
    if reply.body_text().contains(TAG) {
        return true;
    }
    serde_json::from_slice::<Value>(&reply.body)
        .map(|value| value.to_string().contains(TAG))
        .unwrap_or(false)
}
