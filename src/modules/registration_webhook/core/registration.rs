use crate::modules::registration_webhook::core::errors::ContractError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A form submission as the webhook receives it.
///
/// `email` and `name` are optional only so that validation cases can omit them.
/// Unknown keys such as `extra_data` or `test_mode` travel in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub passphrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistrationRequest {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            name: Some(name.into()),
            passphrase: passphrase.into(),
            ..Self::default()
        }
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at.format(TIMESTAMP_FORMAT).to_string());
        self
    }

    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = Some(form_id.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn without_email(mut self) -> Self {
        self.email = None;
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    /// Local sanity check on a generated payload: both required fields present,
    /// a passphrase, and an email with `@` and a dotted domain.
    pub fn has_well_formed_shape(&self) -> bool {
        let email_ok = self
            .email
            .as_deref()
            .and_then(|email| email.split_once('@'))
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        let name_ok = self.name.as_deref().is_some_and(|name| !name.trim().is_empty());
        email_ok && name_ok && !self.passphrase.is_empty()
    }

    fn text_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::with_capacity(3);
        if let Some(email) = self.email.as_deref() {
            fields.push(("email", email));
        }
        if let Some(name) = self.name.as_deref() {
            fields.push(("name", name));
        }
        fields.push(("passphrase", self.passphrase.as_str()));
        fields
    }
}

/// `{prefix}-{uuid}@example.com`, unique per call so reruns do not collide
/// with earlier registrations.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::now_v7().simple())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Json,
    FormUrlEncoded,
    PlainText,
    Xml,
}

impl PayloadEncoding {
    pub const ALTERNATES: [PayloadEncoding; 3] = [
        PayloadEncoding::FormUrlEncoded,
        PayloadEncoding::PlainText,
        PayloadEncoding::Xml,
    ];

    pub fn content_type(&self) -> &'static str {
        match self {
            PayloadEncoding::Json => "application/json",
            PayloadEncoding::FormUrlEncoded => "application/x-www-form-urlencoded",
            PayloadEncoding::PlainText => "text/plain",
            PayloadEncoding::Xml => "application/xml",
        }
    }

    pub fn encode(&self, request: &RegistrationRequest) -> Result<Vec<u8>, ContractError> {
        match self {
            PayloadEncoding::Json => serde_json::to_vec(request)
                .map_err(|e| ContractError::Decode(format!("cannot encode payload: {e}"))),
            PayloadEncoding::FormUrlEncoded => Ok(form_urlencoded(request).into_bytes()),
            PayloadEncoding::PlainText => Ok(request
                .text_fields()
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("\n")
                .into_bytes()),
            PayloadEncoding::Xml => Ok(xml(request).into_bytes()),
        }
    }
}

fn form_urlencoded(request: &RegistrationRequest) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in request.text_fields() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn xml(request: &RegistrationRequest) -> String {
    let mut document = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?><registration>");
    for (key, value) in request.text_fields() {
        document.push_str(&format!("<{key}>{}</{key}>", escape_xml(value)));
    }
    document.push_str("</registration>");
    document
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod registration_request_tests {
    use super::*;
    use crate::tests::fixtures::registration_request::RegistrationRequestBuilder;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn it_should_serialize_the_wire_shape_with_optional_fields() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 5).unwrap();
        let request = RegistrationRequest::new("test@example.com", "Test User", "spse2025")
            .with_timestamp(at)
            .with_form_id("test-form-001");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "test@example.com",
                "name": "Test User",
                "passphrase": "spse2025",
                "timestamp": "2025-03-01T12:30:05Z",
                "formId": "test-form-001",
            })
        );
    }

    #[rstest]
    fn it_should_omit_removed_fields_and_flatten_extras() {
        let request = RegistrationRequestBuilder::new()
            .build()
            .without_email()
            .with_extra("test_mode", "slow");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("email").is_none());
        assert_eq!(value["test_mode"], json!("slow"));
    }

    #[rstest]
    #[case(RegistrationRequest::new("test@example.com", "Test User", "p"), true)]
    #[case(RegistrationRequest::new("not-an-email", "Test User", "p"), false)]
    #[case(RegistrationRequest::new("test@localhost", "Test User", "p"), false)]
    #[case(RegistrationRequest::new("test@example.com", "  ", "p"), false)]
    #[case(RegistrationRequest::new("test@example.com", "Test User", ""), false)]
    #[case(RegistrationRequest::new("test@example.com", "Test User", "p").without_name(), false)]
    fn it_should_judge_payload_shape(#[case] request: RegistrationRequest, #[case] expected: bool) {
        assert_eq!(request.has_well_formed_shape(), expected);
    }

    #[rstest]
    fn it_should_generate_distinct_emails() {
        let first = unique_email("concurrent-0");
        let second = unique_email("concurrent-0");
        assert_ne!(first, second);
        assert!(first.starts_with("concurrent-0-"));
        assert!(first.ends_with("@example.com"));
    }

    #[rstest]
    fn it_should_encode_as_form_data() {
        let request = RegistrationRequest::new("test@example.com", "Test User", "spse2025");
        let body = PayloadEncoding::FormUrlEncoded.encode(&request).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "email=test%40example.com&name=Test+User&passphrase=spse2025"
        );
    }

    #[rstest]
    fn it_should_encode_as_plain_text() {
        let request = RegistrationRequest::new("test@example.com", "Test", "spse2025");
        let body = PayloadEncoding::PlainText.encode(&request).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "email=test@example.com\nname=Test\npassphrase=spse2025"
        );
    }

    #[rstest]
    fn it_should_encode_as_escaped_xml() {
        let request = RegistrationRequest::new("test@example.com", "A & <B>", "spse2025");
        let body = String::from_utf8(PayloadEncoding::Xml.encode(&request).unwrap()).unwrap();
        assert!(body.contains("<name>A &amp; &lt;B&gt;</name>"));
        assert!(body.ends_with("</registration>"));
    }
}
