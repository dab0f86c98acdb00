// Shared test fixture for the RegistrationRequest payload, backed by a JSON file
// so the canonical payload reads the same as it does on the wire.

use crate::modules::registration_webhook::core::registration::RegistrationRequest;
use std::fs;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/tests/fixtures/json/registration_request.json"
);

pub struct RegistrationRequestBuilder {
    inner: RegistrationRequest,
}

impl Default for RegistrationRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RegistrationRequestBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string(FIXTURE).unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = Some(v.into());
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = Some(v.into());
        self
    }

    pub fn passphrase(mut self, v: impl Into<String>) -> Self {
        self.inner.passphrase = v.into();
        self
    }

    pub fn build(self) -> RegistrationRequest {
        self.inner
    }
}

#[cfg(test)]
mod registration_request_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = RegistrationRequestBuilder::default().build();
        assert_eq!(built.email.as_deref(), Some("test@example.com"));
        assert_eq!(built.name.as_deref(), Some("Test User"));
        assert_eq!(built.passphrase, "spse2025");
        assert_eq!(built.form_id.as_deref(), Some("test-form-001"));
        assert!(built.timestamp.is_none());
        assert!(built.extra.is_empty());
    }

    #[rstest]
    fn setters_override_fields() {
        let custom = RegistrationRequestBuilder::new()
            .email("other@example.org")
            .name("Other")
            .passphrase("wrong")
            .build();
        assert_eq!(custom.email.as_deref(), Some("other@example.org"));
        assert_eq!(custom.name.as_deref(), Some("Other"));
        assert_eq!(custom.passphrase, "wrong");
    }
}
