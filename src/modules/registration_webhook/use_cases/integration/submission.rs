use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::{body_preview, ensure, expect_status};
use crate::modules::registration_webhook::core::registration::{
    RegistrationRequest, unique_email,
};
use crate::modules::registration_webhook::core::response::WebhookResponse;
use crate::shared::core::primitives::{ACCEPTED, DUPLICATE_HANDLED, PROCESSED_OR_UNAUTHORIZED};
use crate::shell::state::HarnessState;
use chrono::Utc;

pub const TEST_FORM_ID: &str = "test-form-001";

pub async fn valid_submission(state: HarnessState) -> Result<(), ContractError> {
    let request =
        RegistrationRequest::new(unique_email("test"), "Test User", &state.config.passphrase)
            .with_timestamp(Utc::now())
            .with_form_id(TEST_FORM_ID);
    ensure(request.has_well_formed_shape(), || {
        format!("generated payload is not well formed: {request:?}")
    })?;

    let reply = state.client.submit(&request).await?;
    expect_status(&reply, &ACCEPTED, "valid submission")?;
    let response = WebhookResponse::from_reply(&reply)?;
    ensure(response.success, || {
        format!("expected `success: true`, got {}", body_preview(&reply))
    })
}

pub async fn oversized_payload(state: HarnessState) -> Result<(), ContractError> {
    let request =
        RegistrationRequest::new(unique_email("oversized"), "Test User", &state.config.passphrase)
            .with_extra("extra_data", "x".repeat(state.config.oversized_bytes));
    let reply = state.client.submit(&request).await?;
    expect_status(&reply, &PROCESSED_OR_UNAUTHORIZED, "oversized payload")
}

pub async fn response_shape(state: HarnessState) -> Result<(), ContractError> {
    let request = RegistrationRequest::new(
        unique_email("format-test"),
        "Format Test",
        &state.config.passphrase,
    );
    let reply = state.client.submit(&request).await?;
    WebhookResponse::check_shape(&reply).map(|_| ())
}

pub async fn idempotency(state: HarnessState) -> Result<(), ContractError> {
    let request = RegistrationRequest::new(
        unique_email("idempotent"),
        "Idempotent User",
        &state.config.passphrase,
    );

    let first = state.client.submit(&request).await?;
    tokio::time::sleep(state.config.idempotency_delay).await;
    let second = state.client.submit(&request).await?;

    expect_status(&first, &ACCEPTED, "first submission")?;
    expect_status(&second, &DUPLICATE_HANDLED, "repeated submission")
}
