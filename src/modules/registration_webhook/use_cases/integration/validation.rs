use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::{body_preview, ensure, expect_status};
use crate::modules::registration_webhook::core::registration::{
    RegistrationRequest, unique_email,
};
use crate::modules::registration_webhook::core::response::WebhookResponse;
use crate::shared::core::primitives::{
    SPECIAL_CHARACTERS_HANDLED, UNAUTHORIZED, VALIDATION_REJECTED,
};
use crate::shell::config::ContractConfig;
use crate::shell::state::HarnessState;
use chrono::Utc;

pub const WRONG_PASSPHRASE: &str = "wrong_passphrase";
pub const SPECIAL_CHARACTERS: [char; 11] =
    ['\'', '"', '<', '>', '&', '\\', '/', '%', '\n', '\r', '\t'];

pub async fn invalid_passphrase(state: HarnessState) -> Result<(), ContractError> {
    let request = RegistrationRequest::new(unique_email("test"), "Test User", WRONG_PASSPHRASE)
        .with_timestamp(Utc::now());
    let reply = state.client.submit(&request).await?;
    expect_status(&reply, &UNAUTHORIZED, "wrong passphrase")?;

    let response = WebhookResponse::from_reply(&reply)?;
    ensure(!response.success, || {
        format!("expected `success: false`, got {}", body_preview(&reply))
    })?;
    let error = response.error_text();
    ensure(error.to_lowercase().contains("invalid"), || {
        format!("expected the error to mention `invalid`, got {error:?}")
    })
}

pub async fn missing_required_fields(state: HarnessState) -> Result<(), ContractError> {
    let passphrase = &state.config.passphrase;

    let without_email =
        RegistrationRequest::new("", "Test User", passphrase).without_email();
    let reply = state.client.submit(&without_email).await?;
    expect_status(&reply, &VALIDATION_REJECTED, "missing email")?;

    let without_name =
        RegistrationRequest::new("test@example.com", "", passphrase).without_name();
    let reply = state.client.submit(&without_name).await?;
    expect_status(&reply, &VALIDATION_REJECTED, "missing name")
}

pub async fn malformed_email(state: HarnessState) -> Result<(), ContractError> {
    let request = RegistrationRequest::new("not-an-email", "Test User", &state.config.passphrase);
    let reply = state.client.submit(&request).await?;
    expect_status(&reply, &VALIDATION_REJECTED, "malformed email")
}

pub async fn special_characters(state: HarnessState) -> Result<(), ContractError> {
    for character in SPECIAL_CHARACTERS {
        let request = RegistrationRequest::new(
            unique_email(&format!("test{character}user")),
            format!("Test{character}User"),
            &state.config.passphrase,
        );
        let reply = state.client.submit(&request).await?;
        expect_status(
            &reply,
            &SPECIAL_CHARACTERS_HANDLED,
            &format!("special character {character:?}"),
        )?;
    }
    Ok(())
}

pub fn special_characters_disabled(config: &ContractConfig) -> Option<String> {
    (!config.special_characters)
        .then(|| "special characters testing is disabled (enable with --special-characters)".into())
}
