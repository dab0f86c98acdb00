use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::expect_status;
use crate::modules::registration_webhook::core::registration::RegistrationRequest;
use crate::shared::core::primitives::INJECTION_REJECTED;
use crate::shell::state::HarnessState;

pub const SQL_INJECTION_PAYLOADS: [&str; 4] = [
    "'; DROP TABLE users; --",
    "1' OR '1'='1",
    "admin'--",
    "' UNION SELECT * FROM users--",
];

pub async fn sql_injection(state: HarnessState) -> Result<(), ContractError> {
    for payload in SQL_INJECTION_PAYLOADS {
        let request = RegistrationRequest::new(
            format!("{payload}@example.com"),
            payload,
            &state.config.passphrase,
        );
        let reply = state.client.submit(&request).await?;
        expect_status(
            &reply,
            &INJECTION_REJECTED,
            &format!("injection payload {payload:?}"),
        )?;
    }
    Ok(())
}
