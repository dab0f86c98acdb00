use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::{ensure, expect_status};
use crate::modules::registration_webhook::core::registration::{
    PayloadEncoding, RegistrationRequest, unique_email,
};
use crate::modules::registration_webhook::runner::execute::panic_to_error;
use crate::shared::core::primitives::{
    CONCURRENT_RESOLVED, CONTENT_TYPE_HANDLED, PROCESSED_OR_UNAUTHORIZED,
};
use crate::shell::state::HarnessState;
use tokio::task::JoinSet;

pub async fn content_types(state: HarnessState) -> Result<(), ContractError> {
    let request = RegistrationRequest::new("test@example.com", "Test", &state.config.passphrase);
    for encoding in PayloadEncoding::ALTERNATES {
        let reply = state.client.submit_encoded(&request, encoding).await?;
        expect_status(&reply, &CONTENT_TYPE_HANDLED, encoding.content_type())?;
    }
    Ok(())
}

/// Fire `concurrency` distinct submissions at once, one task each, and require
/// every one of them to resolve to a known status.
pub async fn concurrent_submissions(state: HarnessState) -> Result<(), ContractError> {
    let expected = state.config.concurrency;
    let mut workers = JoinSet::new();

    for index in 0..expected {
        let client = state.client.clone();
        let request = RegistrationRequest::new(
            unique_email(&format!("concurrent-{index}")),
            format!("Concurrent User {index}"),
            &state.config.passphrase,
        );
        workers.spawn(async move {
            let reply = client.submit(&request).await?;
            Ok::<_, ContractError>((index, reply))
        });
    }

    let mut resolved = Vec::with_capacity(expected);
    while let Some(joined) = workers.join_next().await {
        let (index, reply) = joined.map_err(panic_to_error)??;
        tracing::debug!(index, status = reply.status, "concurrent submission resolved");
        expect_status(
            &reply,
            &CONCURRENT_RESOLVED,
            &format!("concurrent submission {index}"),
        )?;
        resolved.push(index);
    }

    ensure(resolved.len() == expected, || {
        format!("expected {expected} responses, received {}", resolved.len())
    })
}

pub async fn timeout_tolerance(state: HarnessState) -> Result<(), ContractError> {
    let request = RegistrationRequest::new(
        unique_email("timeout-test"),
        "Timeout Test",
        &state.config.passphrase,
    )
    .with_extra("test_mode", "slow");

    match state
        .client
        .submit_with_timeout(&request, state.config.short_timeout)
        .await
    {
        Ok(reply) => expect_status(&reply, &PROCESSED_OR_UNAUTHORIZED, "slow submission"),
        Err(ContractError::NetworkTimeout { after }) => {
            tracing::info!(?after, "client-side timeout tolerated");
            Ok(())
        }
        Err(error) => Err(error),
    }
}
