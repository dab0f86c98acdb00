use crate::shared::infrastructure::transport::TransportError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("service {url} not available after {attempts} attempts")]
    ServiceUnavailable { url: String, attempts: u32 },

    #[error("assertion failed: {0}")]
    AssertionFailure(String),

    #[error("request timed out after {after:?}")]
    NetworkTimeout { after: Duration },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("case panicked: {0}")]
    Panicked(String),
}

impl From<TransportError> for ContractError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout(after) => ContractError::NetworkTimeout { after },
            TransportError::Backend(reason) => ContractError::Transport(reason),
        }
    }
}

#[cfg(test)]
mod contract_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_map_a_transport_timeout_to_a_network_timeout() {
        let error: ContractError = TransportError::Timeout(Duration::from_secs(2)).into();
        assert_eq!(
            error,
            ContractError::NetworkTimeout {
                after: Duration::from_secs(2)
            }
        );
    }

    #[rstest]
    fn it_should_describe_an_exhausted_health_probe() {
        let error = ContractError::ServiceUnavailable {
            url: "http://localhost:5679/healthz".into(),
            attempts: 30,
        };
        assert_eq!(
            error.to_string(),
            "service http://localhost:5679/healthz not available after 30 attempts"
        );
    }
}
