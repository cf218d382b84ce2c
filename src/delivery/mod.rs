//! # Delivery
//!
//! The outbound side: something that takes a filled-in form and turns it into
//! an email. Providers sit behind [`DeliveryProvider`] so the TUI can run
//! against EmailJS or a local dry run without knowing which.
//!
//! [`deliver`] puts a deadline on every send. A provider that never answers
//! resolves as [`DeliveryError::Timeout`] instead of leaving the form stuck
//! in its sending state.

pub mod provider;
pub mod providers;

use std::time::Duration;

use log::{info, warn};

pub use provider::{Credentials, DeliveryError, DeliveryProvider, DeliveryRequest};
pub use providers::{DryRunProvider, EmailJsProvider};

/// What the form gets told about a send attempt. The cause of a failure is
/// deliberately not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed,
}

impl From<Result<(), DeliveryError>> for DeliveryOutcome {
    fn from(result: Result<(), DeliveryError>) -> Self {
        match result {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => {
                warn!("Delivery failed: {}", e);
                DeliveryOutcome::Failed
            }
        }
    }
}

/// Runs `provider.send` with a deadline.
pub async fn deliver(
    provider: &dyn DeliveryProvider,
    request: DeliveryRequest<'_>,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    info!(
        "Delivering via {} (timeout={}ms)",
        provider.name(),
        timeout.as_millis()
    );
    match tokio::time::timeout(timeout, provider.send(request)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_collapses_every_error() {
        let errors = [
            DeliveryError::Config("no key".to_string()),
            DeliveryError::Network("refused".to_string()),
            DeliveryError::Api {
                status: 429,
                message: "quota".to_string(),
            },
            DeliveryError::Timeout(Duration::from_secs(1)),
        ];
        for e in errors {
            assert_eq!(DeliveryOutcome::from(Err(e)), DeliveryOutcome::Failed);
        }
        assert_eq!(DeliveryOutcome::from(Ok(())), DeliveryOutcome::Delivered);
    }

    #[test]
    fn test_error_display() {
        let e = DeliveryError::Api {
            status: 400,
            message: "The service ID is invalid".to_string(),
        };
        assert_eq!(e.to_string(), "API error (HTTP 400): The service ID is invalid");
        assert_eq!(
            DeliveryError::Timeout(Duration::from_millis(250)).to_string(),
            "timed out after 250ms"
        );
    }
}
