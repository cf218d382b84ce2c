use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::form::FormSnapshot;

/// Errors that can occur while handing a form to the delivery service.
/// The UI collapses all of them into a single failure banner; the variants
/// exist so the log says what actually went wrong.
#[derive(Debug)]
pub enum DeliveryError {
    /// Provider misconfigured (missing credential, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, TLS).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// No answer within the configured deadline.
    Timeout(Duration),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Config(msg) => write!(f, "config error: {msg}"),
            DeliveryError::Network(msg) => write!(f, "network error: {msg}"),
            DeliveryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            DeliveryError::Timeout(after) => {
                write!(f, "timed out after {}ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for DeliveryError {}

/// The identifiers that route a message through an EmailJS account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub service_id: String,
    pub template_id: String,
    /// Public key, sent as `user_id`.
    pub public_key: String,
    /// Optional private key, sent as `accessToken` when the account requires it.
    pub private_key: Option<String>,
}

/// Stand-in for a secret in `Debug` output; only says whether one is set.
pub(crate) fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &redacted(&self.private_key))
            .finish()
    }
}

/// Everything a provider needs to send one form.
pub struct DeliveryRequest<'a> {
    pub credentials: &'a Credentials,
    pub fields: &'a FormSnapshot,
}

#[async_trait]
pub trait DeliveryProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends the form. Resolves once the service has accepted or rejected it.
    async fn send(&self, request: DeliveryRequest<'_>) -> Result<(), DeliveryError>;
}
