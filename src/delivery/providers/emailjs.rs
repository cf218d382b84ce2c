//! EmailJS provider using the REST send endpoint.
//!
//! `POST {base_url}/email/send` with a JSON body:
//! - `service_id`, `template_id`: which account service and template to use
//! - `user_id`: the account's public key
//! - `template_params`: the form fields, keyed by template variable name
//! - `accessToken`: the private key, only for accounts that require it
//!
//! EmailJS answers `200 OK` with a plain-text body on success and a
//! plain-text reason on any 4xx/5xx.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;

use crate::core::form::FormSnapshot;
use crate::delivery::{Credentials, DeliveryError, DeliveryProvider, DeliveryRequest};

use crate::core::config::DEFAULT_EMAILJS_BASE_URL;

// ============================================================================
// EmailJS API Types
// ============================================================================

/// The request body for `/email/send`
#[derive(Serialize, Debug)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a FormSnapshot,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

impl<'a> SendRequest<'a> {
    fn new(credentials: &'a Credentials, fields: &'a FormSnapshot) -> Self {
        Self {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: fields,
            access_token: credentials.private_key.as_deref(),
        }
    }
}

/// Rejects credentials that could never succeed before spending a round trip.
fn check_credentials(credentials: &Credentials) -> Result<(), DeliveryError> {
    let missing = [
        ("service_id", &credentials.service_id),
        ("template_id", &credentials.template_id),
        ("public_key", &credentials.public_key),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    match missing {
        Some((name, _)) => Err(DeliveryError::Config(format!("{name} is empty"))),
        None => Ok(()),
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// EmailJS REST provider
pub struct EmailJsProvider {
    base_url: String,
    client: reqwest::Client,
}

impl EmailJsProvider {
    /// Creates a new EmailJS provider.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to EmailJS's API)
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_EMAILJS_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeliveryProvider for EmailJsProvider {
    fn name(&self) -> &str {
        "emailjs"
    }

    async fn send(&self, request: DeliveryRequest<'_>) -> Result<(), DeliveryError> {
        check_credentials(request.credentials)?;

        let body = SendRequest::new(request.credentials, request.fields);
        info!(
            "EmailJS send: service={}, template={}",
            body.service_id, body.template_id
        );

        let response = self
            .client
            .post(format!("{}/email/send", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();
        debug!("EmailJS response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("EmailJS API error: {} - {}", status.as_u16(), message);
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!("EmailJS accepted the message");
        Ok(())
    }
}
