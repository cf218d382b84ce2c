//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::form::ContactForm;
use crate::delivery::{Credentials, DeliveryError, DeliveryProvider, DeliveryRequest};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl DeliveryProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send(&self, _request: DeliveryRequest<'_>) -> Result<(), DeliveryError> {
        Ok(())
    }
}

pub fn test_credentials() -> Credentials {
    Credentials {
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "public_test".to_string(),
        private_key: None,
    }
}

/// Creates a test App with a NoopProvider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopProvider), test_credentials())
}

/// The form from the walkthrough scenarios.
pub fn ada_form() -> ContactForm {
    ContactForm {
        name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
        title: "Hi".to_string(),
        message: "Hello".to_string(),
    }
}
