//! Dry-run provider: logs what would have been sent and reports success.
//!
//! Lets the form be exercised end to end without an EmailJS account.

use async_trait::async_trait;
use log::info;

use crate::delivery::{DeliveryError, DeliveryProvider, DeliveryRequest};

pub struct DryRunProvider;

#[async_trait]
impl DeliveryProvider for DryRunProvider {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn send(&self, request: DeliveryRequest<'_>) -> Result<(), DeliveryError> {
        let params = serde_json::to_string(request.fields)
            .map_err(|e| DeliveryError::Config(format!("unserializable form: {e}")))?;
        info!(
            "[dry-run] would send via service={} template={}: {}",
            request.credentials.service_id, request.credentials.template_id, params
        );
        Ok(())
    }
}
