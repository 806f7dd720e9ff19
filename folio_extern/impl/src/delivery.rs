use std::time::Duration;

use folio_extern_contracts::delivery::ContactDeliveryService;
use folio_models::contact::ContactMessage;
use folio_utils::trace_instrument;
use tracing::debug;

/// Stands in for a real remote call by waiting a fixed delay and accepting
/// every message.
#[derive(Debug, Clone)]
pub struct SimulatedDeliveryServiceImpl {
    config: SimulatedDeliveryServiceConfig,
}

#[derive(Debug, Clone)]
pub struct SimulatedDeliveryServiceConfig {
    pub delay: Duration,
}

impl SimulatedDeliveryServiceImpl {
    pub fn new(config: SimulatedDeliveryServiceConfig) -> Self {
        Self { config }
    }
}

impl ContactDeliveryService for SimulatedDeliveryServiceImpl {
    #[trace_instrument(skip(self, message))]
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<bool> {
        debug!(delay = ?self.config.delay, subject = %message.subject, "simulating delivery");
        tokio::time::sleep(self.config.delay).await;
        Ok(true)
    }
}
