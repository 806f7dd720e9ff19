use std::future::Future;

use folio_models::contact::ContactMessage;

/// The remote round trip a contact message makes before it is archived.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDeliveryService: Send + Sync + 'static {
    /// Hands `message` to the remote side. Returns `false` if the remote side
    /// refused the message.
    fn deliver(&self, message: &ContactMessage) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactDeliveryService {
    pub fn with_deliver(mut self, message: ContactMessage, result: bool) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_deliver_error(mut self, message: ContactMessage, error: &'static str) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
