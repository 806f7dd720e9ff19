use std::future::Future;

use folio_models::contact::ContactMessage;

/// Append-only store of every contact message ever submitted.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ArchiveRepository: Send + Sync + 'static {
    /// Returns all archived messages in the order they were appended.
    ///
    /// An archive that has never been written is empty. An archive that
    /// exists but cannot be decoded is an error.
    fn read(&self) -> impl Future<Output = anyhow::Result<Vec<ContactMessage>>> + Send;

    /// Appends `message` to the end of the archive, creating the archive if
    /// necessary.
    fn append(&self, message: &ContactMessage) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockArchiveRepository {
    pub fn with_read(mut self, messages: Vec<ContactMessage>) -> Self {
        self.expect_read()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(messages))));
        self
    }

    pub fn with_read_error(mut self, error: &'static str) -> Self {
        self.expect_read()
            .once()
            .return_once(move || Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_append(mut self, message: ContactMessage) -> Self {
        self.expect_append()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_append_error(mut self, message: ContactMessage, error: &'static str) -> Self {
        self.expect_append()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
