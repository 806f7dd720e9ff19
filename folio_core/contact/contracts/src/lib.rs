use std::future::Future;

use folio_models::{
    contact::{ContactMessage, ContactSubmission, ContactValidationError},
    export::ArchiveExport,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates the raw form fields, delivers the resulting message and
    /// appends it to the archive.
    ///
    /// Nothing is delivered or archived if validation fails, and nothing is
    /// archived if the delivery fails.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactMessage, ContactSubmitError>> + Send;

    /// Renders the whole archive as a CSV file named after the current date.
    fn export_archive(
        &self,
    ) -> impl Future<Output = Result<ArchiveExport, ContactExportError>> + Send;

    /// Returns whether the archive holds at least one message.
    fn has_messages(&self) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Returns every archived message in submission order.
    fn list_messages(&self) -> impl Future<Output = anyhow::Result<Vec<ContactMessage>>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Failed to deliver message.")]
    Delivery,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactExportError {
    #[error("The archive is empty.")]
    EmptyArchive,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactMessage, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_export_archive(mut self, result: Result<ArchiveExport, ContactExportError>) -> Self {
        self.expect_export_archive()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_has_messages(mut self, result: bool) -> Self {
        self.expect_has_messages()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list_messages(mut self, messages: Vec<ContactMessage>) -> Self {
        self.expect_list_messages()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(messages))));
        self
    }
}
