use std::{fmt::Write, sync::Arc};

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local, Utc};
use folio_core_contact_contracts::{ContactExportError, ContactFeatureService, ContactSubmitError};
use folio_extern_contracts::delivery::ContactDeliveryService;
use folio_models::{
    contact::{ContactMessage, ContactMessageTimestamp, ContactSubmission},
    export::{ArchiveExport, CSV_CONTENT_TYPE},
};
use folio_persistence_contracts::ArchiveRepository;
use folio_shared_contracts::time::TimeService;
use folio_utils::trace_instrument;
use tracing::info;

pub mod csv;
pub mod form;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Time, Delivery, ArchiveRepo> {
    time: Time,
    delivery: Delivery,
    archive_repo: ArchiveRepo,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// chrono strftime format of the message timestamp.
    pub timestamp_format: Arc<str>,
    /// Offset the message timestamp is rendered in, `None` for the local
    /// timezone of the host.
    pub timestamp_offset: Option<FixedOffset>,
    /// Exports are named `<export_prefix>_<YYYY-MM-DD>.csv`.
    pub export_prefix: Arc<str>,
}

impl<Time, Delivery, ArchiveRepo> ContactFeatureServiceImpl<Time, Delivery, ArchiveRepo> {
    pub fn new(
        time: Time,
        delivery: Delivery,
        archive_repo: ArchiveRepo,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            time,
            delivery,
            archive_repo,
            config,
        }
    }
}

impl<Time, Delivery, ArchiveRepo> ContactFeatureServiceImpl<Time, Delivery, ArchiveRepo> {
    fn render_timestamp(&self, now: DateTime<Utc>) -> anyhow::Result<String> {
        let format = &*self.config.timestamp_format;
        let mut out = String::new();
        match self.config.timestamp_offset {
            Some(offset) => write!(out, "{}", now.with_timezone(&offset).format(format)),
            None => write!(out, "{}", now.with_timezone(&Local).format(format)),
        }
        .with_context(|| format!("Invalid timestamp format {format:?}"))?;
        Ok(out)
    }
}

impl<Time, Delivery, ArchiveRepo> ContactFeatureService
    for ContactFeatureServiceImpl<Time, Delivery, ArchiveRepo>
where
    Time: TimeService,
    Delivery: ContactDeliveryService,
    ArchiveRepo: ArchiveRepository,
{
    #[trace_instrument(skip(self))]
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactSubmitError> {
        let draft = submission.validate()?;

        let timestamp = self.render_timestamp(self.time.now())?;
        let timestamp = ContactMessageTimestamp::try_new(timestamp)
            .context("Failed to render message timestamp")?;
        let message = draft.into_message(timestamp);

        if !self.delivery.deliver(&message).await? {
            return Err(ContactSubmitError::Delivery);
        }

        self.archive_repo.append(&message).await?;

        info!(subject = %message.subject, "archived contact message");

        Ok(message)
    }

    #[trace_instrument(skip(self))]
    async fn export_archive(&self) -> Result<ArchiveExport, ContactExportError> {
        let messages = self.archive_repo.read().await?;
        if messages.is_empty() {
            return Err(ContactExportError::EmptyArchive);
        }

        let date = self.time.now().date_naive();

        info!(messages = messages.len(), "exporting archive");

        Ok(ArchiveExport {
            filename: format!(
                "{}_{}.csv",
                self.config.export_prefix,
                date.format("%Y-%m-%d")
            ),
            content_type: CSV_CONTENT_TYPE,
            content: csv::render_archive(&messages),
        })
    }

    #[trace_instrument(skip(self))]
    async fn has_messages(&self) -> anyhow::Result<bool> {
        self.archive_repo
            .read()
            .await
            .map(|messages| !messages.is_empty())
    }

    #[trace_instrument(skip(self))]
    async fn list_messages(&self) -> anyhow::Result<Vec<ContactMessage>> {
        self.archive_repo.read().await
    }
}
