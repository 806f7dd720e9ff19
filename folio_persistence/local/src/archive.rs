use std::sync::Arc;

use anyhow::Context;
use folio_models::contact::ContactMessage;
use folio_persistence_contracts::ArchiveRepository;
use folio_utils::trace_instrument;
use tracing::debug;

use crate::LocalStorage;

/// Keeps the archive as a JSON array under a single key of a
/// [`LocalStorage`].
#[derive(Debug, Clone)]
pub struct LocalArchiveRepository {
    storage: LocalStorage,
    key: Arc<str>,
}

impl LocalArchiveRepository {
    pub fn new(storage: LocalStorage, key: impl Into<Arc<str>>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

impl ArchiveRepository for LocalArchiveRepository {
    #[trace_instrument(skip(self))]
    async fn read(&self) -> anyhow::Result<Vec<ContactMessage>> {
        let value = self.storage.get_item(&self.key).await?;
        decode(&self.key, value.as_deref())
    }

    #[trace_instrument(skip(self))]
    async fn append(&self, message: &ContactMessage) -> anyhow::Result<()> {
        self.storage
            .update_item(&self.key, |value| {
                let mut messages = decode(&self.key, value)?;
                messages.push(message.clone());
                debug!(key = &*self.key, len = messages.len(), "appending to archive");
                Ok(Some(serde_json::to_string(&messages)?))
            })
            .await
    }
}

/// A missing value and a JSON `null` both decode to an empty archive.
fn decode(key: &str, value: Option<&str>) -> anyhow::Result<Vec<ContactMessage>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    serde_json::from_str::<Option<Vec<ContactMessage>>>(value)
        .map(Option::unwrap_or_default)
        .with_context(|| format!("The archive stored under {key:?} is corrupted"))
}
