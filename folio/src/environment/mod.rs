use std::sync::Arc;

use folio_config::Config;
use folio_core_contact_impl::{form::ContactFormConfig, ContactFeatureConfig};
use folio_extern_impl::delivery::{SimulatedDeliveryServiceConfig, SimulatedDeliveryServiceImpl};
use folio_persistence_local::{LocalArchiveRepository, LocalStorage};
use folio_shared_impl::time::TimeServiceImpl;
use tracing::debug;

pub mod types;

/// Wires the services of one `folio` run together.
#[derive(Debug, Clone)]
pub struct Environment {
    config: Arc<Config>,
    storage: LocalStorage,
}

impl Environment {
    /// Backs the archive by the storage file from the config, or by memory
    /// when `ephemeral` is set.
    pub fn new(config: Config, ephemeral: bool) -> Self {
        let storage = if ephemeral {
            debug!("using in-memory storage");
            LocalStorage::memory()
        } else {
            debug!(path = %config.storage.path.display(), "using file storage");
            LocalStorage::file(&config.storage.path)
        };

        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: Config, storage: LocalStorage) -> Self {
        Self {
            config: Arc::new(config),
            storage,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn archive_repo(&self) -> types::ArchiveRepo {
        LocalArchiveRepository::new(
            self.storage.clone(),
            self.config.contact.archive_key.as_str(),
        )
    }

    pub fn contact_feature(&self) -> types::ContactFeature {
        let contact = &self.config.contact;

        let delivery = SimulatedDeliveryServiceImpl::new(SimulatedDeliveryServiceConfig {
            delay: *contact.delivery_delay,
        });
        let feature_config = ContactFeatureConfig {
            timestamp_format: contact.timestamp_format.0.as_str().into(),
            timestamp_offset: contact.timezone.offset(),
            export_prefix: contact.export_prefix.as_str().into(),
        };

        types::ContactFeature::new(
            TimeServiceImpl,
            delivery,
            self.archive_repo(),
            feature_config,
        )
    }

    pub fn contact_form(&self) -> types::ContactForm {
        types::ContactForm::new(
            self.contact_feature(),
            TimeServiceImpl,
            ContactFormConfig {
                notice_ttl: *self.config.contact.notice_ttl,
            },
        )
    }
}
