use std::sync::{Arc, LazyLock};

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use folio_extern_contracts::delivery::MockContactDeliveryService;
use folio_models::contact::{ContactMessage, ContactSubmission};
use folio_persistence_contracts::MockArchiveRepository;
use folio_shared_contracts::time::MockTimeService;

use crate::{ContactFeatureConfig, ContactFeatureServiceImpl};


type Sut =
    ContactFeatureServiceImpl<MockTimeService, MockContactDeliveryService, MockArchiveRepository>;

impl Default for Sut {
    fn default() -> Self {
        Self::new(
            MockTimeService::new(),
            MockContactDeliveryService::new(),
            MockArchiveRepository::new(),
            CONFIG.clone(),
        )
    }
}

static CONFIG: LazyLock<ContactFeatureConfig> = LazyLock::new(|| ContactFeatureConfig {
    timestamp_format: Arc::from("%-m/%-d/%Y, %-I:%M:%S %p"),
    timestamp_offset: FixedOffset::east_opt(0),
    export_prefix: Arc::from("portfolio_messages"),
});

static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2026, 10, 16, 15, 4, 5).unwrap());

const NOW_TIMESTAMP: &str = "10/16/2026, 3:04:05 PM";

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: "Hi".into(),
        message: "Hello".into(),
    }
}

fn message(submission: ContactSubmission, timestamp: &str) -> ContactMessage {
    submission
        .validate()
        .unwrap()
        .into_message(timestamp.try_into().unwrap())
}
