//! Presentation state of the contact form.
//!
//! [`FormModel`] holds everything the form surface needs and
//! [`FormModel::render`] turns it into a [`FormView`] without side effects.

use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::contact::ContactSubmission;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Pending,
    Settled(FormOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a submission is already pending")]
pub struct FormAlreadyPendingError;

impl FormState {
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    /// Enters [`FormState::Pending`]. Fails if a submission is in flight.
    pub fn begin(&mut self) -> Result<(), FormAlreadyPendingError> {
        if self.is_pending() {
            return Err(FormAlreadyPendingError);
        }
        *self = Self::Pending;
        Ok(())
    }

    /// Leaves [`FormState::Pending`]. Returns `false` and changes nothing if
    /// no submission was in flight.
    pub fn settle(&mut self, outcome: FormOutcome) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = Self::Settled(outcome);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// Transient user facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(
        text: impl Into<String>,
        kind: NoticeKind,
        shown_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: shown_at + ttl,
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportControl {
    pub label: String,
}

impl Default for ExportControl {
    fn default() -> Self {
        Self {
            label: "Download Messages".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    pub state: FormState,
    pub fields: ContactSubmission,
    pub notice: Option<Notice>,
    pub export_control: Option<ExportControl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub submit_enabled: bool,
    pub loading: bool,
    pub notice: Option<Notice>,
    pub export_control: Option<ExportControl>,
    pub fields: ContactSubmission,
}

impl FormModel {
    /// Replaces the current notice.
    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Makes the export control available. Never creates a second one.
    pub fn reveal_export_control(&mut self) -> &mut ExportControl {
        self.export_control.get_or_insert_with(ExportControl::default)
    }

    pub fn render(&self, now: DateTime<Utc>) -> FormView {
        let pending = self.state.is_pending();
        FormView {
            submit_enabled: !pending,
            loading: pending,
            notice: self
                .notice
                .as_ref()
                .filter(|notice| notice.is_visible(now))
                .cloned(),
            export_control: self.export_control.clone(),
            fields: self.fields.clone(),
        }
    }
}
