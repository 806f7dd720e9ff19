use std::{fmt, future::Future, time::Duration};

use folio_core_contact_contracts::{ContactExportError, ContactFeatureService, ContactSubmitError};
use folio_models::{
    contact::{ContactMessage, ContactSubmission, ContactValidationError},
    export::ArchiveExport,
    form::{FormAlreadyPendingError, FormModel, FormOutcome, FormView, Notice, NoticeKind},
};
use folio_shared_contracts::time::TimeService;
use folio_utils::trace_instrument;
use thiserror::Error;
use tokio::sync::watch;

pub const MISSING_FIELD_NOTICE: &str = "Please fill in all fields";
pub const INVALID_EMAIL_NOTICE: &str = "Please enter a valid email address";
pub const SUBMIT_SUCCESS_NOTICE: &str = "Thank you for your message! I will get back to you soon.";
pub const SUBMIT_FAILURE_NOTICE: &str =
    "Sorry, there was an error sending your message. Please try again.";
pub const EXPORT_SUCCESS_NOTICE: &str = "Messages downloaded successfully!";
pub const EXPORT_EMPTY_NOTICE: &str = "No messages to download";
pub const EXPORT_FAILURE_NOTICE: &str = "Sorry, the messages could not be downloaded.";

/// A single contact form on top of a [`ContactFeatureService`].
///
/// The form model is published through a [`watch`] channel, so a form
/// surface can re-render on every change via [`ContactForm::subscribe`].
/// Every error ends up as a transient notice on the model.
#[derive(Debug)]
pub struct ContactForm<Contact, Time> {
    contact: Contact,
    time: Time,
    config: ContactFormConfig,
    model: watch::Sender<FormModel>,
}

#[derive(Debug, Clone)]
pub struct ContactFormConfig {
    pub notice_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum ContactFormError {
    #[error(transparent)]
    AlreadyPending(#[from] FormAlreadyPendingError),
    #[error(transparent)]
    Submit(#[from] ContactSubmitError),
}

impl<Contact, Time> ContactForm<Contact, Time>
where
    Contact: ContactFeatureService,
    Time: TimeService,
{
    pub fn new(contact: Contact, time: Time, config: ContactFormConfig) -> Self {
        Self {
            contact,
            time,
            config,
            model: watch::Sender::new(FormModel::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FormModel> {
        self.model.subscribe()
    }

    pub fn view(&self) -> FormView {
        let now = self.time.now();
        self.model.borrow().render(now)
    }

    /// Validates and submits the form.
    ///
    /// Rejected without any effect while another submission is pending.
    /// Validation errors never enter the pending state.
    #[trace_instrument(skip(self))]
    pub async fn submit(
        &self,
        fields: ContactSubmission,
    ) -> Result<ContactMessage, ContactFormError> {
        if self.model.borrow().state.is_pending() {
            return Err(FormAlreadyPendingError.into());
        }

        if let Err(err) = fields.clone().validate() {
            let err = ContactSubmitError::Validation(err);
            let notice = self.notice(submit_error_text(&err), NoticeKind::Error);
            self.model.send_modify(|model| {
                model.fields = fields;
                model.show_notice(notice);
            });
            return Err(err.into());
        }

        let mut begin = Ok(());
        self.model.send_if_modified(|model| {
            begin = model.state.begin();
            if begin.is_ok() {
                model.fields = fields.clone();
            }
            begin.is_ok()
        });
        begin?;

        let result = self.contact.submit(fields).await;

        let (outcome, notice) = match &result {
            Ok(_) => (
                FormOutcome::Success,
                self.notice(SUBMIT_SUCCESS_NOTICE, NoticeKind::Success),
            ),
            Err(err) => (
                FormOutcome::Failure,
                self.notice(submit_error_text(err), NoticeKind::Error),
            ),
        };
        self.model.send_modify(|model| {
            model.state.settle(outcome);
            model.show_notice(notice);
            if outcome == FormOutcome::Success {
                model.fields = ContactSubmission::default();
                model.reveal_export_control();
            }
        });

        result.map_err(Into::into)
    }

    /// Exports the archive and reports the result as a notice.
    pub async fn export(&self) -> Result<ArchiveExport, ContactExportError> {
        self.export_to(|export| std::future::ready(Ok(export))).await
    }

    /// Exports the archive and hands it to `save`. The success notice is only
    /// shown once `save` has succeeded.
    #[trace_instrument(skip(self, save))]
    pub async fn export_to<F, Fut, T>(&self, save: F) -> Result<T, ContactExportError>
    where
        F: FnOnce(ArchiveExport) -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
        T: fmt::Debug,
    {
        let result = match self.contact.export_archive().await {
            Ok(export) => save(export).await.map_err(ContactExportError::Other),
            Err(err) => Err(err),
        };

        let notice = match &result {
            Ok(_) => self.notice(EXPORT_SUCCESS_NOTICE, NoticeKind::Success),
            Err(ContactExportError::EmptyArchive) => {
                self.notice(EXPORT_EMPTY_NOTICE, NoticeKind::Error)
            }
            Err(ContactExportError::Other(_)) => {
                self.notice(EXPORT_FAILURE_NOTICE, NoticeKind::Error)
            }
        };
        self.model.send_modify(|model| model.show_notice(notice));

        result
    }

    /// Reveals the export control if the archive already holds messages, e.g.
    /// after a reload. Returns whether the export control is visible.
    #[trace_instrument(skip(self))]
    pub async fn restore_export_availability(&self) -> anyhow::Result<bool> {
        if self.contact.has_messages().await? {
            self.model.send_if_modified(|model| {
                let created = model.export_control.is_none();
                model.reveal_export_control();
                created
            });
        }

        Ok(self.model.borrow().export_control.is_some())
    }

    fn notice(&self, text: &str, kind: NoticeKind) -> Notice {
        Notice::new(text, kind, self.time.now(), self.config.notice_ttl)
    }
}

fn submit_error_text(err: &ContactSubmitError) -> &'static str {
    match err {
        ContactSubmitError::Validation(ContactValidationError::MissingField) => MISSING_FIELD_NOTICE,
        ContactSubmitError::Validation(ContactValidationError::InvalidEmail) => INVALID_EMAIL_NOTICE,
        ContactSubmitError::Delivery | ContactSubmitError::Other(_) => SUBMIT_FAILURE_NOTICE,
    }
}
