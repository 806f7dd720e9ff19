use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{email_address::EmailAddress, macros::nutype_string};

/// A contact message as it is stored in the archive.
///
/// Serializes to a flat object with the fields `name`, `email`, `subject`,
/// `message` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(flatten)]
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    #[serde(rename = "message")]
    pub content: ContactMessageContent,
    pub timestamp: ContactMessageTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

nutype_string!(ContactMessageAuthorName(sanitize(trim), validate(not_empty)));
nutype_string!(ContactMessageSubject(sanitize(trim), validate(not_empty)));
nutype_string!(ContactMessageContent(sanitize(trim), validate(not_empty)));
nutype_string!(
    /// Human readable capture time, assigned when the message is submitted.
    ContactMessageTimestamp(validate(not_empty))
);

/// The four raw form fields exactly as they were typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A submission that passed validation but has not been timestamped yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("missing field")]
    MissingField,
    #[error("invalid email")]
    InvalidEmail,
}

impl ContactSubmission {
    /// Checks that every field is non-empty after trimming and only then that
    /// the email address is well formed.
    pub fn validate(self) -> Result<ContactDraft, ContactValidationError> {
        let email = self.email.trim();

        let (Ok(name), Ok(subject), Ok(content), false) = (
            ContactMessageAuthorName::try_new(self.name),
            ContactMessageSubject::try_new(self.subject),
            ContactMessageContent::try_new(self.message),
            email.is_empty(),
        ) else {
            return Err(ContactValidationError::MissingField);
        };

        let email =
            EmailAddress::try_new(email).map_err(|_| ContactValidationError::InvalidEmail)?;

        Ok(ContactDraft {
            author: ContactMessageAuthor { name, email },
            subject,
            content,
        })
    }
}

impl ContactDraft {
    pub fn into_message(self, timestamp: ContactMessageTimestamp) -> ContactMessage {
        ContactMessage {
            author: self.author,
            subject: self.subject,
            content: self.content,
            timestamp,
        }
    }
}
