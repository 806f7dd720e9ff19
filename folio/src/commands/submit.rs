use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use folio_models::contact::ContactSubmission;
use tracing::{info, warn};

use super::print_view;
use crate::environment::Environment;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    pub name: String,
    /// Your email address
    #[arg(long)]
    pub email: String,
    /// What the message is about
    #[arg(long)]
    pub subject: String,
    /// The message itself
    #[arg(long)]
    pub message: String,
}

impl SubmitCommand {
    pub async fn invoke(self, environment: &Environment) -> anyhow::Result<ExitCode> {
        let form = environment.contact_form();
        form.restore_export_availability()
            .await
            .context("Failed to read the message archive")?;

        let fields = ContactSubmission {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        };

        let result = form.submit(fields).await;
        print_view(&form.view());

        match result {
            Ok(message) => {
                info!(timestamp = %message.timestamp, "message submitted");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                warn!("Failed to submit message: {err:#}");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
