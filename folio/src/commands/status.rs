use std::process::ExitCode;

use anyhow::Context;

use super::print_view;
use crate::environment::Environment;

pub async fn status(environment: &Environment) -> anyhow::Result<ExitCode> {
    let form = environment.contact_form();
    let available = form
        .restore_export_availability()
        .await
        .context("Failed to read the message archive")?;

    print_view(&form.view());
    if !available {
        println!("No messages yet");
    }

    Ok(ExitCode::SUCCESS)
}
