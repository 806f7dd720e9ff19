use std::process::ExitCode;

use clap::Args;
use folio_core_contact_contracts::ContactFeatureService;

use crate::environment::Environment;

#[derive(Debug, Args)]
pub struct MessagesCommand {
    /// Print the archive as JSON, in the format it is stored in
    #[arg(long)]
    pub json: bool,
}

impl MessagesCommand {
    pub async fn invoke(self, environment: &Environment) -> anyhow::Result<ExitCode> {
        let messages = environment.contact_feature().list_messages().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&messages)?);
            return Ok(ExitCode::SUCCESS);
        }

        if messages.is_empty() {
            println!("No messages");
        }

        for message in &messages {
            println!(
                "[{}] {} <{}>: {}",
                message.timestamp, message.author.name, message.author.email, message.subject
            );
            for line in message.content.lines() {
                println!("    {line}");
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}
