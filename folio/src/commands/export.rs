use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::Args;
use folio_core_contact_contracts::ContactExportError;
use folio_models::export::ArchiveExport;
use tracing::warn;

use super::print_view;
use crate::environment::Environment;

#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Directory to write the CSV file to
    #[arg(long, short, default_value = ".")]
    pub out_dir: PathBuf,
}

impl ExportCommand {
    pub async fn invoke(self, environment: &Environment) -> anyhow::Result<ExitCode> {
        let form = environment.contact_form();
        let result = form.export_to(|export| save(&self.out_dir, export)).await;
        print_view(&form.view());

        match result {
            Ok(path) => {
                println!("{}", path.display());
                Ok(ExitCode::SUCCESS)
            }
            Err(ContactExportError::EmptyArchive) => Ok(ExitCode::FAILURE),
            Err(ContactExportError::Other(err)) => {
                warn!("Failed to export messages: {err:#}");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

async fn save(out_dir: &Path, export: ArchiveExport) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create directory {}", out_dir.display()))?;

    let path = out_dir.join(&export.filename);
    tokio::fs::write(&path, export.content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
