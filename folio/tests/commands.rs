use std::process::ExitCode;

use folio::{
    commands::{export::ExportCommand, status::status, submit::SubmitCommand},
    environment::Environment,
};
use folio_persistence_contracts::ArchiveRepository;
use folio_persistence_local::LocalStorage;
use pretty_assertions::assert_eq;

fn environment() -> Environment {
    let config = folio_config::load_with_override(
        &[folio_config::DEFAULT_CONFIG_PATH],
        &[r#"contact.delivery_delay = "0s""#, r#"contact.timezone = "utc""#],
    )
    .unwrap();
    Environment::with_storage(config, LocalStorage::memory())
}

fn submit_command(name: &str, email: &str) -> SubmitCommand {
    SubmitCommand {
        name: name.into(),
        email: email.into(),
        subject: "Hi".into(),
        message: "He said \"hi\"".into(),
    }
}

#[tokio::test]
async fn submit_archives_message() {
    // Arrange
    let environment = environment();

    // Act
    let code = submit_command("Ada", "ada@example.com")
        .invoke(&environment)
        .await
        .unwrap();

    // Assert
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(environment.archive_repo().read().await.unwrap().len(), 1);
}

#[tokio::test]
async fn submit_invalid_email_fails() {
    // Arrange
    let environment = environment();

    // Act
    let code = submit_command("Ada", "no-at-sign.com")
        .invoke(&environment)
        .await
        .unwrap();

    // Assert
    assert_eq!(code, ExitCode::FAILURE);
    assert!(environment.archive_repo().read().await.unwrap().is_empty());
}

#[tokio::test]
async fn export_writes_csv_file() {
    // Arrange
    let environment = environment();
    submit_command("Ada", "ada@example.com")
        .invoke(&environment)
        .await
        .unwrap();
    submit_command("Grace", "grace@example.org")
        .invoke(&environment)
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("downloads");

    // Act
    let code = ExportCommand {
        out_dir: out_dir.clone(),
    }
    .invoke(&environment)
    .await
    .unwrap();

    // Assert
    assert_eq!(code, ExitCode::SUCCESS);

    let files = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("portfolio_messages_"));
    assert!(files[0].ends_with(".csv"));

    let content = std::fs::read_to_string(out_dir.join(&files[0])).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Timestamp,Name,Email,Subject,Message");
    assert!(lines[2].ends_with(r#","Grace","grace@example.org","Hi","He said ""hi""""#));
}

#[tokio::test]
async fn export_empty_archive_writes_nothing() {
    // Arrange
    let environment = environment();
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("downloads");

    // Act
    let code = ExportCommand {
        out_dir: out_dir.clone(),
    }
    .invoke(&environment)
    .await
    .unwrap();

    // Assert
    assert_eq!(code, ExitCode::FAILURE);
    assert!(!out_dir.exists());
}

#[tokio::test]
async fn export_unwritable_dir_fails() {
    // Arrange
    let environment = environment();
    submit_command("Ada", "ada@example.com")
        .invoke(&environment)
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    // Act
    let code = ExportCommand { out_dir: blocker }
        .invoke(&environment)
        .await
        .unwrap();

    // Assert
    assert_eq!(code, ExitCode::FAILURE);
}

#[tokio::test]
async fn status_succeeds_on_empty_archive() {
    let environment = environment();

    let code = status(&environment).await.unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
}
