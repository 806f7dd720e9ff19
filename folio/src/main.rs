use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio::{
    commands::{
        export::ExportCommand, messages::MessagesCommand, status::status, submit::SubmitCommand,
    },
    environment::Environment,
};
use folio_utils::folio_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing();

    let paths = if cli.config.is_empty() {
        vec![PathBuf::from(folio_config::DEFAULT_CONFIG_PATH)]
    } else {
        cli.config
    };
    let config = folio_config::load(&paths).context("Failed to load config")?;

    if let Command::CheckConfig { verbose } = cli.command {
        verbose.then(|| println!("{config:#?}"));
        return Ok(ExitCode::SUCCESS);
    }

    let environment = Environment::new(config, cli.ephemeral);

    match cli.command {
        Command::Submit(command) => command.invoke(&environment).await,
        Command::Export(command) => command.invoke(&environment).await,
        Command::Messages(command) => command.invoke(&environment).await,
        Command::Status => status(&environment).await,
        Command::CheckConfig { .. } | Command::Completion { .. } => unreachable!(),
    }
}

#[derive(Debug, Parser)]
#[command(version = folio_version())]
struct Cli {
    /// Config files to load, later files override earlier ones
    /// [default: the bundled config.toml]
    #[arg(long, short, global = true, env = "FOLIO_CONFIG", value_delimiter = ',')]
    config: Vec<PathBuf>,
    /// Keep the archive in memory instead of the storage file
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a contact message
    #[command(aliases(["send", "s"]))]
    Submit(SubmitCommand),
    /// Download all archived messages as a CSV file
    #[command(aliases(["download", "e"]))]
    Export(ExportCommand),
    /// List all archived messages
    #[command(aliases(["ls", "m"]))]
    Messages(MessagesCommand),
    /// Show the state of the contact form
    Status,
    /// Validate config files
    CheckConfig {
        /// Print the parsed config
        #[arg(long, short)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
