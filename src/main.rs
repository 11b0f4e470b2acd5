use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod config;
mod core;
mod error;
mod services;
mod utils;

use cli::*;
use config::Config;
use crate::core::model::TemplateType;
use crate::core::sync::DownloadScope;
use error::{Result, SyncError};
use services::SimpleServices;

#[derive(Parser)]
#[command(name = "postmark-sync")]
#[command(about = "Keep Postmark templates and layouts in sync with a local folder")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load environment from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download all templates, or the one with the given name
    Download(download::DownloadArgs),

    /// Download all layouts, or the one with the given name
    DownloadLayouts(download::DownloadArgs),

    /// Back up the mirror, then push local templates and layouts to Postmark
    Upload(upload::UploadArgs),

    /// Snapshot the local mirror into backup/<server>/<timestamp>
    Backup(backup::BackupArgs),

    /// Serve a local template's HTML and open it in the browser
    Preview(preview::PreviewArgs),

    /// Serve a local layout's HTML and open it in the browser
    PreviewLayout(preview::PreviewArgs),

    /// Open a template in the Postmark web editor
    Open(open::OpenArgs),

    /// Open a layout in the Postmark web editor
    OpenLayout(open::OpenArgs),
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            print_usage();
            return;
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    // Nothing useful to do if stdout is closed
    let _ = Cli::command().print_help();
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        print_usage();
        return Ok(());
    };

    utils::logging::init_logging(cli.verbose).map_err(SyncError::Internal)?;

    // Load configuration
    let config = Config::load(cli.env_file.as_deref())?;

    // Initialize services
    let services = SimpleServices::new(config);

    match command {
        Commands::Download(args) => download::execute(args, DownloadScope::All, &services).await,
        Commands::DownloadLayouts(args) => download::execute(args, DownloadScope::Layouts, &services).await,
        Commands::Upload(args) => upload::execute(args, &services).await,
        Commands::Backup(args) => backup::execute(args, &services).await,
        Commands::Preview(args) => preview::execute(args, TemplateType::Standard, &services).await,
        Commands::PreviewLayout(args) => preview::execute(args, TemplateType::Layout, &services).await,
        Commands::Open(args) => open::execute(args, TemplateType::Standard, &services).await,
        Commands::OpenLayout(args) => open::execute(args, TemplateType::Layout, &services).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_kebab_case_subcommands() {
        let cli = Cli::try_parse_from(["postmark-sync", "download-layouts", "Shell"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::DownloadLayouts(download::DownloadArgs { name: Some(ref n) })) if n == "Shell"
        ));

        let cli = Cli::try_parse_from(["postmark-sync", "open-layout"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::OpenLayout(open::OpenArgs { name: None }))));
    }

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(["postmark-sync", "--verbose"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_command_is_invalid_subcommand() {
        let err = Cli::try_parse_from(["postmark-sync", "deploy"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }
}
