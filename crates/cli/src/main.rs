// mixxtools CLI - reconcile a Mixxx library against a player database and
// export the library to Rekordbox XML.

mod config;
mod exit_codes;
mod export;
mod fix_paths;
mod prompt;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_USAGE};

/// Error carrying its exit code and an optional hint for the operator.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn usage(message: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: message.into(),
            hint: None,
        }
    }
}

impl From<mixxtools_db::DbError> for CliError {
    fn from(e: mixxtools_db::DbError) -> Self {
        Self {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        }
    }
}

impl From<mixxtools_recon::ReconError> for CliError {
    fn from(e: mixxtools_recon::ReconError) -> Self {
        Self {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        }
    }
}

impl From<mixxtools_rekordbox::ExportError> for CliError {
    fn from(e: mixxtools_rekordbox::ExportError) -> Self {
        Self {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        }
    }
}

#[derive(Parser)]
#[command(name = "mixxtools")]
#[command(about = "Mixxx library reconciliation and Rekordbox export")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short, default_value = "mixxtools.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the custom mapping table by matching missing Mixxx tracks
    /// against the Clementine library
    FixPaths,
    /// Export tracks, cues, beatgrids and playlists to Rekordbox XML
    ExportXml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::FixPaths => fix_paths::run(&cli.config),
        Commands::ExportXml => export::run(&cli.config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
