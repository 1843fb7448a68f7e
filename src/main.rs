// desa-upload: command line front end for the upload workflow

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use desa_upload::commands::{self, UploadArgs};
use desa_upload::config::{load_configuration, Cli, Command};
use desa_upload::upload::FileKind;

#[tokio::main]
async fn main() -> Result<()> {
    // parse command line arguments
    let cli = Cli::parse();

    // initialize logging based on verbosity flags
    init_logging(cli.verbose, cli.quiet)?;

    // load and merge configuration from file, environment and cli
    let config = load_configuration(&cli)?;

    let output = match cli.command {
        Command::Upload {
            file,
            folder,
            document,
            token,
            current,
        } => {
            let kind = if document {
                FileKind::Document
            } else {
                FileKind::Image
            };
            let args = UploadArgs {
                file,
                folder,
                kind,
                token,
                current,
            };
            commands::upload(&config, args).await?
        }
        Command::Resolve { location, folder } => commands::resolve(&config, &location, &folder),
        Command::Preview { value } => commands::preview(&config, &value),
    };

    println!("{output}");
    Ok(())
}

/// log level: info (default) + verbose - quiet, clamped to error..=trace
fn log_level(verbose_count: u8, quiet_count: u8) -> Level {
    let base_level = 2i16; // info level
    let adjustment = i16::from(verbose_count) - i16::from(quiet_count);

    match (base_level + adjustment).clamp(0, 4) {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// initialize structured logging with tracing
fn init_logging(verbose_count: u8, quiet_count: u8) -> Result<()> {
    let level = log_level(verbose_count, quiet_count);

    // RUST_LOG wins over the flags when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    // logs go to stderr so stdout carries only the url
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("logging initialized at level: {}", level);
    Ok(())
}
