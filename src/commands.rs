// command implementations behind the cli

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::AppConfig;
use crate::upload::{CandidateFile, FieldPhase, FileKind, PathResolver, UploadService};
use crate::utils::files::format_file_size;

/// arguments of the `upload` subcommand
#[derive(Debug, Clone)]
pub struct UploadArgs {
    pub file: PathBuf,
    pub folder: String,
    pub kind: FileKind,
    pub token: Option<String>,
    pub current: Option<String>,
}

/// run the field workflow for one file and return the url handed to the form
///
/// Any inline field error becomes the returned error's message.
pub async fn upload(config: &AppConfig, args: UploadArgs) -> Result<String> {
    let file = CandidateFile::from_path(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    info!(
        "read {} ({}, {})",
        file.name,
        file.mime_type,
        format_file_size(file.size())
    );

    let service = UploadService::from_config(config, args.token)?;

    let reported: Arc<Mutex<Option<String>>> = Arc::default();
    let sink = reported.clone();
    let mut field = service
        .field(args.kind, args.folder, move |value| {
            if let Ok(mut slot) = sink.lock() {
                *slot = value.map(str::to_string);
            }
        })
        .mount(args.current.as_deref());

    let phase = field.handle_file(service.transport(args.kind), file).await;

    if let Some(message) = field.error() {
        anyhow::bail!("{message}");
    }

    let url = reported
        .lock()
        .ok()
        .and_then(|slot| slot.clone())
        .filter(|_| phase == FieldPhase::Populated)
        .context("upload finished without a value")?;

    Ok(url)
}

pub fn resolve(config: &AppConfig, location: &str, folder: &str) -> String {
    PathResolver::from_config(config).resolve(location, folder)
}

pub fn preview(config: &AppConfig, value: &str) -> String {
    PathResolver::from_config(config).display_url(Some(value))
}
