// per-field upload state: preview, selected file, inline error

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::file::CandidateFile;
use super::normalize::{extract_location_with, MissingLocation};
use super::resolver::PathResolver;
use super::transport::{TransportError, UploadTransport};
use super::validator::{FilePolicy, ValidationError};

/// parent form callback, receives the resolved url or `None` when detached
pub type ChangeCallback = Box<dyn FnMut(Option<&str>) + Send>;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    MissingLocation(#[from] MissingLocation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    Empty,
    Uploading,
    Populated,
}

/// handle for one in-flight upload; only the latest ticket may complete
#[derive(Debug)]
#[must_use = "pass the ticket to finish_upload"]
pub struct UploadTicket {
    sequence: u64,
    file_name: String,
}

impl UploadTicket {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

pub struct UploadField {
    policy: FilePolicy,
    folder: String,
    resolver: PathResolver,
    on_change: ChangeCallback,
    preview: Option<String>,
    selected_file: Option<String>,
    failure: Option<FieldError>,
    uploading: bool,
    sequence: u64,
}

impl UploadField {
    pub fn new(
        policy: FilePolicy,
        folder: impl Into<String>,
        resolver: PathResolver,
        on_change: impl FnMut(Option<&str>) + Send + 'static,
    ) -> Self {
        Self {
            policy,
            folder: folder.into(),
            resolver,
            on_change: Box::new(on_change),
            preview: None,
            selected_file: None,
            failure: None,
            uploading: false,
            sequence: 0,
        }
    }

    /// seed the preview from the value the parent already holds
    ///
    /// Unrenderable values (legacy prefixes, bare names) leave the preview
    /// empty. The parent is not notified either way.
    pub fn mount(mut self, initial: Option<&str>) -> Self {
        self.preview = initial.and_then(|value| self.resolver.resolve_stored(value));
        if initial.is_some() && self.preview.is_none() {
            debug!("initial value for folder '{}' is not renderable", self.folder);
        }
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn phase(&self) -> FieldPhase {
        if self.uploading {
            FieldPhase::Uploading
        } else if self.preview.is_some() {
            FieldPhase::Populated
        } else {
            FieldPhase::Empty
        }
    }

    /// the drop zone should be disabled while this is true
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn error(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    pub fn failure(&self) -> Option<&FieldError> {
        self.failure.as_ref()
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn policy(&self) -> &FilePolicy {
        &self.policy
    }

    /// update the preview and tell the parent the same value
    pub fn set_value(&mut self, value: Option<String>) {
        self.preview = value;
        (self.on_change)(self.preview.as_deref());
    }

    /// detach the asset from the form; the backend copy is left alone
    ///
    /// An upload already in flight is not cancelled; its ticket still
    /// completes the field.
    pub fn clear(&mut self) {
        if !self.uploading {
            self.selected_file = None;
            self.failure = None;
        }
        self.set_value(None);
    }

    /// the preview url failed to load in the browser
    pub fn handle_load_error(&mut self) {
        warn!(
            "preview failed to load, clearing: {}",
            self.preview.as_deref().unwrap_or_default()
        );
        self.clear();
    }

    /// validate and move to `Uploading`; `None` when the file is rejected
    pub fn begin_upload(&mut self, file: &CandidateFile) -> Option<UploadTicket> {
        if let Err(err) = self.policy.validate(file) {
            warn!("rejected {} ({}): {}", file.name, file.mime_type, err);
            self.failure = Some(err.into());
            return None;
        }

        self.sequence += 1;
        self.uploading = true;
        self.failure = None;
        self.selected_file = Some(file.name.clone());

        Some(UploadTicket {
            sequence: self.sequence,
            file_name: file.name.clone(),
        })
    }

    /// apply the transport result for `ticket`
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<Value, TransportError>,
    ) -> FieldPhase {
        if ticket.sequence != self.sequence || !self.uploading {
            warn!(
                "discarding stale upload result for {} (ticket {}, current {})",
                ticket.file_name, ticket.sequence, self.sequence
            );
            return self.phase();
        }

        self.uploading = false;

        let location = result.map_err(FieldError::from).and_then(|raw| {
            extract_location_with(&raw, self.policy.location_shapes).map_err(FieldError::from)
        });

        match location {
            Ok(location) => {
                let url = self.resolver.resolve(&location, &self.folder);
                info!("{} uploaded as {}", ticket.file_name, url);
                self.failure = None;
                self.set_value(Some(url));
            }
            Err(err) => {
                match &err {
                    FieldError::MissingLocation(missing) => {
                        error!("upload response has no location, raw response: {}", missing.raw)
                    }
                    other => error!("upload of {} failed: {}", ticket.file_name, other),
                }
                // a failed re-upload must not leave the new file name on screen
                self.selected_file = None;
                self.failure = Some(err);
            }
        }

        self.phase()
    }

    /// full workflow: validate, upload, normalize, resolve, bind
    pub async fn handle_file(
        &mut self,
        transport: &UploadTransport,
        file: CandidateFile,
    ) -> FieldPhase {
        let Some(ticket) = self.begin_upload(&file) else {
            return self.phase();
        };

        let result = transport.upload(&file, &self.folder).await;
        self.finish_upload(ticket, result)
    }
}
