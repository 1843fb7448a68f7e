// multipart upload to the backend

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use super::credentials::CredentialProvider;
use super::file::CandidateFile;
use crate::utils::files::format_file_size;

/// multipart part carrying the file bytes
pub const FILE_FIELD: &str = "file";
/// multipart part carrying the classification folder
pub const FOLDER_FIELD: &str = "folder";

const GENERIC_FAILURE: &str = "Gagal mengunggah file";

#[derive(Debug, Error)]
pub enum TransportError {
    /// backend answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("{}", GENERIC_FAILURE)]
    Request(#[source] reqwest::Error),
    #[error("{}", GENERIC_FAILURE)]
    InvalidBody(#[source] serde_json::Error),
}

/// build the shared http client
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("desa-upload/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")
}

/// posts one file per call to a fixed endpoint, no retries
#[derive(Clone)]
pub struct UploadTransport {
    client: Client,
    endpoint: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl UploadTransport {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, file), fields(endpoint = %self.endpoint, file = %file.name))]
    pub async fn upload(&self, file: &CandidateFile, folder: &str) -> Result<Value, TransportError> {
        info!(
            "uploading {} ({}) to folder '{}'",
            file.name,
            format_file_size(file.size()),
            folder
        );

        let part = Part::stream_with_length(file.bytes.clone(), file.size())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(TransportError::Request)?;

        let form = Form::new()
            .part(FILE_FIELD, part)
            .text(FOLDER_FIELD, folder.to_string());

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(token) = self.credentials.token() {
            debug!("attaching bearer credential");
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            error!("upload request failed: {}", err);
            TransportError::Request(err)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Request)?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
            error!("upload rejected with HTTP {}: {}", status, message);
            return Err(TransportError::Rejected { status, message });
        }

        let raw: Value = serde_json::from_slice(&body).map_err(|err| {
            error!("upload succeeded but response is not json: {}", err);
            TransportError::InvalidBody(err)
        })?;

        info!("upload completed with HTTP {}", status);
        Ok(raw)
    }
}

/// human-readable message from an error body, `error` before `message`
fn error_message(body: &[u8]) -> Option<String> {
    let raw: Value = serde_json::from_slice(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        raw.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        let body = br#"{ "error": "Token tidak valid", "message": "Unauthorized" }"#;
        assert_eq!(error_message(body).as_deref(), Some("Token tidak valid"));
    }

    #[test]
    fn test_error_message_falls_back_to_message_field() {
        let body = br#"{ "error": "", "message": "Folder tidak dikenal" }"#;
        assert_eq!(error_message(body).as_deref(), Some("Folder tidak dikenal"));
    }

    #[test]
    fn test_error_message_unparseable_body() {
        assert_eq!(error_message(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(error_message(br#"{ "status": 500 }"#), None);
        assert_eq!(error_message(b""), None);
    }
}
