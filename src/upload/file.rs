// candidate file picked or dropped by the user

use std::path::Path;

use bytes::Bytes;
use tokio::fs;

use crate::utils::files::{display_file_name, get_mime_type};

/// raw file contents with the declared mime type
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// read a file from disk, guessing the mime type from its extension
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path).await?;
        Ok(Self::new(display_file_name(path), get_mime_type(path), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
