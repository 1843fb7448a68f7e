// client-side file checks run before any network call

use thiserror::Error;

use super::file::CandidateFile;
use super::normalize::{LocationShape, ALL_SHAPES, DATA_URL_ONLY};

const MIB: u64 = 1024 * 1024;

/// which upload field a policy belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Document,
}

impl FileKind {
    pub fn policy(self) -> FilePolicy {
        match self {
            FileKind::Image => FilePolicy::IMAGE,
            FileKind::Document => FilePolicy::DOCUMENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{message}")]
    InvalidType {
        mime_type: String,
        message: &'static str,
    },
    #[error("{message}")]
    TooLarge {
        size: u64,
        max_bytes: u64,
        message: &'static str,
    },
}

/// whitelist, size ceiling and response shapes for one kind of upload field
#[derive(Debug, Clone, Copy)]
pub struct FilePolicy {
    pub kind: FileKind,
    pub allowed_mime_types: &'static [&'static str],
    pub max_bytes: u64,
    pub location_shapes: &'static [LocationShape],
    type_message: &'static str,
    size_message: &'static str,
}

impl FilePolicy {
    pub const IMAGE: FilePolicy = FilePolicy {
        kind: FileKind::Image,
        allowed_mime_types: &["image/jpeg", "image/png", "image/gif", "image/webp"],
        max_bytes: 5 * MIB,
        location_shapes: ALL_SHAPES,
        type_message: "Format file harus JPG, PNG, GIF, atau WebP",
        size_message: "Ukuran file tidak boleh lebih dari 5MB",
    };

    pub const DOCUMENT: FilePolicy = FilePolicy {
        kind: FileKind::Document,
        allowed_mime_types: &["application/pdf"],
        max_bytes: 10 * MIB,
        location_shapes: DATA_URL_ONLY,
        type_message: "Format file harus PDF",
        size_message: "Ukuran file tidak boleh lebih dari 10MB",
    };

    /// check type first, then size
    pub fn validate(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        let essence = mime_essence(&file.mime_type);
        if !self.allowed_mime_types.contains(&essence.as_str()) {
            return Err(ValidationError::InvalidType {
                mime_type: file.mime_type.clone(),
                message: self.type_message,
            });
        }

        let size = file.size();
        if size > self.max_bytes {
            return Err(ValidationError::TooLarge {
                size,
                max_bytes: self.max_bytes,
                message: self.size_message,
            });
        }

        Ok(())
    }
}

/// `Image/JPEG; q=1` -> `image/jpeg`
fn mime_essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
