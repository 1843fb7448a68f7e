// wiring from configuration to transports, resolver and fields

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use super::credentials::{CredentialProvider, SessionStore, StaticCredential};
use super::field::UploadField;
use super::resolver::PathResolver;
use super::transport::{build_client, UploadTransport};
use super::validator::FileKind;
use crate::config::AppConfig;

/// everything the admin forms need to host upload fields
#[derive(Clone)]
pub struct UploadService {
    image: UploadTransport,
    document: UploadTransport,
    resolver: PathResolver,
}

impl UploadService {
    /// build from configuration; `token` wins over the session store
    pub fn from_config(config: &AppConfig, token: Option<String>) -> Result<Self> {
        let credentials: Arc<dyn CredentialProvider> = match token {
            Some(token) => Arc::new(StaticCredential::new(Some(token))),
            None => match SessionStore::from_config(&config.session) {
                Some(store) => {
                    debug!("reading credentials from session store");
                    Arc::new(store)
                }
                None => Arc::new(StaticCredential::default()),
            },
        };

        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: &AppConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let client = build_client()?;
        let service = Self {
            image: UploadTransport::new(client.clone(), config.image_endpoint(), credentials.clone()),
            document: UploadTransport::new(client, config.document_endpoint(), credentials),
            resolver: PathResolver::from_config(config),
        };

        info!(
            "upload endpoints: image={} document={}",
            service.image.endpoint(),
            service.document.endpoint()
        );
        Ok(service)
    }

    pub fn transport(&self, kind: FileKind) -> &UploadTransport {
        match kind {
            FileKind::Image => &self.image,
            FileKind::Document => &self.document,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// a fresh field for one form input
    pub fn field(
        &self,
        kind: FileKind,
        folder: impl Into<String>,
        on_change: impl FnMut(Option<&str>) + Send + 'static,
    ) -> UploadField {
        UploadField::new(kind.policy(), folder, self.resolver.clone(), on_change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_follow_configuration() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://api.example.id/api".to_string();
        config.endpoints.document = "https://files.example.id/pdf".to_string();

        let service = UploadService::from_config(&config, None).unwrap();
        assert_eq!(
            service.transport(FileKind::Image).endpoint(),
            "https://api.example.id/api/upload"
        );
        assert_eq!(
            service.transport(FileKind::Document).endpoint(),
            "https://files.example.id/pdf"
        );
        assert_eq!(service.resolver().backend_origin(), "https://api.example.id");
    }

    #[test]
    fn test_field_uses_kind_policy() {
        let service = UploadService::from_config(&AppConfig::default(), None).unwrap();
        let field = service.field(FileKind::Document, "apbdes", |_| {});

        assert_eq!(field.policy().kind, FileKind::Document);
        assert_eq!(field.folder(), "apbdes");
    }
}
