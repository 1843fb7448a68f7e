// turns backend locations and stored values into displayable urls

use tracing::debug;

use crate::config::AppConfig;
use crate::utils::urls::{is_absolute_url, is_data_uri, join_asset_path};

/// pure location -> url mapping
///
/// Freshly uploaded locations are always resolvable. Values read back from
/// storage go through [`PathResolver::resolve_stored`], which refuses shapes
/// the current backend does not serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    backend_origin: String,
    asset_root: String,
    upload_prefix: String,
    placeholder: String,
}

impl PathResolver {
    pub fn new(
        backend_origin: impl Into<String>,
        asset_root: impl Into<String>,
        upload_prefix: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            backend_origin: backend_origin.into().trim_end_matches('/').to_string(),
            asset_root: asset_root.into(),
            upload_prefix: upload_prefix.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.backend_origin(),
            config.assets.root.clone(),
            config.assets.upload_prefix.clone(),
            config.assets.placeholder.clone(),
        )
    }

    pub fn backend_origin(&self) -> &str {
        &self.backend_origin
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// resolve a location just returned by the upload endpoint
    pub fn resolve(&self, location: &str, folder: &str) -> String {
        let location = location.trim();

        let resolved = if is_absolute_url(location) {
            location.to_string()
        } else if location.starts_with(&self.upload_prefix) {
            format!("{}{}", self.backend_origin, location)
        } else {
            join_asset_path(&self.asset_root, folder, location)
        };

        debug!("resolved location {} -> {}", location, resolved);
        resolved
    }

    /// renderable url for a previously stored value, if it has a shape we serve
    pub fn resolve_stored(&self, value: &str) -> Option<String> {
        let value = value.trim();

        if value.is_empty() {
            return None;
        }

        if is_absolute_url(value) || is_data_uri(value) {
            return Some(value.to_string());
        }

        if value.starts_with(&self.upload_prefix) {
            return Some(format!("{}{}", self.backend_origin, value));
        }

        debug!("stored value is not renderable: {}", value);
        None
    }

    /// url to display for a stored value, the placeholder when not renderable
    pub fn display_url(&self, value: Option<&str>) -> String {
        value
            .and_then(|value| self.resolve_stored(value))
            .unwrap_or_else(|| self.placeholder.clone())
    }
}
