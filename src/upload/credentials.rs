// bearer token providers for the upload transport

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SessionConfig;

/// supplies the admin bearer token, if any
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// fixed token, e.g. from the command line
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

impl CredentialProvider for StaticCredential {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// json object file holding the session, read on every call
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    key: String,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn from_config(session: &SessionConfig) -> Option<Self> {
        session
            .store
            .as_ref()
            .map(|path| Self::new(path.clone(), session.token_key.clone()))
    }
}

impl CredentialProvider for SessionStore {
    fn token(&self) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(
                    "failed to read session store {}: {}",
                    self.path.display(),
                    err
                );
                return None;
            }
        };

        let session: Value = match serde_json::from_str(&contents) {
            Ok(session) => session,
            Err(err) => {
                warn!("session store is not valid json: {}", err);
                return None;
            }
        };

        let token = session
            .get(&self.key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        if token.is_none() {
            debug!("no token under key '{}' in session store", self.key);
        }
        token
    }
}
