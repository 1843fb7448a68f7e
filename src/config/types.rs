// configuration type definitions

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// command line interface definition
#[derive(Parser, Debug, Clone)]
#[command(name = "desa-upload", version = env!("CARGO_PKG_VERSION"))]
#[command(about = "upload images and documents to the village website backend")]
pub struct Cli {
    /// config file to use
    #[arg(short = 'c', long, global = true)]
    pub config_file: Option<PathBuf>,

    /// api base url, must end in /api
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// validate and upload a file, then print its resolved url
    Upload {
        /// file to upload
        file: PathBuf,

        /// classification folder sent with the upload (e.g. galeri, bumdes)
        #[arg(short = 'f', long)]
        folder: String,

        /// upload as a pdf document instead of an image
        #[arg(short = 'd', long)]
        document: bool,

        /// bearer token, overrides the session store
        #[arg(short = 't', long, env = "DESA_TOKEN")]
        token: Option<String>,

        /// value currently stored on the record being edited
        #[arg(long)]
        current: Option<String>,
    },

    /// resolve a location returned by the backend into a url
    Resolve {
        location: String,

        #[arg(short = 'f', long)]
        folder: String,
    },

    /// print the url a stored value would be displayed with
    Preview { value: String },
}

/// complete application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// backend api configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

/// where assets live when they are not served by the backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
    #[serde(default = "default_asset_root")]
    pub root: String,
    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

/// upload endpoints, relative to the api base url or absolute
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    #[serde(default = "default_image_endpoint")]
    pub image: String,
    #[serde(default = "default_document_endpoint")]
    pub document: String,
}

/// session store holding the admin bearer token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub store: Option<PathBuf>,
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl AppConfig {
    /// backend origin derived from the api base url
    pub fn backend_origin(&self) -> String {
        crate::utils::urls::strip_api_suffix(&self.api.base_url)
    }

    /// fully qualified image upload url
    pub fn image_endpoint(&self) -> String {
        crate::utils::urls::join_url(&self.api.base_url, &self.endpoints.image)
    }

    /// fully qualified document upload url
    pub fn document_endpoint(&self) -> String {
        crate::utils::urls::join_url(&self.api.base_url, &self.endpoints.document)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: default_asset_root(),
            upload_prefix: default_upload_prefix(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            image: default_image_endpoint(),
            document: default_document_endpoint(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: None,
            token_key: default_token_key(),
        }
    }
}

// default value functions for serde
fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_asset_root() -> String {
    "/images".to_string()
}

fn default_upload_prefix() -> String {
    "/uploads/".to_string()
}

fn default_placeholder() -> String {
    "/images/placeholder.png".to_string()
}

fn default_image_endpoint() -> String {
    "/upload".to_string()
}

fn default_document_endpoint() -> String {
    "/upload/pdf".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}
