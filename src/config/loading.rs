// configuration loading and merging logic

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::{debug, info};

use super::types::{AppConfig, Cli};

/// environment variable prefix, sections separated by `__`
pub const ENV_PREFIX: &str = "DESA_";

/// load and merge configuration from multiple sources
/// precedence: defaults < config file < environment < cli arguments
pub fn load_configuration(cli: &Cli) -> Result<AppConfig> {
    debug!("loading configuration with cli args: {:?}", cli);

    // start with default configuration
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

    // merge config file if provided
    if let Some(config_path) = &cli.config_file {
        if config_path.exists() {
            info!("loading config file: {}", config_path.display());
            figment = figment.merge(Toml::file(config_path));
        } else {
            anyhow::bail!("config file not found: {}", config_path.display());
        }
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    // merge cli overrides - highest precedence
    if let Some(base_url) = &cli.api_base_url {
        figment = figment.merge(Serialized::default("api.base_url", base_url));
    }

    // extract final configuration
    let config: AppConfig = figment.extract().context("failed to parse configuration")?;

    validate_configuration(&config)?;

    debug!("final configuration: {:?}", config);
    Ok(config)
}

/// validate configuration for consistency
pub fn validate_configuration(config: &AppConfig) -> Result<()> {
    let base_url = config.api.base_url.trim_end_matches('/');
    if base_url.is_empty() {
        anyhow::bail!("api base url cannot be empty");
    }

    // the backend origin is derived by stripping this suffix
    if !base_url.ends_with("/api") {
        anyhow::bail!("api base url must end in /api: {}", config.api.base_url);
    }

    let prefix = &config.assets.upload_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        anyhow::bail!("upload prefix must start and end with '/': {}", prefix);
    }

    if config.endpoints.image.trim().is_empty() || config.endpoints.document.trim().is_empty() {
        anyhow::bail!("upload endpoints cannot be empty");
    }

    if let Some(store) = &config.session.store {
        if !store.is_file() {
            anyhow::bail!("session store not found: {}", store.display());
        }
    }

    Ok(())
}
