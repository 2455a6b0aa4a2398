//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use catalog_auth::{AuthSession, FileTokenStore};
use catalog_client::CatalogClient;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with overrides applied.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// The config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        api_url: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };

        let config = match config_path {
            Some(ref path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        }
        .with_base_url_override(api_url);

        debug!(
            config = ?config_path,
            base_url = %config.api.base_url,
            "loaded configuration"
        );

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Client for the configured API.
    pub fn client(&self) -> Result<CatalogClient> {
        CatalogClient::new(&self.config.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.config.api.base_url))
    }

    /// The session backed by the configured token file.
    pub fn session(&self) -> Result<AuthSession> {
        let path = self.config.token_path()?;
        AuthSession::load(FileTokenStore::new(&path))
            .with_context(|| format!("Failed to read token file: {}", path.display()))
    }
}

/// Walk up from `start` looking for a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
