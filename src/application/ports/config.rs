//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted recorder settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings; keys missing from storage are `None`.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings with `config`.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    /// Write the recorder defaults. Fails if settings are already stored.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Resolve settings as defaults < stored < `overrides`.
    ///
    /// Unreadable storage is logged and skipped so a broken file never
    /// blocks a recording.
    async fn load_layered(&self, overrides: AppConfig) -> AppConfig {
        let stored = match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "Ignoring unreadable config file");
                AppConfig::empty()
            }
        };
        AppConfig::defaults().merge(stored).merge(overrides)
    }
}
