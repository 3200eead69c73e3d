//! Config file store under the user's config directory

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "screen-recorder";
const FILE_NAME: &str = "config.toml";

/// Written above the settings by `init`
const FILE_HEADER: &str = "\
# screen-recorder settings
# Keys left out fall back to built-in defaults; command-line flags win over this file.

";

/// TOML config file at `<config dir>/screen-recorder/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        Self::with_path(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    /// Replace the file through a sibling staging file, so readers see
    /// either the old or the new contents.
    async fn replace_file(&self, content: &str) -> Result<(), ConfigError> {
        let write_error =
            |e: io::Error| ConfigError::WriteError(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, content).await.map_err(write_error)?;
        fs::rename(&staging, &self.path).await.map_err(write_error)
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.replace_file(&Self::to_toml(config)?).await
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;
        if exists {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        let content = format!("{}{}", FILE_HEADER, Self::to_toml(&AppConfig::defaults())?);
        self.replace_file(&content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_xdg() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("screen-recorder"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn parse_toml_flat_format() {
        let content = r#"
output_path = "./captures"
frame_rate = 60
codec = "libvpx"
record_audio = true
volume = 0.5
extra_args = ["-tune", "zerolatency"]
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.output_path.as_deref(), Some("./captures"));
        assert_eq!(config.frame_rate, Some(60));
        assert_eq!(config.codec.as_deref(), Some("libvpx"));
        assert_eq!(config.record_audio, Some(true));
        assert_eq!(config.volume, Some(0.5));
        assert_eq!(
            config.extra_args,
            Some(vec!["-tune".to_string(), "zerolatency".to_string()])
        );
        assert!(config.preset.is_none());
    }

    #[test]
    fn unknown_value_type_is_parse_error() {
        let err = XdgConfigStore::parse_toml("frame_rate = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[tokio::test]
    async fn init_then_load_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested/config.toml"));
        assert!(!store.path().exists());

        store.init().await.unwrap();
        assert!(store.path().exists());
        let written = std::fs::read_to_string(store.path()).unwrap();
        assert!(written.starts_with("# screen-recorder settings"));
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn layered_load_puts_overrides_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "frame_rate = 60\ncodec = \"libvpx\"\n").await.unwrap();
        let store = XdgConfigStore::with_path(&path);

        let overrides = AppConfig {
            codec: Some("mpeg4".to_string()),
            ..AppConfig::empty()
        };
        let config = store.load_layered(overrides).await;
        assert_eq!(config.frame_rate, Some(60));
        assert_eq!(config.codec.as_deref(), Some("mpeg4"));
        assert_eq!(config.format, AppConfig::defaults().format);
    }

    #[tokio::test]
    async fn layered_load_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "frame_rate = [").await.unwrap();
        let store = XdgConfigStore::with_path(&path);

        assert_eq!(store.load_layered(AppConfig::empty()).await, AppConfig::defaults());
    }

    #[tokio::test]
    async fn save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        store.init().await.unwrap();
        let update = AppConfig {
            codec: Some("libvpx".to_string()),
            ..AppConfig::empty()
        };
        store.save(&update).await.unwrap();

        assert_eq!(store.load().await.unwrap(), update);
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, ["config.toml"]);
    }
}
