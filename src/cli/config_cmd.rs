//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::MAX_CRF;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let update = validate_config_value(key, value)?;

    let config = store.load().await?.merge(update);
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match display_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = display_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Parse `value` for `key` and check it the way a recording would.
///
/// Returns a config holding only that key.
fn validate_config_value(key: &str, value: &str) -> Result<AppConfig, ConfigError> {
    ensure_known_key(key)?;

    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    let mut update = AppConfig::empty();
    match key {
        "output_path" => update.output_path = Some(value.to_string()),
        "file_name" => update.file_name = Some(value.to_string()),
        "format" => update.format = Some(value.to_string()),
        "codec" => update.codec = Some(value.to_string()),
        "preset" => update.preset = Some(value.to_string()),
        "resolution" => update.resolution = Some(value.to_string()),
        "audio_source" => update.audio_source = Some(value.to_string()),
        "time_limit" => update.time_limit = Some(value.to_string()),
        "video_source" => update.video_source = Some(value.to_string()),
        "ffmpeg_path" => update.ffmpeg_path = Some(value.to_string()),
        "extra_args" => {
            update.extra_args = Some(value.split_whitespace().map(String::from).collect())
        }
        "frame_rate" => {
            update.frame_rate = Some(
                value
                    .parse()
                    .map_err(|_| invalid("Value must be a positive integer".to_string()))?,
            )
        }
        "volume" => {
            update.volume = Some(
                value
                    .parse()
                    .map_err(|_| invalid("Value must be a number from 0.0 to 2.0".to_string()))?,
            )
        }
        "crf" => {
            update.crf = Some(value.parse().map_err(|_| {
                invalid(format!("Value must be an integer from 0 to {}", MAX_CRF))
            })?)
        }
        "verbose" | "include_uuid" | "record_audio" | "overwrite" => {
            let flag = Some(
                parse_bool(value)
                    .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?,
            );
            match key {
                "verbose" => update.verbose = flag,
                "include_uuid" => update.include_uuid = flag,
                "record_audio" => update.record_audio = flag,
                _ => update.overwrite = flag,
            }
        }
        _ => unreachable!(), // Already validated
    }

    // Unset keys take recorder defaults, so only this key can fail
    update
        .to_recorder_options()
        .and_then(|options| options.validate())
        .map_err(|e| invalid(e.message))?;

    Ok(update)
}

/// Render a config value for display
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "output_path" => config.output_path.clone(),
        "file_name" => config.file_name.clone(),
        "format" => config.format.clone(),
        "frame_rate" => config.frame_rate.map(|v| v.to_string()),
        "codec" => config.codec.clone(),
        "preset" => config.preset.clone(),
        "resolution" => config.resolution.clone(),
        "verbose" => config.verbose.map(|b| b.to_string()),
        "include_uuid" => config.include_uuid.map(|b| b.to_string()),
        "record_audio" => config.record_audio.map(|b| b.to_string()),
        "audio_source" => config.audio_source.clone(),
        "volume" => config.volume.map(|v| v.to_string()),
        "extra_args" => config.extra_args.as_ref().map(|args| args.join(" ")),
        "overwrite" => config.overwrite.map(|b| b.to_string()),
        "time_limit" => config.time_limit.clone(),
        "video_source" => config.video_source.clone(),
        "crf" => config.crf.map(|v| v.to_string()),
        "ffmpeg_path" => config.ffmpeg_path.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
