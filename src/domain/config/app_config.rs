//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::RecordingError;
use crate::domain::recording::{Duration, RecorderOptions};

/// Binary used when no FFmpeg path is configured
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_path: Option<String>,
    pub file_name: Option<String>,
    pub format: Option<String>,
    pub frame_rate: Option<u32>,
    pub codec: Option<String>,
    pub preset: Option<String>,
    pub resolution: Option<String>,
    pub verbose: Option<bool>,
    pub include_uuid: Option<bool>,
    pub record_audio: Option<bool>,
    pub audio_source: Option<String>,
    pub volume: Option<f64>,
    pub extra_args: Option<Vec<String>>,
    pub overwrite: Option<bool>,
    pub time_limit: Option<String>,
    pub video_source: Option<String>,
    pub crf: Option<u8>,
    pub ffmpeg_path: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        let options = RecorderOptions::default();
        Self {
            output_path: Some(options.output_path),
            file_name: Some(options.file_name),
            format: Some(options.format),
            frame_rate: Some(options.frame_rate),
            codec: Some(options.codec),
            preset: Some(options.preset),
            resolution: options.resolution,
            verbose: Some(options.verbose),
            include_uuid: Some(options.include_uuid),
            record_audio: Some(options.record_audio),
            audio_source: None,
            volume: Some(options.volume),
            extra_args: None,
            overwrite: Some(options.overwrite),
            time_limit: None,
            video_source: None,
            crf: None,
            ffmpeg_path: Some(DEFAULT_FFMPEG.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_path: other.output_path.or(self.output_path),
            file_name: other.file_name.or(self.file_name),
            format: other.format.or(self.format),
            frame_rate: other.frame_rate.or(self.frame_rate),
            codec: other.codec.or(self.codec),
            preset: other.preset.or(self.preset),
            resolution: other.resolution.or(self.resolution),
            verbose: other.verbose.or(self.verbose),
            include_uuid: other.include_uuid.or(self.include_uuid),
            record_audio: other.record_audio.or(self.record_audio),
            audio_source: other.audio_source.or(self.audio_source),
            volume: other.volume.or(self.volume),
            extra_args: other.extra_args.or(self.extra_args),
            overwrite: other.overwrite.or(self.overwrite),
            time_limit: other.time_limit.or(self.time_limit),
            video_source: other.video_source.or(self.video_source),
            crf: other.crf.or(self.crf),
            ffmpeg_path: other.ffmpeg_path.or(self.ffmpeg_path),
        }
    }

    /// Fill recorder options from this config, falling back to the
    /// recorder defaults for unset fields.
    ///
    /// Only `time_limit` is parsed here; everything else is checked when
    /// the options are turned into a `RecorderConfig`.
    pub fn to_recorder_options(&self) -> Result<RecorderOptions, RecordingError> {
        let defaults = RecorderOptions::default();

        let time_limit = self
            .time_limit
            .as_deref()
            .map(|s| {
                s.parse::<Duration>()
                    .map_err(|_| RecordingError::invalid_field("time_limit", s))
            })
            .transpose()?;

        Ok(RecorderOptions {
            output_path: self.output_path.clone().unwrap_or(defaults.output_path),
            file_name: self.file_name.clone().unwrap_or(defaults.file_name),
            format: self.format.clone().unwrap_or(defaults.format),
            frame_rate: self.frame_rate.unwrap_or(defaults.frame_rate),
            codec: self.codec.clone().unwrap_or(defaults.codec),
            preset: self.preset.clone().unwrap_or(defaults.preset),
            resolution: self.resolution.clone().or(defaults.resolution),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            include_uuid: self.include_uuid.unwrap_or(defaults.include_uuid),
            record_audio: self.record_audio.unwrap_or(defaults.record_audio),
            audio_source: self.audio_source.clone(),
            volume: self.volume.unwrap_or(defaults.volume),
            extra_args: self.extra_args.clone().unwrap_or_default(),
            overwrite: self.overwrite.unwrap_or(defaults.overwrite),
            time_limit,
            video_source: self.video_source.clone(),
            crf: self.crf,
        })
    }

    /// Get the FFmpeg binary, or "ffmpeg" (looked up on PATH) if not set
    pub fn ffmpeg_or_default(&self) -> PathBuf {
        PathBuf::from(self.ffmpeg_path.as_deref().unwrap_or(DEFAULT_FFMPEG))
    }
}
