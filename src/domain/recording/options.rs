//! Recorder options and the validated recorder configuration

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::RecordingError;

use super::duration::Duration;

static RESOLUTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,5})x([0-9]{1,5})$").expect("valid regex"));
static FILE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid regex"));
static OUTPUT_PATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_./-]+$").expect("valid regex"));
static FORMAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

/// Highest CRF value accepted by the supported encoders
pub const MAX_CRF: u8 = 51;

/// Supported video encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VideoCodec {
    #[default]
    Libx264,
    Libvpx,
    Mpeg4,
}

impl VideoCodec {
    pub const ALL: [Self; 3] = [Self::Libx264, Self::Libvpx, Self::Mpeg4];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Libx264 => "libx264",
            Self::Libvpx => "libvpx",
            Self::Mpeg4 => "mpeg4",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoCodec {
    type Err = RecordingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.as_str() == s)
            .ok_or_else(|| RecordingError::invalid_field("codec", s))
    }
}

/// Encoder speed/quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    #[default]
    Ultrafast,
    Fast,
    Medium,
    Slow,
}

impl Preset {
    pub const ALL: [Self; 4] = [Self::Ultrafast, Self::Fast, Self::Medium, Self::Slow];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ultrafast => "ultrafast",
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preset {
    type Err = RecordingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| RecordingError::invalid_field("preset", s))
    }
}

/// Capture frame size, `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = RecordingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecordingError::invalid_field("resolution", s);
        let caps = RESOLUTION_PATTERN.captures(s).ok_or_else(invalid)?;
        // At most five digits each, so these always fit
        let width = caps[1].parse().map_err(|_| invalid())?;
        let height = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self { width, height })
    }
}

/// Caller-facing recorder options, before validation.
///
/// `Default` yields the documented defaults; use struct update syntax to
/// override individual fields:
///
/// ```
/// use screen_recorder::domain::recording::RecorderOptions;
///
/// let options = RecorderOptions {
///     frame_rate: 60,
///     record_audio: true,
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderOptions {
    /// Directory for the output file, created recursively if missing
    pub output_path: String,
    /// Base name of the output file
    pub file_name: String,
    /// Container format, also used as the extension
    pub format: String,
    pub frame_rate: u32,
    pub codec: String,
    pub preset: String,
    /// `None` captures at the source's native size
    pub resolution: Option<String>,
    /// Echo the invocation and process output
    pub verbose: bool,
    /// Append a random UUID to the file name
    pub include_uuid: bool,
    pub record_audio: bool,
    /// `None` uses the platform's default audio device
    pub audio_source: Option<String>,
    /// Audio volume multiplier in [0.0, 2.0]
    pub volume: f64,
    /// Appended as-is before the output path
    pub extra_args: Vec<String>,
    /// Overwrite an existing output file (`-y`) or refuse (`-n`)
    pub overwrite: bool,
    /// Stop capturing after this long
    pub time_limit: Option<Duration>,
    /// Overrides the platform's default screen source
    pub video_source: Option<String>,
    /// Constant rate factor, 0 (lossless) to 51
    pub crf: Option<u8>,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            output_path: "./recordings".to_string(),
            file_name: "output".to_string(),
            format: "mp4".to_string(),
            frame_rate: 30,
            codec: VideoCodec::default().to_string(),
            preset: Preset::default().to_string(),
            resolution: Some("1920x1080".to_string()),
            verbose: false,
            include_uuid: true,
            record_audio: false,
            audio_source: None,
            volume: 1.0,
            extra_args: Vec::new(),
            overwrite: true,
            time_limit: None,
            video_source: None,
            crf: None,
        }
    }
}

impl RecorderOptions {
    /// Check every field, failing on the first invalid one.
    ///
    /// Pure: no I/O, same answer every time for the same options.
    pub fn validate(&self) -> Result<(), RecordingError> {
        if !(0.0..=2.0).contains(&self.volume) {
            return Err(RecordingError::invalid_field(
                "volume",
                format!("{} (must be between 0.0 and 2.0)", self.volume),
            ));
        }

        self.codec.parse::<VideoCodec>()?;
        self.preset.parse::<Preset>()?;

        if let Some(resolution) = &self.resolution {
            resolution.parse::<Resolution>()?;
        }

        if self.frame_rate == 0 {
            return Err(RecordingError::invalid_field("frame_rate", self.frame_rate));
        }

        if !FILE_NAME_PATTERN.is_match(&self.file_name) {
            return Err(RecordingError::invalid_field("file_name", &self.file_name));
        }

        if !OUTPUT_PATH_PATTERN.is_match(&self.output_path) {
            return Err(RecordingError::invalid_field(
                "output_path",
                &self.output_path,
            ));
        }

        if !FORMAT_PATTERN.is_match(&self.format) {
            return Err(RecordingError::invalid_field("format", &self.format));
        }

        if let Some(crf) = self.crf {
            if crf > MAX_CRF {
                return Err(RecordingError::invalid_field("crf", crf));
            }
        }

        Ok(())
    }
}

/// Validated, immutable recorder configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderConfig {
    output_path: String,
    file_name: String,
    format: String,
    frame_rate: u32,
    codec: VideoCodec,
    preset: Preset,
    resolution: Option<Resolution>,
    verbose: bool,
    include_uuid: bool,
    record_audio: bool,
    audio_source: Option<String>,
    volume: f64,
    extra_args: Vec<String>,
    overwrite: bool,
    time_limit: Option<Duration>,
    video_source: Option<String>,
    crf: Option<u8>,
}

impl RecorderConfig {
    /// Validate `options` and freeze them.
    pub fn new(options: RecorderOptions) -> Result<Self, RecordingError> {
        options.validate()?;

        Ok(Self {
            codec: options.codec.parse()?,
            preset: options.preset.parse()?,
            resolution: options
                .resolution
                .as_deref()
                .map(str::parse)
                .transpose()?,
            output_path: options.output_path,
            file_name: options.file_name,
            format: options.format,
            frame_rate: options.frame_rate,
            verbose: options.verbose,
            include_uuid: options.include_uuid,
            record_audio: options.record_audio,
            audio_source: options.audio_source,
            volume: options.volume,
            extra_args: options.extra_args,
            overwrite: options.overwrite,
            time_limit: options.time_limit,
            video_source: options.video_source,
            crf: options.crf,
        })
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn codec(&self) -> VideoCodec {
        self.codec
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn include_uuid(&self) -> bool {
        self.include_uuid
    }

    pub fn record_audio(&self) -> bool {
        self.record_audio
    }

    /// Explicit audio device, if one was configured
    pub fn audio_source(&self) -> Option<&str> {
        self.audio_source.as_deref()
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Explicit screen source, if one was configured
    pub fn video_source(&self) -> Option<&str> {
        self.video_source.as_deref()
    }

    pub fn crf(&self) -> Option<u8> {
        self.crf
    }
}

impl TryFrom<RecorderOptions> for RecorderConfig {
    type Error = RecordingError;

    fn try_from(options: RecorderOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}
