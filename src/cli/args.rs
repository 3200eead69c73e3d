//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};

use crate::domain::config::AppConfig;

/// screen-recorder - capture the screen (and optionally audio) with FFmpeg
#[derive(Parser, Debug)]
#[command(name = "screen-recorder")]
#[command(version)]
#[command(about = "Record the screen and audio to a video file using FFmpeg")]
#[command(long_about = None)]
pub struct Cli {
    /// Show FFmpeg output and debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Path to the FFmpeg binary
    #[arg(long, global = true, value_name = "PATH", env = "SCREEN_RECORDER_FFMPEG")]
    pub ffmpeg: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings from global flags and the environment
    pub fn global_config(&self) -> AppConfig {
        AppConfig {
            verbose: self.verbose.then_some(true),
            ffmpeg_path: self.ffmpeg.clone(),
            ..Default::default()
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record until Ctrl+C, the duration elapses or FFmpeg finishes
    Record(RecordArgs),
    /// List audio capture devices
    Devices {
        /// Platform to list for (windows, macos, linux; win32/darwin accepted)
        #[arg(long, value_name = "OS")]
        platform: Option<String>,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for a recording; unset flags fall back to the config file
#[derive(Args, Debug, Default)]
pub struct RecordArgs {
    /// Directory the recording is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_path: Option<String>,

    /// Base file name, without extension
    #[arg(short = 'n', long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Container format / file extension (mp4, mkv, webm, ...)
    #[arg(short = 'f', long, value_name = "EXT")]
    pub format: Option<String>,

    /// Frames per second
    #[arg(short = 'r', long, value_name = "FPS")]
    pub frame_rate: Option<u32>,

    /// Video codec (libx264, libvpx, mpeg4)
    #[arg(short = 'c', long, value_name = "CODEC")]
    pub codec: Option<String>,

    /// Encoding preset (ultrafast, fast, medium, slow)
    #[arg(short = 'p', long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Capture size, e.g. 1920x1080
    #[arg(short = 's', long, value_name = "WxH")]
    pub resolution: Option<String>,

    /// Screen input to capture instead of the platform default
    #[arg(long, value_name = "SOURCE")]
    pub video_source: Option<String>,

    /// Record audio as well
    #[arg(short = 'a', long)]
    pub audio: bool,

    /// Audio device (see `screen-recorder devices`)
    #[arg(long, value_name = "DEVICE")]
    pub audio_source: Option<String>,

    /// Audio volume multiplier, 0.0 to 2.0
    #[arg(long, value_name = "FACTOR")]
    pub volume: Option<f64>,

    /// Constant rate factor, 0 (lossless) to 51
    #[arg(long, value_name = "N")]
    pub crf: Option<u8>,

    /// Do not append a unique id to the file name
    #[arg(long)]
    pub no_uuid: bool,

    /// Fail instead of overwriting an existing file
    #[arg(long)]
    pub no_overwrite: bool,

    /// Stop gracefully after this long (e.g. 30s, 1m, 1h2m)
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<String>,

    /// Have FFmpeg itself stop after this long (-t)
    #[arg(short = 't', long, value_name = "TIME")]
    pub time_limit: Option<String>,

    /// Print the FFmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra FFmpeg arguments, placed before the output file
    #[arg(last = true, value_name = "FFMPEG_ARGS")]
    pub extra_args: Vec<String>,
}

impl RecordArgs {
    /// The part of the configuration set on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            output_path: self.output_path.clone(),
            file_name: self.file_name.clone(),
            format: self.format.clone(),
            frame_rate: self.frame_rate,
            codec: self.codec.clone(),
            preset: self.preset.clone(),
            resolution: self.resolution.clone(),
            verbose: None,
            include_uuid: self.no_uuid.then_some(false),
            record_audio: self.audio.then_some(true),
            audio_source: self.audio_source.clone(),
            volume: self.volume,
            extra_args: (!self.extra_args.is_empty()).then(|| self.extra_args.clone()),
            overwrite: self.no_overwrite.then_some(false),
            time_limit: self.time_limit.clone(),
            video_source: self.video_source.clone(),
            crf: self.crf,
            ffmpeg_path: None,
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "output_path",
    "file_name",
    "format",
    "frame_rate",
    "codec",
    "preset",
    "resolution",
    "verbose",
    "include_uuid",
    "record_audio",
    "audio_source",
    "volume",
    "extra_args",
    "overwrite",
    "time_limit",
    "video_source",
    "crf",
    "ffmpeg_path",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
