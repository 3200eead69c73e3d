//! Platform capture backends and FFmpeg command synthesis
//!
//! Each supported platform has one [`CaptureBackend`] supplying the FFmpeg
//! input formats, default sources and device-listing syntax. Backends are
//! picked once by `select_backend`, so nothing downstream branches on the OS.

mod command;
mod devices;
mod linux;
mod macos;
mod windows;

use std::fmt;

pub use command::{build_command, shell_quote, CaptureCommand};
pub use devices::DeviceList;
pub use linux::LinuxBackend;
pub use macos::MacOsBackend;
pub use windows::WindowsBackend;

use crate::domain::error::RecordingError;
use crate::domain::platform::Platform;

/// Program that answers a device-listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingProgram {
    /// The configured FFmpeg binary
    Ffmpeg,
    /// Another tool looked up on `PATH`
    External(&'static str),
}

/// Read-only, non-interactive invocation that lists audio devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    pub program: ListingProgram,
    pub args: Vec<String>,
}

impl DeviceQuery {
    fn ffmpeg(args: &[&str]) -> Self {
        Self {
            program: ListingProgram::Ffmpeg,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Platform-specific capture syntax and defaults
pub trait CaptureBackend: Send + Sync + fmt::Debug {
    fn platform(&self) -> Platform;

    /// FFmpeg input format used to grab the screen
    fn screen_format(&self) -> &'static str;

    /// Screen source used when none is configured
    fn default_video_source(&self) -> &'static str;

    /// Audio device used when none is configured, `None` if the platform has no audio capture
    fn default_audio_source(&self) -> Option<&'static str>;

    /// Input arguments that open `device` as an audio source
    fn audio_input_args(&self, device: &str) -> Vec<String>;

    /// Invocation that lists the host's audio devices
    fn device_query(&self) -> DeviceQuery;

    /// Extract device names from the listing output
    fn parse_devices(&self, output: &str) -> DeviceList;
}

static WINDOWS: WindowsBackend = WindowsBackend;
static MACOS: MacOsBackend = MacOsBackend;
static LINUX: LinuxBackend = LinuxBackend;

/// Look up the backend for `platform`
pub fn select_backend(platform: Platform) -> &'static dyn CaptureBackend {
    match platform {
        Platform::Windows => &WINDOWS,
        Platform::MacOs => &MACOS,
        Platform::Linux => &LINUX,
    }
}

/// Look up the backend for an OS identifier such as `"win32"` or `"linux"`
pub fn backend_for_os(os: &str) -> Result<&'static dyn CaptureBackend, RecordingError> {
    let platform: Platform = os.parse()?;
    Ok(select_backend(platform))
}
