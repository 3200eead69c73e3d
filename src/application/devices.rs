//! Audio device enumeration use case

use std::path::PathBuf;

use tracing::debug;

use crate::domain::capture::{backend_for_os, select_backend, CaptureBackend, DeviceList, ListingProgram};
use crate::domain::error::RecordingError;
use crate::domain::platform::Platform;

use super::ports::CommandRunner;

/// Lists the audio capture devices a platform offers
pub struct DeviceEnumerator<R: CommandRunner> {
    runner: R,
    ffmpeg: PathBuf,
}

impl<R: CommandRunner> DeviceEnumerator<R> {
    /// Create an enumerator that runs FFmpeg from `ffmpeg`
    pub fn new(runner: R, ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            ffmpeg: ffmpeg.into(),
        }
    }

    /// List devices for `platform`, or for the host when `None`
    pub async fn list_devices(&self, platform: Option<Platform>) -> Result<DeviceList, RecordingError> {
        let platform = match platform {
            Some(platform) => platform,
            None => Platform::current()?,
        };
        self.list_with(select_backend(platform)).await
    }

    /// List devices for an OS identifier such as `"win32"` or `"darwin"`.
    ///
    /// Unsupported identifiers fail with 400 before anything is run.
    pub async fn list_devices_for_os(&self, os: &str) -> Result<DeviceList, RecordingError> {
        let backend = backend_for_os(os)?;
        self.list_with(backend).await
    }

    async fn list_with(&self, backend: &dyn CaptureBackend) -> Result<DeviceList, RecordingError> {
        let query = backend.device_query();
        let program = match query.program {
            ListingProgram::Ffmpeg => self.ffmpeg.clone(),
            ListingProgram::External(name) => PathBuf::from(name),
        };

        debug!(program = %program.display(), args = ?query.args, "Listing audio devices");

        let output = self.runner.run(&program, &query.args).await.map_err(|e| {
            RecordingError::internal(format!(
                "Failed to list devices with '{}': {}",
                program.display(),
                e
            ))
        })?;

        let devices = backend.parse_devices(&output);
        debug!(count = devices.len(), platform = %backend.platform(), "Devices found");
        Ok(devices)
    }
}
