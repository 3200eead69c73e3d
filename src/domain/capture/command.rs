//! FFmpeg capture command builder

use std::borrow::Cow;
use std::path::Path;

use super::CaptureBackend;
use crate::domain::error::RecordingError;
use crate::domain::recording::RecorderConfig;

/// Ordered FFmpeg argument list for one recording.
///
/// Every value taken from the configuration occupies exactly one element,
/// and the list is handed to the OS as argv, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureCommand {
    args: Vec<String>,
}

impl CaptureCommand {
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Render `program` and the arguments as a copy-pasteable shell line
    pub fn render(&self, program: &Path) -> String {
        let program = program.to_string_lossy();
        std::iter::once(shell_quote(&program))
            .chain(self.args.iter().map(|arg| shell_quote(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote a single token so a POSIX shell reads it back as one word.
pub fn shell_quote(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed("''");
    }

    let is_safe = token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_-.,:/@%+=".contains(c));
    if is_safe {
        return Cow::Borrowed(token);
    }

    Cow::Owned(format!("'{}'", token.replace('\'', r"'\''")))
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}

/// Build the capture command for `config` on `backend`, writing to `output_file`.
///
/// Pure: identical inputs always give an identical argument list.
pub fn build_command(
    config: &RecorderConfig,
    backend: &dyn CaptureBackend,
    output_file: &Path,
) -> Result<CaptureCommand, RecordingError> {
    let output = output_file.to_str().ok_or_else(|| {
        RecordingError::internal(format!(
            "Output path is not valid UTF-8: {}",
            output_file.display()
        ))
    })?;

    let mut args = Vec::new();

    args.push(if config.overwrite() { "-y" } else { "-n" }.to_string());
    push_pair(&mut args, "-f", backend.screen_format());
    push_pair(&mut args, "-framerate", config.frame_rate().to_string());
    if let Some(resolution) = config.resolution() {
        push_pair(&mut args, "-video_size", resolution.to_string());
    }
    push_pair(
        &mut args,
        "-i",
        config
            .video_source()
            .unwrap_or_else(|| backend.default_video_source()),
    );

    if config.record_audio() {
        let device = config
            .audio_source()
            .or_else(|| backend.default_audio_source())
            .ok_or_else(|| {
                RecordingError::internal(format!(
                    "No audio source available on {}",
                    backend.platform()
                ))
            })?;
        args.extend(backend.audio_input_args(device));

        if config.volume() != 1.0 {
            push_pair(&mut args, "-af", format!("volume={}", config.volume()));
        }
    }

    push_pair(&mut args, "-c:v", config.codec().as_str());
    push_pair(&mut args, "-preset", config.preset().as_str());
    if let Some(crf) = config.crf() {
        push_pair(&mut args, "-crf", crf.to_string());
    }
    push_pair(&mut args, "-pix_fmt", "yuv420p");

    args.extend(config.extra_args().iter().cloned());

    if let Some(limit) = config.time_limit() {
        push_pair(&mut args, "-t", limit.to_ffmpeg_seconds());
    }

    args.push(output.to_string());

    Ok(CaptureCommand { args })
}
