//! Windows backend: gdigrab for the desktop, DirectShow for audio

use std::sync::LazyLock;

use regex::Regex;

use super::{CaptureBackend, DeviceList, DeviceQuery};
use crate::domain::platform::Platform;

static QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));
static TYPE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([a-z, ]+)\)\s*$").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsBackend;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Unknown,
    Video,
    Audio,
}

impl CaptureBackend for WindowsBackend {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn screen_format(&self) -> &'static str {
        "gdigrab"
    }

    fn default_video_source(&self) -> &'static str {
        "desktop"
    }

    fn default_audio_source(&self) -> Option<&'static str> {
        Some("Stereo Mix (Realtek(R) Audio)")
    }

    fn audio_input_args(&self, device: &str) -> Vec<String> {
        vec![
            "-f".to_string(),
            "dshow".to_string(),
            "-i".to_string(),
            format!("audio={}", device),
        ]
    }

    fn device_query(&self) -> DeviceQuery {
        DeviceQuery::ffmpeg(&[
            "-hide_banner",
            "-list_devices",
            "true",
            "-f",
            "dshow",
            "-i",
            "dummy",
        ])
    }

    /// Handles both listing layouts FFmpeg has used: per-line `(audio)`
    /// tags, and older "DirectShow audio devices" section headers.
    /// `@device_...` alternative names are moniker duplicates and skipped.
    fn parse_devices(&self, output: &str) -> DeviceList {
        let mut section = Section::Unknown;
        let mut names = Vec::new();

        for line in output.lines() {
            if line.contains("DirectShow video devices") {
                section = Section::Video;
                continue;
            }
            if line.contains("DirectShow audio devices") {
                section = Section::Audio;
                continue;
            }

            let Some(caps) = QUOTED_NAME.captures(line) else {
                continue;
            };
            let name = &caps[1];
            if name.contains("@device") {
                continue;
            }

            let is_audio = match TYPE_TAG.captures(line) {
                Some(tag) => tag[1].contains("audio"),
                None => section == Section::Audio,
            };
            if is_audio {
                names.push(name.to_string());
            }
        }

        names.into_iter().collect()
    }
}
