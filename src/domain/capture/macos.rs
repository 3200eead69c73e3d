//! macOS backend: AVFoundation for screen and audio

use std::sync::LazyLock;

use regex::Regex;

use super::{CaptureBackend, DeviceList, DeviceQuery};
use crate::domain::platform::Platform;

static INDEXED_DEVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\s*\[(\d+)\]\s+(.+?)\s*$").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct MacOsBackend;

impl CaptureBackend for MacOsBackend {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn screen_format(&self) -> &'static str {
        "avfoundation"
    }

    fn default_video_source(&self) -> &'static str {
        "0:"
    }

    fn default_audio_source(&self) -> Option<&'static str> {
        Some("1")
    }

    /// AVFoundation addresses audio-only inputs as `:<index>`
    fn audio_input_args(&self, device: &str) -> Vec<String> {
        let input = if device.starts_with(':') {
            device.to_string()
        } else {
            format!(":{}", device)
        };
        vec![
            "-f".to_string(),
            "avfoundation".to_string(),
            "-i".to_string(),
            input,
        ]
    }

    fn device_query(&self) -> DeviceQuery {
        DeviceQuery::ffmpeg(&[
            "-hide_banner",
            "-f",
            "avfoundation",
            "-list_devices",
            "true",
            "-i",
            "",
        ])
    }

    fn parse_devices(&self, output: &str) -> DeviceList {
        let mut in_audio = false;
        let mut names = Vec::new();

        for line in output.lines() {
            if line.contains("AVFoundation audio devices") {
                in_audio = true;
                continue;
            }
            if line.contains("AVFoundation video devices") {
                in_audio = false;
                continue;
            }
            if !in_audio {
                continue;
            }
            if let Some(caps) = INDEXED_DEVICE.captures(line) {
                names.push(caps[2].to_string());
            }
        }

        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
[AVFoundation indev @ 0x7fe3] AVFoundation video devices:
[AVFoundation indev @ 0x7fe3] [0] FaceTime HD Camera
[AVFoundation indev @ 0x7fe3] [1] Capture screen 0
[AVFoundation indev @ 0x7fe3] AVFoundation audio devices:
[AVFoundation indev @ 0x7fe3] [0] MacBook Pro Microphone
[AVFoundation indev @ 0x7fe3] [1] BlackHole 2ch
[AVFoundation indev @ 0x7fe3] [2] MacBook Pro Microphone
: Input/output error
";

    #[test]
    fn parses_audio_section_only() {
        let list = MacOsBackend.parse_devices(LISTING);
        assert_eq!(list.names(), ["BlackHole 2ch", "MacBook Pro Microphone"]);
    }

    #[test]
    fn empty_output_gives_empty_list() {
        assert!(MacOsBackend.parse_devices("").is_empty());
    }
}
