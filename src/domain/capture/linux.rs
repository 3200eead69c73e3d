//! Linux backend: x11grab for the display, PulseAudio for audio

use super::{CaptureBackend, DeviceList, DeviceQuery, ListingProgram};
use crate::domain::platform::Platform;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxBackend;

impl CaptureBackend for LinuxBackend {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn screen_format(&self) -> &'static str {
        "x11grab"
    }

    fn default_video_source(&self) -> &'static str {
        ":0.0"
    }

    fn default_audio_source(&self) -> Option<&'static str> {
        Some("default")
    }

    fn audio_input_args(&self, device: &str) -> Vec<String> {
        vec![
            "-f".to_string(),
            "pulse".to_string(),
            "-i".to_string(),
            device.to_string(),
        ]
    }

    fn device_query(&self) -> DeviceQuery {
        DeviceQuery {
            program: ListingProgram::External("pactl"),
            args: vec!["list".to_string(), "sources".to_string(), "short".to_string()],
        }
    }

    /// `pactl list sources short` prints one tab-separated source per line;
    /// the second column is the name FFmpeg's pulse input accepts.
    fn parse_devices(&self, output: &str) -> DeviceList {
        output
            .lines()
            .filter_map(|line| {
                let mut columns = if line.contains('\t') {
                    line.split('\t').collect::<Vec<_>>()
                } else {
                    line.split_whitespace().collect::<Vec<_>>()
                };
                if columns.len() < 2 || columns[0].parse::<u32>().is_err() {
                    return None;
                }
                Some(columns.swap_remove(1).trim().to_string())
            })
            .collect()
    }
}
