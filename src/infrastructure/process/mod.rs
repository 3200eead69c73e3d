//! Process infrastructure module
//!
//! Spawns and drives FFmpeg for recordings, and runs the one-off
//! commands used to list devices.

mod ffmpeg;
mod runner;

pub use ffmpeg::{FfmpegLauncher, FfmpegProcess};
pub use runner::TokioCommandRunner;
