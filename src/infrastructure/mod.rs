//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg and the config file.

pub mod config;
pub mod process;

// Re-export adapters
pub use config::XdgConfigStore;
pub use process::{FfmpegLauncher, FfmpegProcess, TokioCommandRunner};
