//! Domain layer - Core recording logic
//!
//! Contains value objects, the session state machine, per-platform capture
//! backends, command synthesis and the error taxonomy.
//! This layer never spawns processes or touches the filesystem.

pub mod capture;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod platform;
pub mod recording;

// Re-export common types
pub use capture::{build_command, select_backend, CaptureBackend, CaptureCommand, DeviceList};
pub use config::AppConfig;
pub use diagnostics::{Diagnostic, DiagnosticClassifier, KeywordClassifier};
pub use error::*;
pub use platform::Platform;
pub use recording::{
    Duration, RecorderConfig, RecorderOptions, RecordingSession, SessionState,
};
