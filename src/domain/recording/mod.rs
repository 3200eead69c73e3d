//! Recording configuration, output naming and session state

mod duration;
mod options;
mod output;
mod session;

pub use duration::{Duration, DEFAULT_STOP_GRACE_SECS};
pub use options::{Preset, RecorderConfig, RecorderOptions, Resolution, VideoCodec, MAX_CRF};
pub use output::output_file_path;
pub use session::{InvalidStateTransition, RecordingSession, SessionState};
