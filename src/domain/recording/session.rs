//! Recording session state machine

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// What a session holds while recording
#[derive(Debug)]
struct Active<H> {
    handle: H,
    output_file: PathBuf,
    generation: u64,
}

/// Mutable runtime state of one recorder.
///
/// The process handle exists exactly while the state is `Recording`;
/// both change together in `begin` and `finish`.
///
/// State machine:
///   IDLE -> RECORDING (begin)
///   RECORDING -> IDLE (finish, finish_generation)
#[derive(Debug)]
pub struct RecordingSession<H> {
    active: Option<Active<H>>,
    generation: u64,
}

impl<H> RecordingSession<H> {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            active: None,
            generation: 0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Recording
        } else {
            SessionState::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// File of the in-progress recording
    pub fn output_file(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.output_file.as_path())
    }

    /// Generation of the in-progress recording
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.generation)
    }

    /// The generation the next `begin` will be assigned
    pub fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    /// Transition from IDLE to RECORDING, taking ownership of `handle`.
    ///
    /// On failure the handle is dropped along with the error.
    pub fn begin(&mut self, handle: H, output_file: PathBuf) -> Result<u64, InvalidStateTransition> {
        if self.active.is_some() {
            return Err(InvalidStateTransition {
                current_state: SessionState::Recording,
                action: "start recording".to_string(),
            });
        }
        self.generation += 1;
        self.active = Some(Active {
            handle,
            output_file,
            generation: self.generation,
        });
        Ok(self.generation)
    }

    /// Transition from RECORDING to IDLE, releasing the handle
    pub fn finish(&mut self) -> Result<(H, PathBuf), InvalidStateTransition> {
        match self.active.take() {
            Some(active) => Ok((active.handle, active.output_file)),
            None => Err(InvalidStateTransition {
                current_state: SessionState::Idle,
                action: "stop recording".to_string(),
            }),
        }
    }

    /// Finish only if the recording in progress is `generation`.
    ///
    /// Used when the process ends on its own: a stop that already ran, or a
    /// newer recording, must not be disturbed.
    pub fn finish_generation(&mut self, generation: u64) -> Option<(H, PathBuf)> {
        if self.generation() != Some(generation) {
            return None;
        }
        self.finish().ok()
    }
}

impl<H> Default for RecordingSession<H> {
    fn default() -> Self {
        Self::new()
    }
}
