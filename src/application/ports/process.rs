//! Process port interfaces

use std::fmt;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// How a capture process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitReport {
    /// Exit code, absent when the process was ended by a signal
    pub code: Option<i32>,
    /// Terminating signal (Unix only)
    pub signal: Option<i32>,
}

impl ExitReport {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn from_signal(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    /// The process exited with code 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ExitReport {
    fn from(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {}", code),
            (None, Some(signal)) => write!(f, "signal {}", signal),
            (None, None) => write!(f, "unknown status"),
        }
    }
}

/// Byte stream carrying the process's diagnostic output
pub type DiagnosticStream = Box<dyn AsyncRead + Send + Unpin>;

/// A running capture process.
///
/// Owned by exactly one supervisor; nothing else signals or reads it.
#[async_trait]
pub trait CaptureProcess: Send + 'static {
    /// OS process id, if still known
    fn id(&self) -> Option<u32>;

    /// Take the diagnostic (stderr) stream. Returns `None` after the first call.
    fn take_diagnostics(&mut self) -> Option<DiagnosticStream>;

    /// Deliver one graceful interrupt (SIGINT on Unix)
    fn interrupt(&mut self) -> io::Result<()>;

    /// Write the quit instruction (`q`) to the process's input
    async fn request_quit(&mut self) -> io::Result<()>;

    /// Force-terminate the process
    async fn kill(&mut self) -> io::Result<()>;

    /// Wait for the process to exit. Must be cancel-safe.
    async fn wait(&mut self) -> io::Result<ExitReport>;
}

/// Port that spawns capture processes
pub trait ProcessLauncher: Send + Sync + 'static {
    type Process: CaptureProcess;

    /// Program the launcher runs
    fn program(&self) -> &Path;

    /// Spawn the program with `args` as argv, no shell involved.
    ///
    /// Standard output is inherited when `verbose`, discarded otherwise;
    /// standard error is always captured.
    fn launch(&self, args: &[String], verbose: bool) -> io::Result<Self::Process>;
}

/// Port for short-lived, read-only commands such as device listings
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` to completion and return its stdout and stderr combined.
    ///
    /// A non-zero exit is not an error: listing tools often exit non-zero
    /// after printing what was asked for.
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<String>;
}
