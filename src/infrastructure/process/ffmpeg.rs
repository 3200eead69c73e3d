//! FFmpeg process adapter

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

use crate::application::ports::{CaptureProcess, DiagnosticStream, ExitReport, ProcessLauncher};
use crate::domain::config::DEFAULT_FFMPEG;

/// FFmpeg's interactive quit command
const QUIT_COMMAND: &[u8] = b"q\n";

/// Spawns FFmpeg capture processes
#[derive(Debug, Clone)]
pub struct FfmpegLauncher {
    binary: PathBuf,
}

impl FfmpegLauncher {
    /// Create a launcher that runs `ffmpeg` from `PATH`
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_FFMPEG)
    }

    /// Create a launcher for a specific FFmpeg binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for FfmpegLauncher {
    type Process = FfmpegProcess;

    fn program(&self) -> &Path {
        &self.binary
    }

    fn launch(&self, args: &[String], verbose: bool) -> io::Result<FfmpegProcess> {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(if verbose {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group: a Ctrl-C in the terminal reaches only us,
        // and we decide how FFmpeg is shut down
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn()?;
        let stdin = child.stdin.take();
        Ok(FfmpegProcess { child, stdin })
    }
}

/// A running FFmpeg process
#[derive(Debug)]
pub struct FfmpegProcess {
    child: Child,
    stdin: Option<ChildStdin>,
}

#[async_trait]
impl CaptureProcess for FfmpegProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn take_diagnostics(&mut self) -> Option<DiagnosticStream> {
        self.child
            .stderr
            .take()
            .map(|stderr| Box::new(stderr) as DiagnosticStream)
    }

    /// SIGINT makes FFmpeg finalize the container before exiting
    #[cfg(unix)]
    fn interrupt(&mut self) -> io::Result<()> {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        match self.child.id() {
            Some(id) => signal::kill(Pid::from_raw(id as i32), Signal::SIGINT)
                .map_err(io::Error::from),
            // Already reaped
            None => Ok(()),
        }
    }

    /// No console signal can target a single child here; `q` on stdin does the job
    #[cfg(not(unix))]
    fn interrupt(&mut self) -> io::Result<()> {
        Ok(())
    }

    async fn request_quit(&mut self) -> io::Result<()> {
        match self.stdin.take() {
            Some(mut stdin) => {
                stdin.write_all(QUIT_COMMAND).await?;
                stdin.flush().await
            }
            None => Ok(()),
        }
    }

    async fn kill(&mut self) -> io::Result<()> {
        self.child.kill().await
    }

    async fn wait(&mut self) -> io::Result<ExitReport> {
        self.child.wait().await.map(ExitReport::from)
    }
}
