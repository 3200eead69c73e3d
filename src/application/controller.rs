//! Recording controller use case
//!
//! Owns the recording session: validates nothing itself (the `RecorderConfig`
//! it receives is already valid), builds the capture command for the host
//! platform, spawns it through a [`ProcessLauncher`] and hands the process to
//! a supervisor task. Runtime failures are published on a broadcast channel.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::capture::{build_command, select_backend, CaptureBackend};
use crate::domain::diagnostics::{Diagnostic, DiagnosticClassifier, KeywordClassifier};
use crate::domain::error::{ErrorKind, RecordingError};
use crate::domain::platform::Platform;
use crate::domain::recording::{Duration, RecorderConfig, RecordingSession, SessionState};

use super::ports::{CaptureProcess, DiagnosticStream, ExitReport, ProcessLauncher};

/// Capacity of the event channel; slow subscribers lag rather than block
const EVENT_CAPACITY: usize = 64;

/// How long to wait for the diagnostic stream to drain after exit
const DIAGNOSTICS_DRAIN: StdDuration = StdDuration::from_secs(1);

/// Longest diagnostic line kept; the rest of the line is dropped
const MAX_DIAGNOSTIC_LINE: usize = 4096;

/// Lifecycle notification published by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderEvent {
    /// A runtime failure (start/stop misuse, spawn failure, abnormal exit, failure diagnostics)
    Error(RecordingError),
    /// The recording ended and the session is idle again
    Stopped,
}

/// Handle to the task that owns the running process
#[derive(Debug)]
struct Supervisor {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

type SharedSession = Arc<Mutex<RecordingSession<Supervisor>>>;

/// Screen recording controller
pub struct RecordingController<L: ProcessLauncher> {
    config: RecorderConfig,
    backend: &'static dyn CaptureBackend,
    launcher: L,
    grace_period: StdDuration,
    classifier: Arc<dyn DiagnosticClassifier>,
    session: SharedSession,
    events: broadcast::Sender<RecorderEvent>,
}

impl<L: ProcessLauncher> RecordingController<L> {
    /// Create a controller for the host platform.
    ///
    /// Fails with 400 when the host has no capture backend.
    pub fn new(config: RecorderConfig, launcher: L) -> Result<Self, RecordingError> {
        Ok(Self::with_platform(config, launcher, Platform::current()?))
    }

    /// Create a controller that builds commands for `platform`
    pub fn with_platform(config: RecorderConfig, launcher: L, platform: Platform) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            backend: select_backend(platform),
            launcher,
            grace_period: Duration::default_stop_grace().as_std(),
            classifier: Arc::new(KeywordClassifier::new()),
            session: Arc::new(Mutex::new(RecordingSession::new())),
            events,
        }
    }

    /// Set how long `stop()` waits for a graceful exit before killing
    pub fn with_grace_period(mut self, grace_period: StdDuration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Replace the stderr failure classifier
    pub fn with_classifier(mut self, classifier: impl DiagnosticClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.backend.platform()
    }

    /// Get current session state
    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    /// File being written by the current recording
    pub async fn output_file(&self) -> Option<PathBuf> {
        self.session.lock().await.output_file().map(PathBuf::from)
    }

    /// Start recording.
    ///
    /// Failures (409 when already recording, 500 when the command cannot be
    /// built or spawned) are published as [`RecorderEvent::Error`].
    pub async fn start(&self) {
        if let Err(err) = self.try_start().await {
            warn!(code = err.code, "{}", err.message);
            emit(&self.events, RecorderEvent::Error(err));
        }
    }

    /// Stop recording.
    ///
    /// Publishes [`RecorderEvent::Stopped`] once the process is gone, or a
    /// 404 error when nothing is recording.
    pub async fn stop(&self) {
        if let Err(err) = self.try_stop().await {
            warn!(code = err.code, "{}", err.message);
            emit(&self.events, RecorderEvent::Error(err));
        }
    }

    async fn try_start(&self) -> Result<(), RecordingError> {
        // Held across spawn so concurrent starts serialize
        let mut session = self.session.lock().await;
        if session.is_recording() {
            return Err(RecordingError::already_recording());
        }

        let output_file = self.config.resolve_output_file();
        if let Some(dir) = output_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                RecordingError::internal(format!(
                    "Failed to create output directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let command = build_command(&self.config, self.backend, &output_file)?;
        let rendered = command.render(self.launcher.program());
        if self.config.verbose() {
            eprintln!("{}", rendered);
        }
        debug!(command = %rendered, "Spawning capture process");

        let mut process = self
            .launcher
            .launch(command.args(), self.config.verbose())
            .map_err(|e| {
                let message = if e.kind() == std::io::ErrorKind::NotFound {
                    format!(
                        "FFmpeg not found at '{}'. Install it or set the ffmpeg path.",
                        self.launcher.program().display()
                    )
                } else {
                    format!("Failed to start FFmpeg: {}", e)
                };
                RecordingError::internal(message)
            })?;

        let pid = process.id();
        let diagnostics = process.take_diagnostics();
        let generation = session.next_generation();
        let (stop_tx, stop_rx) = oneshot::channel();

        let context = SupervisorContext {
            session: Arc::clone(&self.session),
            events: self.events.clone(),
            classifier: Arc::clone(&self.classifier),
            grace_period: self.grace_period,
            verbose: self.config.verbose(),
            generation,
        };
        let task = tokio::spawn(supervise(process, diagnostics, stop_rx, context));

        session
            .begin(Supervisor { stop_tx, task }, output_file.clone())
            .map_err(|e| RecordingError::internal(e.to_string()))?;

        info!(
            pid,
            output = %output_file.display(),
            platform = %self.backend.platform(),
            "Recording started"
        );
        Ok(())
    }

    async fn try_stop(&self) -> Result<(), RecordingError> {
        let (supervisor, output_file) = self
            .session
            .lock()
            .await
            .finish()
            .map_err(|_| RecordingError::no_active_recording())?;

        info!(output = %output_file.display(), "Stopping recording");

        let Supervisor { stop_tx, task } = supervisor;
        // Fails only if the process already exited on its own
        let _ = stop_tx.send(());
        if let Err(e) = task.await {
            warn!(error = %e, "Supervisor task ended abnormally");
        }

        emit(&self.events, RecorderEvent::Stopped);
        Ok(())
    }
}

/// Everything the supervisor task needs besides the process itself
struct SupervisorContext {
    session: SharedSession,
    events: broadcast::Sender<RecorderEvent>,
    classifier: Arc<dyn DiagnosticClassifier>,
    grace_period: StdDuration,
    verbose: bool,
    generation: u64,
}

fn emit(events: &broadcast::Sender<RecorderEvent>, event: RecorderEvent) {
    // No subscribers is fine
    let _ = events.send(event);
}

async fn supervise<P: CaptureProcess>(
    mut process: P,
    diagnostics: Option<DiagnosticStream>,
    stop_rx: oneshot::Receiver<()>,
    ctx: SupervisorContext,
) {
    let reader = diagnostics.map(|stream| {
        tokio::spawn(read_diagnostics(
            stream,
            Arc::clone(&ctx.classifier),
            ctx.events.clone(),
            ctx.verbose,
        ))
    });

    tokio::select! {
        status = process.wait() => {
            drain(reader).await;
            on_unexpected_exit(status, &ctx).await;
        }
        // A dropped sender also means the session let go of the process
        _ = stop_rx => {
            shut_down(&mut process, ctx.grace_period).await;
            drain(reader).await;
        }
    }
}

/// Interrupt, ask to quit, then kill once the grace period runs out
async fn shut_down<P: CaptureProcess>(process: &mut P, grace_period: StdDuration) {
    if let Err(e) = process.interrupt() {
        debug!(error = %e, "Interrupt not delivered");
    }
    if let Err(e) = process.request_quit().await {
        debug!(error = %e, "Quit request not delivered");
    }

    match tokio::time::timeout(grace_period, process.wait()).await {
        Ok(Ok(report)) => debug!(%report, "Capture process exited"),
        Ok(Err(e)) => warn!(error = %e, "Failed to wait for capture process"),
        Err(_) => {
            warn!(
                grace_ms = grace_period.as_millis() as u64,
                "Capture process ignored the interrupt, killing it"
            );
            if let Err(e) = process.kill().await {
                warn!(error = %e, "Failed to kill capture process");
            }
        }
    }
}

/// The process ended without `stop()`; release the session and report how
async fn on_unexpected_exit(status: std::io::Result<ExitReport>, ctx: &SupervisorContext) {
    // Held until the event is out, so an idle session always has its event queued
    let mut session = ctx.session.lock().await;
    // None: stop() took the session first and reports the outcome itself
    if session.finish_generation(ctx.generation).is_none() {
        return;
    }

    let event = match status {
        Ok(report) if report.success() => {
            info!("Capture process finished");
            RecorderEvent::Stopped
        }
        Ok(report) => {
            let code = report.code.unwrap_or(ErrorKind::Internal.code());
            RecorderEvent::Error(RecordingError::with_code(
                ErrorKind::Internal,
                code,
                format!("FFmpeg exited unexpectedly ({})", report),
            ))
        }
        Err(e) => RecorderEvent::Error(RecordingError::internal(format!(
            "Lost track of FFmpeg: {}",
            e
        ))),
    };
    emit(&ctx.events, event);
    drop(session);
}

async fn drain(reader: Option<JoinHandle<()>>) {
    if let Some(reader) = reader {
        if tokio::time::timeout(DIAGNOSTICS_DRAIN, reader).await.is_err() {
            debug!("Diagnostic stream still open after exit");
        }
    }
}

async fn read_diagnostics(
    stream: DiagnosticStream,
    classifier: Arc<dyn DiagnosticClassifier>,
    events: broadcast::Sender<RecorderEvent>,
    verbose: bool,
) {
    let mut lines = DiagnosticLines::new(stream);
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match classifier.classify(&line) {
                Diagnostic::Failure => {
                    warn!(line = %line, "FFmpeg reported a failure");
                    emit(&events, RecorderEvent::Error(RecordingError::internal(line)));
                }
                Diagnostic::Ordinary if verbose => eprintln!("{}", line),
                Diagnostic::Ordinary => debug!(target: "ffmpeg", "{}", line),
            },
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Diagnostic stream closed");
                break;
            }
        }
    }
}

/// Splits FFmpeg's stderr into lines.
///
/// Progress updates end in `\r` rather than `\n`, so both terminate a line.
/// Empty lines are skipped and lines longer than [`MAX_DIAGNOSTIC_LINE`]
/// bytes are truncated.
struct DiagnosticLines {
    reader: BufReader<DiagnosticStream>,
    pending: Vec<u8>,
}

impl DiagnosticLines {
    fn new(stream: DiagnosticStream) -> Self {
        Self {
            reader: BufReader::new(stream),
            pending: Vec::new(),
        }
    }

    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        loop {
            let buf = self.reader.fill_buf().await?;
            if buf.is_empty() {
                return Ok((!self.pending.is_empty()).then(|| self.take_line()));
            }

            let (used, complete) = match buf.iter().position(|&b| matches!(b, b'\n' | b'\r')) {
                Some(end) => {
                    push_capped(&mut self.pending, &buf[..end]);
                    (end + 1, true)
                }
                None => {
                    push_capped(&mut self.pending, buf);
                    (buf.len(), false)
                }
            };
            self.reader.consume(used);

            if complete && !self.pending.is_empty() {
                return Ok(Some(self.take_line()));
            }
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        line
    }
}

fn push_capped(line: &mut Vec<u8>, bytes: &[u8]) {
    let room = MAX_DIAGNOSTIC_LINE.saturating_sub(line.len());
    line.extend_from_slice(&bytes[..bytes.len().min(room)]);
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn split(input: &'static [u8]) -> Vec<String> {
        let mut lines = DiagnosticLines::new(Box::new(input));
        let mut out = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            out.push(line);
        }
        out
    }

    #[tokio::test]
    async fn carriage_returns_end_lines() {
        let lines = split(b"frame=1 fps=0\rframe=2 fps=30\r\n[x11grab] Error\n").await;
        assert_eq!(lines, ["frame=1 fps=0", "frame=2 fps=30", "[x11grab] Error"]);
    }

    #[tokio::test]
    async fn unterminated_tail_is_a_line() {
        assert_eq!(split(b"a\n\nb").await, ["a", "b"]);
        assert!(split(b"").await.is_empty());
    }

    #[tokio::test]
    async fn long_lines_are_truncated() {
        static LONG: [u8; 10_000] = [b'x'; 10_000];
        let mut lines = DiagnosticLines::new(Box::new(&LONG[..]));
        let line = lines.next_line().await.unwrap().unwrap();
        assert_eq!(line.len(), MAX_DIAGNOSTIC_LINE);
        assert!(lines.next_line().await.unwrap().is_none());
    }
}
